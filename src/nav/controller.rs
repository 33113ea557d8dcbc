use crate::calc::AnchorNavigator;
use crate::calc::date_range::{self, DateDescriptor};
use crate::nav::ViewMode;
use crate::nav::grid::{CursorPosition, Direction, NavigationGrid};
use chrono::NaiveDate;

/// Everything the key-binding layer can ask of the navigation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    SwitchMode(ViewMode),
    Advance,
    Retreat,
    Move(Direction),
    Select,
    GoTo(NaiveDate),
}

/// Day / Week / Month state machine. Owns the anchor and the grid derived
/// from it; any anchor or mode change rebuilds the grid with a fresh cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewModeController {
    mode: ViewMode,
    navigator: AnchorNavigator,
    grid: NavigationGrid,
    skip_weekends: bool,
}

impl ViewModeController {
    pub fn new(today: NaiveDate) -> Self {
        Self::with_mode(today, ViewMode::Day)
    }

    pub fn with_mode(today: NaiveDate, mode: ViewMode) -> Self {
        ViewModeController {
            mode,
            navigator: AnchorNavigator::new(today),
            grid: NavigationGrid::build(mode, today),
            skip_weekends: true,
        }
    }

    pub fn skip_weekends(mut self, skip: bool) -> Self {
        self.skip_weekends = skip;
        self
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn anchor(&self) -> NaiveDate {
        self.navigator.anchor()
    }

    pub fn grid(&self) -> &NavigationGrid {
        &self.grid
    }

    pub fn cursor(&self) -> CursorPosition {
        self.grid.cursor()
    }

    /// Dates the current view covers, weekends included for Month.
    pub fn visible_range(&self) -> Vec<DateDescriptor> {
        date_range::range_for(self.anchor(), self.mode)
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SwitchMode(mode) => self.switch_mode(mode),
            Command::Advance => self.advance_unit(),
            Command::Retreat => self.retreat_unit(),
            Command::Move(direction) => self.move_cursor(direction),
            Command::Select => {
                self.select();
            }
            Command::GoTo(date) => self.go_to(date),
        }
    }

    pub fn switch_mode(&mut self, mode: ViewMode) {
        log::debug!("view mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.rebuild();
    }

    pub fn advance_unit(&mut self) {
        match self.mode {
            ViewMode::Day => self.navigator.advance_day(self.skip_weekends),
            ViewMode::Week => self.navigator.advance_week(),
            ViewMode::Month => self.navigator.advance_month(),
        }
        self.rebuild();
    }

    pub fn retreat_unit(&mut self) {
        match self.mode {
            ViewMode::Day => self.navigator.retreat_day(self.skip_weekends),
            ViewMode::Week => self.navigator.retreat_week(),
            ViewMode::Month => self.navigator.retreat_month(),
        }
        self.rebuild();
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        if self.mode == ViewMode::Day {
            return;
        }
        self.grid.move_cursor(direction);
    }

    /// Opens the date under the cursor in Day view. The anchor moves to that
    /// date, so the next advance/retreat steps from it. Returns false when
    /// nothing is selected.
    pub fn select(&mut self) -> bool {
        let Some(date) = self.grid.selected().map(|dd| dd.date) else {
            return false;
        };
        log::debug!("selected {}", date_range::date_key(date));
        self.navigator.jump_to(date);
        self.mode = ViewMode::Day;
        self.rebuild();
        true
    }

    pub fn go_to(&mut self, date: NaiveDate) {
        self.navigator.jump_to(date);
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.grid = NavigationGrid::build(self.mode, self.navigator.anchor());
    }
}
