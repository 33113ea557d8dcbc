use crate::data::persistence::get_data_dir;
use crate::data::{AppSettings, TimetableData, TimetableIndex};
use crate::ui::TerminalGuard;
use crate::ui::signals::ShutdownSignal;
use crate::ui::timetable_view::{App, run_app};
use anyhow::Result;
use chrono::Local;

pub fn run() -> Result<()> {
    let data_dir = get_data_dir()?;
    let settings = AppSettings::load()?;
    let timetable_path = settings.timetable_path(&data_dir);
    let timetable = TimetableData::load_from_path(&timetable_path)?;
    let index = TimetableIndex::from_courses(&timetable.courses);
    log::info!("indexed sessions on {} dates", index.date_count());

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let shutdown = ShutdownSignal::register();
    let mut guard = TerminalGuard::acquire()?;

    let today = Local::now().date_naive();
    log::debug!("starting in {:?} view at {}", settings.start_view, today);
    let mut app = App::new(&index, &settings, today, timetable_path);

    let result = run_app(guard.terminal(), &mut app, &shutdown);

    guard.release()?;
    log::debug!(
        "closed in {:?} view at {}",
        app.controller().mode(),
        app.controller().anchor()
    );

    result
}
