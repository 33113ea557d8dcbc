use crate::data::timetable::{Course, CourseSession};
use std::collections::HashMap;

/// Date-keyed session lookup used by the views. Keys are `dd.mm.yyyy`.
pub trait CourseIndex {
    /// Sessions on `date_key` in start-time order; empty when none.
    fn lookup(&self, date_key: &str) -> &[CourseSession];
}

#[derive(Debug, Default)]
pub struct TimetableIndex {
    by_date: HashMap<String, Vec<CourseSession>>,
}

impl TimetableIndex {
    pub fn from_courses(courses: &[Course]) -> Self {
        let mut by_date: HashMap<String, Vec<CourseSession>> = HashMap::new();
        for session in courses.iter().flat_map(|c| &c.sessions) {
            by_date
                .entry(session.date_key.clone())
                .or_default()
                .push(session.clone());
        }
        // Unparseable times go last; the sort is stable so file order holds
        // among equal times.
        for sessions in by_date.values_mut() {
            sessions.sort_by_key(|s| {
                let start = s.start_time();
                (start.is_none(), start)
            });
        }
        TimetableIndex { by_date }
    }

    pub fn date_count(&self) -> usize {
        self.by_date.len()
    }
}

impl CourseIndex for TimetableIndex {
    fn lookup(&self, date_key: &str) -> &[CourseSession] {
        self.by_date.get(date_key).map(Vec::as_slice).unwrap_or(&[])
    }
}
