pub mod app_settings;
pub mod course_index;
pub mod persistence;
pub mod timetable;

pub use app_settings::AppSettings;
pub use course_index::{CourseIndex, TimetableIndex};
pub use timetable::{CourseSession, TimetableData};
