use crate::calc::date_range::date_key;
use crate::calc::workday::weekday_index;
use crate::data::AppSettings;
use crate::data::app_settings::DEFAULT_TIMETABLE_FILE;
use anyhow::{Context, Result};
use chrono::{Days, Local, NaiveDate};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

pub fn run() -> Result<()> {
    let dir = crate::data::persistence::get_data_dir()?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create dir {}", dir.display()))?;
    run_in_dir(&dir, Local::now().date_naive())?;
    println!("Data files initialized in {}", dir.display());
    Ok(())
}

/// Writes config.yaml and, unless one already exists, a sample timetable
/// with sessions around `today`. Exposed for unit testing.
pub(crate) fn run_in_dir(dir: &Path, today: NaiveDate) -> Result<()> {
    AppSettings::default().save_to(dir)?;
    let timetable = dir.join(DEFAULT_TIMETABLE_FILE);
    if timetable.exists() {
        log::info!("keeping existing {}", timetable.display());
        return Ok(());
    }
    fs::write(&timetable, sample_timetable(today))
        .with_context(|| format!("failed to write {}", timetable.display()))?;
    Ok(())
}

const WEEKDAY_LABELS: [&str; 5] = ["Ma", "Ti", "Ke", "To", "Pe"];

/// Two example courses meeting over the four weeks starting with the week
/// of `today`.
pub(crate) fn sample_timetable(today: NaiveDate) -> String {
    let monday = today
        .checked_sub_days(Days::new(u64::from(weekday_index(today))))
        .unwrap_or(today);
    let mut text = String::from(
        "\
# Timetable file
#
# Courses are separated by blank lines. For each course:
#   line 1: course id
#   line 2: course name
#   then one line per session: <weekday> <dd.mm.yyyy> <time> <location>
# Lines starting with '#' are ignored.

",
    );
    let courses: [(&str, &str, &[(u64, &str)], &str); 2] = [
        (
            "TKO_1010",
            "Introduction to Programming",
            &[(0, "10:15"), (2, "12:15")],
            "Agora Auditorium",
        ),
        (
            "MATP_2020",
            "Linear Algebra",
            &[(1, "08:15"), (3, "14:15")],
            "Quantum 101",
        ),
    ];
    for (id, name, slots, room) in courses {
        let _ = writeln!(text, "{id}\n{name}");
        for week in 0..4u64 {
            for (weekday, time) in slots {
                let Some(date) = monday.checked_add_days(Days::new(week * 7 + weekday)) else {
                    continue;
                };
                let label = WEEKDAY_LABELS[*weekday as usize];
                let _ = writeln!(text, "{label} {} {time} {room}", date_key(date));
            }
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CourseIndex, TimetableData, TimetableIndex};
    use tempfile::TempDir;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_run_in_dir_creates_all_files() {
        let tmp = TempDir::new().unwrap();
        run_in_dir(tmp.path(), d(2024, 1, 10)).unwrap();
        assert!(tmp.path().join("config.yaml").exists(), "config.yaml missing");
        assert!(tmp.path().join("lukkari.txt").exists(), "lukkari.txt missing");
    }

    #[test]
    fn test_run_in_dir_keeps_existing_timetable() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("lukkari.txt");
        fs::write(&path, "MINE\nMy course\n").unwrap();
        run_in_dir(tmp.path(), d(2024, 1, 10)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "MINE\nMy course\n");
    }

    #[test]
    fn test_config_yaml_is_parseable_as_settings() {
        let tmp = TempDir::new().unwrap();
        run_in_dir(tmp.path(), d(2024, 1, 10)).unwrap();
        let settings = AppSettings::load_from(tmp.path()).unwrap();
        assert_eq!(settings, AppSettings::default());
        let content = fs::read_to_string(tmp.path().join("config.yaml")).unwrap();
        assert!(content.contains("timetable_file"));
    }

    #[test]
    fn test_sample_timetable_parses() {
        let data = TimetableData::parse(&sample_timetable(d(2024, 1, 10))).unwrap();
        assert_eq!(data.courses.len(), 2);
        assert_eq!(data.courses[0].sessions.len(), 8);
        assert_eq!(data.courses[1].sessions.len(), 8);
    }

    #[test]
    fn test_sample_timetable_starts_in_current_week() {
        let data = TimetableData::parse(&sample_timetable(d(2024, 1, 10))).unwrap();
        let index = TimetableIndex::from_courses(&data.courses);
        assert_eq!(index.lookup("08.01.2024").len(), 1);
        assert_eq!(index.lookup("09.01.2024")[0].course_id, "MATP_2020");
        assert_eq!(index.lookup("31.01.2024").len(), 1);
        assert!(index.lookup("05.01.2024").is_empty());
        assert!(index.lookup("05.02.2024").is_empty());
    }
}
