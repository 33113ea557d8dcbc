use crate::calc::date_range::{self, DateDescriptor};
use crate::data::persistence::get_data_dir;
use crate::data::{AppSettings, CourseIndex, CourseSession, TimetableData, TimetableIndex};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::Serialize;

pub fn run(keyword: Option<&str>, date: Option<NaiveDate>, json: bool) -> Result<()> {
    let data_dir = get_data_dir()?;
    let settings = AppSettings::load()?;
    let timetable = TimetableData::load_from_path(&settings.timetable_path(&data_dir))?;
    let index = TimetableIndex::from_courses(&timetable.courses);

    let anchor = date.unwrap_or_else(|| Local::now().date_naive());
    let dates = dates_for(anchor, keyword);

    let mut out = std::io::stdout();
    if json {
        write_json(&dates, &index, &mut out)
    } else {
        write_sessions(&dates, &index, &mut out)
    }
}

/// An unknown keyword is reported and treated as an empty range.
pub(crate) fn dates_for(anchor: NaiveDate, keyword: Option<&str>) -> Vec<DateDescriptor> {
    date_range::generate(anchor, keyword).unwrap_or_else(|e| {
        log::warn!("{e}");
        eprintln!("{e}");
        Vec::new()
    })
}

pub(crate) fn write_sessions<W: std::io::Write>(
    dates: &[DateDescriptor],
    index: &dyn CourseIndex,
    out: &mut W,
) -> Result<()> {
    for dd in dates {
        for s in index.lookup(&dd.key) {
            writeln!(out, "Course: {} ({})", s.course_name, s.course_id)?;
            let when = format!("{} {} {} {}", s.weekday_label, s.date_key, s.start, s.location);
            writeln!(out, "Time: {}", when.trim_end())?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct DayListing<'a> {
    date: &'a str,
    weekday: u32,
    sessions: &'a [CourseSession],
}

pub(crate) fn write_json<W: std::io::Write>(
    dates: &[DateDescriptor],
    index: &dyn CourseIndex,
    out: &mut W,
) -> Result<()> {
    let listing: Vec<DayListing> = dates
        .iter()
        .map(|dd| DayListing {
            date: &dd.key,
            weekday: dd.weekday,
            sessions: index.lookup(&dd.key),
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &listing)?;
    writeln!(out)?;
    Ok(())
}
