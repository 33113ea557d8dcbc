use crate::data::persistence::get_data_dir;
use crate::data::{AppSettings, TimetableData};
use anyhow::Result;

pub fn run() -> Result<()> {
    let settings = AppSettings::load()?;
    let timetable = TimetableData::load_from_path(&settings.timetable_path(&get_data_dir()?))?;
    write_courses(&timetable, &mut std::io::stdout())
}

pub(crate) fn write_courses<W: std::io::Write>(data: &TimetableData, out: &mut W) -> Result<()> {
    writeln!(out, "Courses")?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<14} {:<40} {}", "Id", "Name", "Sessions")?;
    for c in &data.courses {
        writeln!(out, "  {:<14} {:<40} {}", c.id, c.name, c.sessions.len())?;
    }
    writeln!(out, "---")?;
    writeln!(
        out,
        "Total: {} course(s), {} session(s)",
        data.courses.len(),
        data.session_count()
    )?;
    Ok(())
}
