use crate::calc::date_range::{DATE_FORMAT, date_key};
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimetableError {
    #[error("line {line}: expected '<weekday> <date> <time> [location]', got '{content}'")]
    MalformedSession { line: usize, content: String },
    #[error("line {line}: '{value}' is not a dd.mm.yyyy date")]
    InvalidDate { line: usize, value: String },
}

/// One scheduled meeting of a course.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CourseSession {
    pub course_id: String,
    pub course_name: String,
    /// Weekday as written in the file, e.g. `Ma` or `Mon`.
    pub weekday_label: String,
    pub date_key: String,
    pub start: String,
    pub location: String,
}

impl CourseSession {
    /// Leading `HH:MM` of the time field, so `10:15-12:00` sorts as 10:15.
    pub fn start_time(&self) -> Option<NaiveTime> {
        let head = self.start.split('-').next().unwrap_or_default();
        NaiveTime::parse_from_str(head.trim(), "%H:%M").ok()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub sessions: Vec<CourseSession>,
}

#[derive(Debug, Default)]
pub struct TimetableData {
    pub courses: Vec<Course>,
}

impl TimetableData {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "timetable file {} not found (run `lukkari init` to create a sample)",
                path.display()
            );
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let data = Self::parse(&contents)
            .with_context(|| format!("failed to parse timetable {}", path.display()))?;
        log::info!(
            "loaded {} course(s) with {} session(s) from {}",
            data.courses.len(),
            data.session_count(),
            path.display()
        );
        Ok(data)
    }

    /// Blocks separated by blank lines: course id, course name, then one
    /// session per line. `#` lines are comments.
    pub fn parse(text: &str) -> Result<Self, TimetableError> {
        let mut courses = Vec::new();
        let mut block = Block::default();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                block.finish_into(&mut courses);
                continue;
            }
            if line.starts_with('#') {
                continue;
            }
            if block.id.is_none() {
                block.id = Some(line.to_string());
            } else if block.name.is_none() {
                block.name = Some(line.to_string());
            } else {
                let session = block.parse_session(line, idx + 1)?;
                block.sessions.push(session);
            }
        }
        block.finish_into(&mut courses);
        Ok(TimetableData { courses })
    }

    pub fn session_count(&self) -> usize {
        self.courses.iter().map(|c| c.sessions.len()).sum()
    }
}

#[derive(Default)]
struct Block {
    id: Option<String>,
    name: Option<String>,
    sessions: Vec<CourseSession>,
}

impl Block {
    fn parse_session(&self, line: &str, line_no: usize) -> Result<CourseSession, TimetableError> {
        let mut parts = line.split_whitespace();
        let (Some(label), Some(day), Some(time)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(TimetableError::MalformedSession {
                line: line_no,
                content: line.to_string(),
            });
        };
        let date = NaiveDate::parse_from_str(day, DATE_FORMAT).map_err(|_| {
            TimetableError::InvalidDate {
                line: line_no,
                value: day.to_string(),
            }
        })?;
        Ok(CourseSession {
            course_id: self.id.clone().unwrap_or_default(),
            course_name: self.name.clone().unwrap_or_default(),
            weekday_label: label.to_string(),
            date_key: date_key(date),
            start: time.to_string(),
            location: parts.collect::<Vec<_>>().join(" "),
        })
    }

    /// Blocks without a name are dropped.
    fn finish_into(&mut self, courses: &mut Vec<Course>) {
        let block = std::mem::take(self);
        if let (Some(id), Some(name)) = (block.id, block.name) {
            courses.push(Course {
                id,
                name,
                sessions: block.sessions,
            });
        }
    }
}
