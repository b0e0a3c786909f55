use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};

use crate::csv_table::CsvTable;
use crate::error::ApiError;
use crate::models::upcoming_task::UpcomingTask;

pub const REQUIRED_COLUMNS: [&str; 2] = ["Task", "Deadline"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// Parses a deadline cell. Date-only values resolve to midnight local time.
pub fn parse_deadline(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Rows whose deadline lies in `[now, now + window]`, in file order.
pub fn upcoming_tasks(
    table: &CsvTable,
    now: NaiveDateTime,
    window: Duration,
) -> Result<Vec<UpcomingTask>, ApiError> {
    table.require_columns(&REQUIRED_COLUMNS)?;
    let limit = now.checked_add_signed(window).ok_or_else(|| {
        ApiError::Internal(format!(
            "Schedule processing failed: alert window of {} days is out of range",
            window.num_days()
        ))
    })?;

    let tasks = table
        .rows()
        .filter_map(|row| {
            let deadline = parse_deadline(row.get("Deadline")?)?;
            if deadline < now || deadline > limit {
                return None;
            }
            Some(UpcomingTask {
                task: row.get("Task").unwrap_or_default().to_string(),
                deadline: deadline.date().format("%Y-%m-%d").to_string(),
                note: row.get("Notes").unwrap_or_default().to_string(),
            })
        })
        .collect();
    Ok(tasks)
}

pub fn format_line(task: &UpcomingTask) -> String {
    format!(
        "Task: {} | Deadline: {} | Notes: {}",
        task.task, task.deadline, task.note
    )
}
