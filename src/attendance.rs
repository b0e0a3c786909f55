use std::collections::BTreeMap;

use crate::csv_table::CsvTable;
use crate::error::ApiError;
use crate::models::attendance::{AttendanceStatus, AttendanceTally, StudentAttendance};

const STUDENT_COLUMNS: [&str; 2] = ["Student", "Name"];

#[derive(Debug, Default)]
pub struct AttendanceSummary {
    pub total_records: usize,
    pub overall: AttendanceTally,
    pub unrecognized: usize,
    pub students: Vec<StudentAttendance>,
}

impl AttendanceSummary {
    // Students with only excused sessions have no rate to judge.
    pub fn below(&self, threshold: f64) -> Vec<String> {
        self.students
            .iter()
            .filter(|s| s.tally.counted() > 0 && s.attendance_rate < threshold)
            .map(|s| s.student.clone())
            .collect()
    }
}

pub fn summarize(table: &CsvTable) -> Result<AttendanceSummary, ApiError> {
    table.require_columns(&["Status"])?;
    if table.is_empty() {
        return Err(ApiError::BadRequest("CSV contains no attendance records".into()));
    }

    let student_column = STUDENT_COLUMNS.iter().copied().find(|c| table.has_column(c));
    let mut summary = AttendanceSummary {
        total_records: table.len(),
        ..Default::default()
    };
    let mut per_student: BTreeMap<String, AttendanceTally> = BTreeMap::new();

    for row in table.rows() {
        let status = match row.get("Status").and_then(AttendanceStatus::parse) {
            Some(status) => status,
            None => {
                summary.unrecognized += 1;
                continue;
            }
        };
        summary.overall.record(status);

        if let Some(name) = student_column.and_then(|c| row.get(c)) {
            per_student
                .entry(name.trim().to_string())
                .or_default()
                .record(status);
        }
    }

    summary.students = per_student
        .into_iter()
        .map(|(student, tally)| StudentAttendance {
            attendance_rate: tally.rate(),
            student,
            tally,
        })
        .collect();
    Ok(summary)
}
