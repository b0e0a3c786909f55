use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "present" | "p" => Some(AttendanceStatus::Present),
            "absent" | "a" => Some(AttendanceStatus::Absent),
            "late" | "l" => Some(AttendanceStatus::Late),
            "excused" | "e" => Some(AttendanceStatus::Excused),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttendanceTally {
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub excused: usize,
}

impl AttendanceTally {
    pub fn record(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Late => self.late += 1,
            AttendanceStatus::Excused => self.excused += 1,
        }
    }

    // Sessions that count towards the rate; excused ones do not.
    pub fn counted(&self) -> usize {
        self.present + self.late + self.absent
    }

    pub fn rate(&self) -> f64 {
        let attended = self.present + self.late;
        let counted = self.counted();
        if counted == 0 {
            return 0.0;
        }
        let rate = attended as f64 / counted as f64 * 100.0;
        (rate * 100.0).round() / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentAttendance {
    pub student: String,
    #[serde(flatten)]
    pub tally: AttendanceTally,
    pub attendance_rate: f64,
}
