//! Dashboard statistics.

use serde::{Deserialize, Serialize};

use crate::attendance::AttendanceStanding;

/// Response of `GET /reports/dashboard`.
///
/// Every counter defaults to zero so a backend that omits a module's figures
/// still produces a usable dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_students: u64,
    pub total_teachers: u64,
    pub total_staff: u64,
    pub total_classes: u64,
    pub attendance_today: f64,
    pub fees_collected: f64,
    pub fees_pending: f64,
    pub books_issued: u64,
    pub overdue_books: u64,
    pub hostel_occupancy: f64,
    pub low_stock_items: u64,
    pub pending_leaves: u64,
    pub unread_messages: u64,
    pub active_notices: u64,
}

impl DashboardStats {
    pub fn attendance_standing(&self) -> AttendanceStanding {
        AttendanceStanding::from_percentage(self.attendance_today)
    }

    /// Share of billed fees already collected, as a percentage.
    pub fn collection_rate(&self) -> f64 {
        let billed = self.fees_collected + self.fees_pending;
        if billed <= 0.0 {
            return 0.0;
        }
        (self.fees_collected / billed * 1000.0).round() / 10.0
    }

    /// Labelled counters for a plain-text summary, in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Students", self.total_students.to_string()),
            ("Teachers", self.total_teachers.to_string()),
            ("Staff", self.total_staff.to_string()),
            ("Classes", self.total_classes.to_string()),
            ("Attendance today", format!("{:.1}%", self.attendance_today)),
            ("Fees collected", format!("{:.2}", self.fees_collected)),
            ("Fees pending", format!("{:.2}", self.fees_pending)),
            ("Books issued", self.books_issued.to_string()),
            ("Overdue books", self.overdue_books.to_string()),
            ("Hostel occupancy", format!("{:.1}%", self.hostel_occupancy)),
            ("Low stock items", self.low_stock_items.to_string()),
            ("Pending leaves", self.pending_leaves.to_string()),
            ("Unread messages", self.unread_messages.to_string()),
            ("Active notices", self.active_notices.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_payload_defaults() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{"totalStudents":420,"attendanceToday":91.5}"#).unwrap();
        assert_eq!(stats.total_students, 420);
        assert_eq!(stats.total_teachers, 0);
        assert_eq!(stats.attendance_standing(), AttendanceStanding::Good);
    }

    #[test]
    fn test_collection_rate() {
        let stats = DashboardStats {
            fees_collected: 750.0,
            fees_pending: 250.0,
            ..Default::default()
        };
        assert_eq!(stats.collection_rate(), 75.0);
        assert_eq!(DashboardStats::default().collection_rate(), 0.0);
    }

    #[test]
    fn test_rows_format() {
        let stats = DashboardStats {
            attendance_today: 80.0,
            ..Default::default()
        };
        let rows = stats.rows();
        assert_eq!(rows[0], ("Students", "0".to_string()));
        assert_eq!(rows[4], ("Attendance today", "80.0%".to_string()));
    }
}
