use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Labelled values scraped from the `#gpaInfo` table.
pub type StudentInfo = BTreeMap<String, String>;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum CourseStatus {
    #[serde(rename = "cleared")]
    Cleared,
    #[serde(rename = "locked")]
    Locked,
    #[serde(rename = "not offered")]
    NotOffered,
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "unknown")]
    Unknown,
    // Only produced when a course group re-derives an unknown status.
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Pre Requisites not cleared")]
    PrerequisitesNotCleared,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimingSlot {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
}

impl TimingSlot {
    pub fn is_empty(&self) -> bool {
        self.day.is_empty() && self.start_time.is_empty() && self.end_time.is_empty() && self.room.is_empty()
    }
}

/// One data row of a semester table, before grouping.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseRow {
    pub semester: String,
    pub status: CourseStatus,
    pub input_id: Option<String>,
    pub course_code: String,
    pub pre_requisite: String,
    pub credits: f64,
    pub course_name: String,
    pub grade: String,
    pub faculty_name: String,
    pub timings: Vec<TimingSlot>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub input_id: Option<String>,
    pub timings: Vec<TimingSlot>,
    pub faculty_name: String,
    pub status: CourseStatus,
}

/// All rows sharing one course code, merged. Serialized without its semester,
/// which lives on the enclosing bucket.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CourseGroup {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "CourseCode")]
    pub course_code: String,
    #[serde(rename = "Status")]
    pub status: CourseStatus,
    #[serde(rename = "PreRequisites")]
    pub pre_requisites: Vec<String>,
    #[serde(rename = "Credits")]
    pub credits: f64,
    #[serde(rename = "SLOTS")]
    pub slots: Vec<Slot>,
    #[serde(rename = "Grade")]
    pub grade: String,
    #[serde(skip)]
    pub semester: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SemesterBucket {
    pub semester: String,
    pub courses: Vec<CourseGroup>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcademicRecord {
    pub student_info: StudentInfo,
    pub selected_course_ids: Vec<String>,
    pub semesters: Vec<SemesterBucket>,
}

/// JSON envelope written by the binary: `{success, data}` or `{success, error}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScrapeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AcademicRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeResponse {
    pub fn success(record: AcademicRecord) -> ScrapeResponse {
        ScrapeResponse { success: true, data: Some(record), error: None }
    }

    pub fn failure(message: impl Into<String>) -> ScrapeResponse {
        ScrapeResponse { success: false, data: None, error: Some(message.into()) }
    }
}
