use crate::error::ScrapeError;
use crate::models::AcademicRecord;
use crate::utils::checkbox::selected_course_ids;
use crate::utils::courses::{group_courses, parse_course_rows};
use crate::utils::document::load;
use crate::utils::semester::group_by_semester;
use crate::utils::student::parse_student_info;

// Turns the registration page markup into the structured academic record.
pub fn extract_record(markup: &str) -> Result<AcademicRecord, ScrapeError> {
    let document = load(markup)?;

    let student_info = parse_student_info(&document);
    let selected_course_ids = selected_course_ids(&document);
    let rows = parse_course_rows(&document);
    let groups = group_courses(rows);
    let semesters = group_by_semester(groups);

    log::debug!(
        "Extracted {} info fields, {} selected courses, {} semesters",
        student_info.len(),
        selected_course_ids.len(),
        semesters.len()
    );

    Ok(AcademicRecord { student_info, selected_course_ids, semesters })
}
