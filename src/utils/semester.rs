use std::cmp::Ordering;
use regex::Regex;
use crate::models::{CourseGroup, SemesterBucket};

pub const DEPTH_ELECTIVE: &str = "Depth Elective";

// Matches headers of regular semester tables.
pub fn semester_header_re() -> Regex {
    Regex::new(r"(?i)^Semester").unwrap()
}

// Normalizes a semester table header. Anything not starting with "Semester"
// (case-insensitive) falls into the depth elective bucket.
pub fn normalize_semester(semester_re: &Regex, header: &str) -> String {
    let clean = header.split("Code").next().unwrap_or("").trim();
    if semester_re.is_match(clean) {
        clean.to_string()
    } else {
        DEPTH_ELECTIVE.to_string()
    }
}

fn is_elective(label: &str) -> bool {
    label.to_lowercase().contains("depth elective")
}

fn semester_number(number_re: &Regex, label: &str) -> Option<u64> {
    number_re.find(label).and_then(|m| m.as_str().parse().ok())
}

// Electives last, then numbered semesters ascending, then unnumbered labels lexically.
fn compare_labels(number_re: &Regex, a: &str, b: &str) -> Ordering {
    match (is_elective(a), is_elective(b)) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    match (semester_number(number_re, a), semester_number(number_re, b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

// Buckets course groups by semester and orders the buckets.
pub fn group_by_semester(courses: Vec<CourseGroup>) -> Vec<SemesterBucket> {
    let mut buckets: Vec<SemesterBucket> = Vec::new();

    for mut course in courses {
        let semester = std::mem::take(&mut course.semester);
        match buckets.iter_mut().find(|b| b.semester == semester) {
            Some(bucket) => bucket.courses.push(course),
            None => buckets.push(SemesterBucket { semester, courses: vec![course] }),
        }
    }

    let number_re = Regex::new(r"\d+").unwrap();
    buckets.sort_by(|a, b| compare_labels(&number_re, &a.semester, &b.semester));
    buckets
}
