use std::collections::HashMap;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use crate::models::{CourseGroup, CourseRow, CourseStatus, Slot, TimingSlot};
use crate::utils::document::{selector, text_of, trimmed_text};
use crate::utils::semester::{normalize_semester, semester_header_re};

// Column layout of a semester table row.
const COL_STATUS: usize = 0;
const COL_CODE: usize = 1;
const COL_PRE_REQUISITE: usize = 2;
const COL_CREDITS: usize = 3;
const COL_NAME: usize = 4;
const COL_GRADE: usize = 5;
const COL_FACULTY: usize = 6;
const COL_TIMINGS: usize = 7;

const GRADE_PENDING: &str = "To be taken";
const FACULTY_IN_PROGRESS: &str = "In Progress";
const FACULTY_PRE_REQUISITE_PENDING: &str = "Pre Requisite not cleared";

// Parses a comma-separated list of "Day Start End [Room]" slots.
pub fn parse_timings(raw: &str) -> Vec<TimingSlot> {
    raw.split(',')
        .map(|slot| {
            let parts: Vec<&str> = slot.split_whitespace().collect();
            match parts.len() {
                n if n >= 4 => TimingSlot {
                    day: parts[0].to_string(),
                    start_time: parts[1].to_string(),
                    end_time: parts[2].to_string(),
                    room: parts[3].to_string(),
                },
                3 => TimingSlot {
                    day: parts[0].to_string(),
                    start_time: parts[1].to_string(),
                    end_time: parts[2].to_string(),
                    room: String::new(),
                },
                _ => TimingSlot::default(),
            }
        })
        .filter(|timing| !timing.is_empty())
        .collect()
}

// Reads the leading number of a credits cell ("3", "3.0", "3 (2+1)"), 0 otherwise.
fn parse_credits(number_re: &Regex, raw: &str) -> f64 {
    number_re
        .find(raw.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

// Status markers in check order; a later match overrides an earlier one.
fn status_markers() -> [(Selector, CourseStatus); 4] {
    [
        (selector(r#"img[src*="tick.png"]"#), CourseStatus::Cleared),
        (selector(r#"img[src*="lock2.png"]"#), CourseStatus::Locked),
        (selector(r#"img[src*="cross.png"]"#), CourseStatus::NotOffered),
        (selector(r#"input[type="checkbox"]"#), CourseStatus::Available),
    ]
}

fn row_status(markers: &[(Selector, CourseStatus)], cell: ElementRef) -> CourseStatus {
    let mut status = CourseStatus::Unknown;
    for (marker, marker_status) in markers {
        if cell.select(marker).next().is_some() {
            status = *marker_status;
        }
    }
    status
}

// Extracts the data rows of one inner semester table. The first row is the column header.
pub fn parse_semester_rows(rows: &[ElementRef], semester: &str) -> Vec<CourseRow> {
    let td_selector = selector("td");
    let checkbox_selector = selector(r#"input[type="checkbox"]"#);
    let markers = status_markers();
    let number_re = Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").unwrap();

    rows.iter()
        .skip(1)
        .filter_map(|tr| {
            let tds: Vec<_> = tr.select(&td_selector).collect();
            let status_cell = tds.get(COL_STATUS).copied()?;
            let column = |i: usize| tds.get(i).map(|td| trimmed_text(*td)).unwrap_or_default();

            Some(CourseRow {
                semester: semester.to_string(),
                status: row_status(&markers, status_cell),
                input_id: status_cell
                    .select(&checkbox_selector)
                    .next()
                    .and_then(|input| input.value().attr("id"))
                    .map(str::to_string),
                course_code: column(COL_CODE),
                pre_requisite: column(COL_PRE_REQUISITE),
                credits: parse_credits(&number_re, &column(COL_CREDITS)),
                course_name: column(COL_NAME),
                grade: column(COL_GRADE),
                faculty_name: column(COL_FACULTY),
                timings: parse_timings(&column(COL_TIMINGS)),
            })
        })
        .collect()
}

// Rows of every table nested in a semester table, in document order, each row once.
fn inner_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let tr_selector = selector("tr");
    let mut seen = Vec::new();
    let mut rows = Vec::new();
    for inner in table.select(&selector("table")) {
        for tr in inner.select(&tr_selector) {
            if !seen.contains(&tr.id()) {
                seen.push(tr.id());
                rows.push(tr);
            }
        }
    }
    rows
}

// Scans every `table.tableStyle` and collects its course rows, in table then row order.
pub fn parse_course_rows(document: &Html) -> Vec<CourseRow> {
    let header_selector = selector("tr.tableHeaderStyle td");
    let semester_re = semester_header_re();
    let mut courses = Vec::new();

    for table in document.select(&selector("table.tableStyle")) {
        let header: String = table.select(&header_selector).map(text_of).collect();
        let semester = normalize_semester(&semester_re, header.trim());

        let rows = inner_rows(table);
        if rows.is_empty() {
            continue;
        }

        let semester_courses: Vec<_> = parse_semester_rows(&rows, &semester)
            .into_iter()
            .filter(|course| !course.course_code.is_empty())
            .collect();
        log::debug!("{}: {} course rows", semester, semester_courses.len());
        courses.extend(semester_courses);
    }

    courses
}

fn pre_requisites(raw: &str) -> Vec<String> {
    if raw.is_empty() || raw == "-" {
        vec!["None".to_string()]
    } else {
        raw.split('\n').map(str::to_string).collect()
    }
}

// Merges rows sharing a course code. The first row of a code supplies the course
// details, every row contributes one slot.
pub fn group_courses(rows: Vec<CourseRow>) -> Vec<CourseGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<CourseGroup> = Vec::new();

    for row in rows {
        let slot = Slot {
            input_id: row.input_id,
            timings: row.timings,
            faculty_name: row.faculty_name.clone(),
            status: row.status,
        };

        if let Some(&i) = index.get(&row.course_code) {
            groups[i].slots.push(slot);
            continue;
        }

        let status = match (row.status, row.faculty_name.as_str()) {
            (CourseStatus::Unknown, FACULTY_IN_PROGRESS) => CourseStatus::InProgress,
            (CourseStatus::Unknown, FACULTY_PRE_REQUISITE_PENDING) => CourseStatus::PrerequisitesNotCleared,
            (status, _) => status,
        };

        index.insert(row.course_code.clone(), groups.len());
        groups.push(CourseGroup {
            name: row.course_name,
            course_code: row.course_code,
            status,
            pre_requisites: pre_requisites(&row.pre_requisite),
            credits: row.credits,
            slots: vec![slot],
            grade: if row.grade == GRADE_PENDING { "N/A".to_string() } else { row.grade },
            semester: row.semester,
        });
    }

    groups
}
