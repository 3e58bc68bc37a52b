use scraper::Html;
use crate::models::StudentInfo;
use crate::utils::document::{selector, text_of, trimmed_text};

const INFO_LABELS: [&str; 6] = [
    "Name",
    "Reg. Number",
    "Program",
    "Credit Hours Completed",
    "Credit Hours Required",
    "Credit Hours Remaining",
];

// Drops the first colon of a label cell and trims it.
fn clean_label(raw: &str) -> String {
    raw.replacen(':', "", 1).trim().to_string()
}

// Reads the labelled fields of the `#gpaInfo` table. A missing table gives an empty map.
pub fn parse_student_info(document: &Html) -> StudentInfo {
    let mut info = StudentInfo::new();
    let Some(table) = document.select(&selector("#gpaInfo")).next() else {
        log::debug!("No #gpaInfo table in document");
        return info;
    };

    let tr_selector = selector("tr");
    let td_selector = selector("td");
    for tr in table.select(&tr_selector) {
        let tds: Vec<_> = tr.select(&td_selector).collect();
        if tds.len() < 2 {
            continue;
        }

        let label = clean_label(&text_of(tds[0]));
        if INFO_LABELS.contains(&label.as_str()) {
            info.insert(label, trimmed_text(tds[1]));
        }

        // Some rows carry a second label/value pair in columns 2 and 3.
        if tds.len() == 4 {
            let extra = text_of(tds[2]);
            if extra.contains("Credit Hours") {
                info.insert(clean_label(&extra), trimmed_text(tds[3]));
            }
        }
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::document::load;

    #[test]
    fn missing_info_table_yields_empty_map() {
        let document = load("<html><body><table><tr><td>Name:</td><td>Ali</td></tr></table></body></html>").unwrap();
        assert!(parse_student_info(&document).is_empty());
    }

    #[test]
    fn reads_whitelisted_and_paired_labels() {
        let html = r#"
            <table id="gpaInfo">
                <tr><td>Name:</td><td>  Ali Khan </td></tr>
                <tr><td>Reg. Number:</td><td>1234-FET/BSEE/F20</td></tr>
                <tr><td>Credit Hours Completed:</td><td>98</td><td>Credit Hours In Progress:</td><td> 18 </td></tr>
                <tr><td>CGPA:</td><td>3.1</td></tr>
                <tr><td>Program</td></tr>
            </table>"#;
        let info = parse_student_info(&load(html).unwrap());

        assert_eq!(info.len(), 4);
        assert_eq!(info["Name"], "Ali Khan");
        assert_eq!(info["Reg. Number"], "1234-FET/BSEE/F20");
        assert_eq!(info["Credit Hours Completed"], "98");
        assert_eq!(info["Credit Hours In Progress"], "18");
        assert!(!info.contains_key("CGPA"));
    }

    #[test]
    fn four_cell_row_without_credit_hours_label_is_ignored() {
        let html = r#"<table id="gpaInfo"><tr><td>Program:</td><td>BSEE</td><td>Batch:</td><td>F20</td></tr></table>"#;
        let info = parse_student_info(&load(html).unwrap());
        assert_eq!(info.len(), 1);
        assert_eq!(info["Program"], "BSEE");
    }
}
