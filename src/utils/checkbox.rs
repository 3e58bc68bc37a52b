use scraper::Html;
use crate::utils::document::selector;

// Ids of every checked checkbox, in document order. Checkboxes without an id are skipped.
pub fn selected_course_ids(document: &Html) -> Vec<String> {
    document
        .select(&selector(r#"input[type="checkbox"][checked]"#))
        .filter_map(|input| input.value().attr("id"))
        .map(str::to_string)
        .collect()
}
