use scraper::{ElementRef, Html, Selector};
use crate::error::ScrapeError;

// Parses raw markup into a queryable tree. Parsing is permissive: broken or empty
// markup gives a partial tree rather than an error.
pub fn load(markup: &str) -> Result<Html, ScrapeError> {
    let document = Html::parse_document(markup);
    if !document.errors.is_empty() {
        log::debug!("Parsed document with {} recoverable errors", document.errors.len());
    }
    Ok(document)
}

// Compiles one of the crate's fixed selector strings.
pub fn selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap()
}

// Concatenated text of every descendant text node.
pub fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>()
}

pub fn trimmed_text(element: ElementRef) -> String {
    text_of(element).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_markup_loads_an_empty_tree() {
        let document = load("  \n ").unwrap();
        assert!(document.select(&selector("td")).next().is_none());
        assert!(document.select(&selector("html")).next().is_some());
    }

    #[test]
    fn malformed_markup_still_loads() {
        let document = load("<table><tr><td>Name:<td>Ali").unwrap();
        let cells: Vec<_> = document.select(&selector("td")).map(trimmed_text).collect();
        assert_eq!(cells, vec!["Name:", "Ali"]);
    }

    #[test]
    fn text_joins_nested_nodes() {
        let document = load("<div id=\"x\"><b>Semester</b> 1 <i>Code</i></div>").unwrap();
        let div = document.select(&selector("#x")).next().unwrap();
        assert_eq!(text_of(div), "Semester 1 Code");
    }
}
