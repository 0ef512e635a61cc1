pub const BOOK_OPEN: &str = "<book>";
pub const BOOK_CLOSE: &str = "</book>";

pub const PARAGRAPH_OPEN: &str = "<para>";
pub const PARAGRAPH_CLOSE: &str = "</para>";

pub const SECTION_CLOSE: &str = "</section>";

pub const TITLE_OPEN: &str = "<title>";
pub const TITLE_CLOSE: &str = "</title>";

/// Opening section tag, carrying `xml:id` when an id is known.
pub fn section_open(id: Option<&str>) -> String {
    match id {
        Some(id) => format!(
            "<section xml:id=\"{}\">",
            html_escape::encode_double_quoted_attribute(id)
        ),
        None => "<section>".to_string(),
    }
}
