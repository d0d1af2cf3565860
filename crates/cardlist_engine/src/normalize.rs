use crate::CardTable;

const SLASH_SEPARATOR: &str = " / ";

/// Simplify column names in two passes.
///
/// The slash pass runs over every header before the whitespace pass, so
/// `"Cost / Potion"` becomes `"Cost"` and `"Set Name"` becomes `"Set"`.
pub fn normalize_headers(headers: &[String]) -> Vec<String> {
    let sliced: Vec<String> = headers.iter().map(|h| before_slash(h)).collect();
    sliced.iter().map(|h| first_word(h)).collect()
}

/// Both rules applied to a single header.
pub fn normalize_header(header: &str) -> String {
    first_word(&before_slash(header))
}

impl CardTable {
    /// Replace the headers with their normalized form; rows are untouched.
    pub fn normalize_headers(&mut self) {
        self.headers = normalize_headers(&self.headers);
    }
}

fn before_slash(header: &str) -> String {
    match header.split_once(SLASH_SEPARATOR) {
        Some((head, _)) => head.to_string(),
        None => header.to_string(),
    }
}

fn first_word(header: &str) -> String {
    if header.chars().any(char::is_whitespace) {
        header.split_whitespace().next().unwrap_or_default().to_string()
    } else {
        header.to_string()
    }
}
