use scraper::{ElementRef, Html, Selector};

use crate::normalize::normalize_header;
use crate::CardTable;

/// Class marker of the card list table on the wiki page.
pub const DEFAULT_TABLE_CLASS: &str = "wikitable";

/// Data cell position whose sort key replaces its visible text when no
/// header names the column.
pub const SORT_VALUE_COLUMN: usize = 3;

/// Normalized header naming the column whose sort key is kept.
pub const SORT_VALUE_HEADER: &str = "Cost";

pub const SORT_VALUE_ATTR: &str = "data-sort-value";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid table selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },
    #[error("no element matches `{selector}`")]
    TableNotFound { selector: String },
    #[error("table `{selector}` has no rows")]
    MissingHeaderRow { selector: String },
}

pub trait TableExtractor: Send + Sync {
    fn extract(&self, html: &str) -> Result<CardTable, ExtractError>;
}

/// Extracts the first `<table>` carrying every class in `class`.
///
/// - headers: the `th` cells of the first `tr`, trimmed
/// - rows: the `td` cells of every later `tr`, trimmed, except that the
///   sort column cell yields its raw `data-sort-value` when set
/// - rows without any `td` are skipped
///
/// The sort column is the first one whose normalized header equals the sort
/// header ([`SORT_VALUE_HEADER`] by default), else [`SORT_VALUE_COLUMN`].
/// A matching header at any position overrides position 3: with headers
/// `Name,Cost,C,D` column 1 takes its sort value and the 4th cell keeps its
/// text. Use `with_sort_header(None)` for the purely positional rule.
///
/// `class` is a whitespace separated list of plain class names; `.`, `#`,
/// `:` and other selector syntax inside a name is rejected.
#[derive(Debug, Clone)]
pub struct ClassTableExtractor {
    class: String,
    sort_header: Option<String>,
}

impl ClassTableExtractor {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            sort_header: Some(SORT_VALUE_HEADER.to_string()),
        }
    }

    /// Pick the sort column by header name; `None` pins it to [`SORT_VALUE_COLUMN`].
    pub fn with_sort_header(mut self, header: Option<String>) -> Self {
        self.sort_header = header;
        self
    }

    pub fn sort_column(&self, headers: &[String]) -> usize {
        self.sort_header
            .as_deref()
            .and_then(|name| headers.iter().position(|h| normalize_header(h) == name))
            .unwrap_or(SORT_VALUE_COLUMN)
    }

    pub fn table_selector(&self) -> Result<String, ExtractError> {
        let invalid = |message: String| ExtractError::InvalidSelector {
            selector: format!("table.{}", self.class.trim()),
            message,
        };
        let mut selector = String::from("table");
        for class in self.class.split_whitespace() {
            if let Some(c) = class.chars().find(|c| !is_class_char(*c)) {
                return Err(invalid(format!("`{c}` is not allowed in class `{class}`")));
            }
            selector.push('.');
            selector.push_str(class);
        }
        if selector.len() == "table".len() {
            return Err(invalid("empty class marker".into()));
        }
        Ok(selector)
    }
}

impl Default for ClassTableExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_CLASS)
    }
}

impl TableExtractor for ClassTableExtractor {
    fn extract(&self, html: &str) -> Result<CardTable, ExtractError> {
        let selector = self.table_selector()?;
        let table_sel = parse_selector(&selector)?;
        let tr_sel = parse_selector("tr")?;
        let th_sel = parse_selector("th")?;
        let td_sel = parse_selector("td")?;

        let doc = Html::parse_document(html);
        let table = doc
            .select(&table_sel)
            .next()
            .ok_or_else(|| ExtractError::TableNotFound {
                selector: selector.clone(),
            })?;

        let mut rows_iter = table.select(&tr_sel);
        let header_row = rows_iter
            .next()
            .ok_or(ExtractError::MissingHeaderRow { selector })?;

        let headers: Vec<String> = header_row.select(&th_sel).map(trimmed_text).collect();
        let sort_column = self.sort_column(&headers);

        let rows = rows_iter
            .map(|tr| {
                tr.select(&td_sel)
                    .enumerate()
                    .map(|(idx, td)| cell_value(td, idx == sort_column))
                    .collect::<Vec<_>>()
            })
            .filter(|row| !row.is_empty())
            .collect();

        Ok(CardTable::new(headers, rows))
    }
}

fn parse_selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|err| ExtractError::InvalidSelector {
        selector: css.to_string(),
        message: err.to_string(),
    })
}

fn is_class_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn cell_value(td: ElementRef<'_>, is_sort_column: bool) -> String {
    if is_sort_column {
        if let Some(sort_value) = td.value().attr(SORT_VALUE_ATTR) {
            return sort_value.to_string();
        }
    }
    trimmed_text(td)
}

fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
