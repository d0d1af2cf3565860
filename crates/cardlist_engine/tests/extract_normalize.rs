use cardlist_engine::{
    build_table, decode_html, ClassTableExtractor, ExtractError, TableExtractor,
};
use pretty_assertions::assert_eq;

const CARD_PAGE: &str = r#"
<html><head><title>List of cards</title></head>
<body>
  <table class="navbox"><tr><th>Not this one</th></tr><tr><td>x</td></tr></table>
  <table class="wikitable sortable">
    <tr>
      <th>Name</th><th> Set / Edition </th><th>Types</th><th>Cost / Potion</th><th>Card Text</th>
    </tr>
    <tr>
      <td><a href="/Cellar">Cellar</a></td>
      <td>Base</td>
      <td>Action</td>
      <td data-sort-value="02"><span>$2</span></td>
      <td>+1 Action
        Discard any number of cards, then draw that many.</td>
    </tr>
    <tr></tr>
    <tr><th colspan="5">Intrigue</th></tr>
    <tr>
      <td>Courtyard</td><td>Intrigue</td><td>Action</td><td>  2  </td><td>+3 Cards</td>
    </tr>
    <tr><td>Stub</td><td>Promo</td></tr>
  </table>
</body></html>
"#;

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn extracts_first_matching_table() {
    let table = ClassTableExtractor::new("wikitable").extract(CARD_PAGE).unwrap();

    assert_eq!(
        table.headers,
        names(&["Name", "Set / Edition", "Types", "Cost / Potion", "Card Text"])
    );
    assert_eq!(table.rows.len(), 3);
    assert_eq!(
        table.rows[0],
        names(&[
            "Cellar",
            "Base",
            "Action",
            "02",
            "+1 Action\n        Discard any number of cards, then draw that many."
        ])
    );
    // No sort key: fall back to the trimmed text.
    assert_eq!(table.rows[1][3], "2");
    // Short rows survive untouched.
    assert_eq!(table.rows[2], names(&["Stub", "Promo"]));
    assert_eq!(table.ragged_row_count(), 1);
}

#[test]
fn sort_value_only_applies_to_fourth_cell() {
    let html = r#"<table class="wikitable">
        <tr><th>A</th><th>B</th><th>C</th><th>D</th><th>E</th></tr>
        <tr>
          <td data-sort-value="a1">a</td><td>b</td><td>c</td>
          <td data-sort-value="04">4</td><td data-sort-value="e9">e</td>
        </tr>
    </table>"#;
    let table = ClassTableExtractor::default().extract(html).unwrap();
    assert_eq!(table.rows, vec![names(&["a", "b", "c", "04", "e"])]);
}

#[test]
fn sort_value_is_used_raw() {
    let html = r#"<table class="wikitable">
        <tr><th>A</th><th>B</th><th>C</th><th>Cost</th></tr>
        <tr><td>a</td><td>b</td><td>c</td><td data-sort-value=" 05p ">5P</td></tr>
    </table>"#;
    let table = ClassTableExtractor::default().extract(html).unwrap();
    assert_eq!(table.rows[0][3], " 05p ");
}

#[test]
fn header_count_matches_th_cells_of_first_row() {
    let html = r#"<table class="wikitable">
        <tr><th>One</th><td>ignored</td><th>Two</th></tr>
        <tr><th>Three</th></tr>
    </table>"#;
    let table = ClassTableExtractor::default().extract(html).unwrap();
    assert_eq!(table.headers, names(&["One", "Two"]));
    assert!(table.rows.is_empty());
}

#[test]
fn missing_table_is_an_error() {
    let html = r#"<table class="navbox"><tr><th>A</th></tr></table>"#;
    let err = ClassTableExtractor::default().extract(html).unwrap_err();
    assert_eq!(
        err,
        ExtractError::TableNotFound {
            selector: "table.wikitable".to_string()
        }
    );
}

#[test]
fn table_without_rows_is_an_error() {
    let html = r#"<table class="wikitable"></table>"#;
    let err = ClassTableExtractor::default().extract(html).unwrap_err();
    assert!(matches!(err, ExtractError::MissingHeaderRow { .. }));
}

#[test]
fn blank_class_marker_is_rejected() {
    let err = ClassTableExtractor::new("  ").extract(CARD_PAGE).unwrap_err();
    assert!(matches!(err, ExtractError::InvalidSelector { .. }));
}

#[test]
fn multiple_classes_must_all_match() {
    let extractor = ClassTableExtractor::new("wikitable sortable");
    assert_eq!(extractor.table_selector().unwrap(), "table.wikitable.sortable");
    let table = extractor.extract(CARD_PAGE).unwrap();
    assert_eq!(table.headers[0], "Name");
}

#[test]
fn build_table_normalizes_headers_only() {
    let decoded = decode_html(CARD_PAGE.as_bytes(), Some("text/html; charset=utf-8"));
    let table = build_table(&decoded.html, &ClassTableExtractor::default()).unwrap();
    assert_eq!(table.headers, names(&["Name", "Set", "Types", "Cost", "Card"]));
    assert_eq!(table.rows[1][0], "Courtyard");
}

#[test]
fn decode_respects_charset_header() {
    let bytes = b"caf\xe9";
    let decoded = decode_html(bytes, Some("text/html; charset=ISO-8859-1"));
    assert_eq!(decoded.html, "café");
    assert_eq!(decoded.encoding_label, "windows-1252");
}

#[test]
fn decode_prefers_bom_over_header() {
    let bytes = b"\xEF\xBB\xBFhello";
    let decoded = decode_html(bytes, Some("text/html; charset=ISO-8859-1"));
    assert_eq!(decoded.html, "hello");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn cost_header_selects_the_sort_column() {
    let html = r#"<table class="wikitable">
        <tr><th>Name</th><th>Cost / Potion</th><th>D</th><th>E</th></tr>
        <tr><td>Village</td><td data-sort-value="03">3</td><td>x</td><td data-sort-value="9">y</td></tr>
    </table>"#;

    let by_header = ClassTableExtractor::default();
    assert_eq!(by_header.sort_column(&names(&["Name", "Cost / Potion", "D", "E"])), 1);
    let table = by_header.extract(html).unwrap();
    assert_eq!(table.rows[0], names(&["Village", "03", "x", "y"]));

    let positional = ClassTableExtractor::default().with_sort_header(None);
    let table = positional.extract(html).unwrap();
    assert_eq!(table.rows[0], names(&["Village", "3", "x", "9"]));
}

#[test]
fn decode_replaces_malformed_bytes_instead_of_failing() {
    let decoded = decode_html(b"ab\xc3", Some("text/html; charset=utf-8"));
    assert_eq!(decoded.html, "ab\u{FFFD}");
    assert_eq!(decoded.encoding_label, "UTF-8");
    assert!(decoded.lossy);

    let clean = decode_html(b"abc", Some("text/html; charset=utf-8"));
    assert!(!clean.lossy);
}

#[test]
fn unparseable_class_marker_is_rejected() {
    let err = ClassTableExtractor::new("1abc").extract(CARD_PAGE).unwrap_err();
    assert!(
        matches!(&err, ExtractError::InvalidSelector { selector, .. } if selector == "table.1abc"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn selector_syntax_inside_class_is_rejected() {
    for class in ["wiki.table", "wikitable#cards", "wikitable:first-child", "a>b"] {
        let err = ClassTableExtractor::new(class).extract(CARD_PAGE).unwrap_err();
        assert!(
            matches!(err, ExtractError::InvalidSelector { .. }),
            "class {class:?} gave {err:?}"
        );
    }
    assert!(ClassTableExtractor::new("wiki-table_2").table_selector().is_ok());
}

#[test]
fn cost_header_anywhere_overrides_fourth_position() {
    let html = r#"<table class="wikitable">
        <tr><th>Name</th><th>Cost</th><th>C</th><th>D</th></tr>
        <tr><td>Village</td><td data-sort-value="03">3</td><td>c</td><td data-sort-value="04">4</td></tr>
    </table>"#;
    let table = ClassTableExtractor::default().extract(html).unwrap();
    assert_eq!(table.rows[0], names(&["Village", "03", "c", "4"]));
}
