use duckypad_core::{ProfileIndex, PROFILE_INDEX_OFFSET};
use pretty_assertions::assert_eq;

const SAMPLE: &str = "1 Welcome
2 Firefox
3 Chrome
4 Foxhole
11 Foxhole-Ctrl
";

#[test]
fn test_parse_sample() {
    let index = ProfileIndex::parse(SAMPLE);
    assert_eq!(index.len(), 5);
    assert_eq!(index.ordinal_of("Welcome"), Some(1));
    assert_eq!(index.ordinal_of("Foxhole-Ctrl"), Some(11));
    assert_eq!(index.ordinal_of("Missing"), None);
}

#[test]
fn test_operand_uses_offset() {
    let index = ProfileIndex::parse(SAMPLE);
    assert_eq!(index.operand_of("Foxhole-Ctrl"), Some(11 - PROFILE_INDEX_OFFSET));
    assert_eq!(index.operand_of("Welcome"), Some(1 - PROFILE_INDEX_OFFSET));
}

#[test]
fn test_names_with_spaces() {
    let index = ProfileIndex::parse("1 My Cool Profile\n2   Spaced   Out  \n");
    assert!(index.contains("My Cool Profile"));
    assert!(index.contains("Spaced   Out"));
    assert_eq!(index.ordinal_of("Spaced   Out"), Some(2));
}

#[test]
fn test_malformed_lines_skipped() {
    let content = "\u{FEFF}1 Welcome\n\nnotanumber Foo\n0 Zero\n3\n  \n4 Last\n";
    let index = ProfileIndex::parse(content);
    let names: Vec<&str> = index.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Welcome", "Last"]);
}

#[test]
fn test_duplicate_keeps_first() {
    let index = ProfileIndex::parse("1 Dup\n2 Other\n3 Dup\n");
    assert_eq!(index.len(), 2);
    assert_eq!(index.ordinal_of("Dup"), Some(1));
}

#[test]
fn test_empty_index() {
    let index = ProfileIndex::parse("");
    assert!(index.is_empty());
    assert_eq!(index.operand_of("Anything"), None);
}
