use pretty_assertions::assert_eq;

use super::*;

fn spans(source: &str) -> Vec<Range<u32>> {
    fold_regions(source, KeywordSet::terramate())
        .into_iter()
        .map(|region| region.span)
        .collect()
}

#[test]
fn multi_line_block_folds() {
    let source = "stack {\n  name = \"a\"\n}";
    let regions = fold_regions(source, KeywordSet::terramate());
    assert_eq!(
        regions,
        vec![FoldRegion {
            span: 6..22,
            placeholder: "{...}",
            collapsed_by_default: false,
        }]
    );
}

#[test]
fn single_line_block_does_not_fold() {
    assert!(spans("stack { name = \"a\" }").is_empty());
}

#[test]
fn nested_blocks_fold_independently() {
    let source = "globals {\n  map {\n    x = 1\n  }\n  y { }\n}\n";
    assert_eq!(spans(source), vec![8..41, 16..31]);
}

#[test]
fn brackets_do_not_fold() {
    assert!(spans("x = [\n  1\n]\ny = (\n 2\n)").is_empty());
}

#[test]
fn unmatched_braces_do_not_fold() {
    assert!(spans("stack {\n").is_empty());
    assert!(spans("}\n}").is_empty());
}

#[test]
fn newline_inside_string_counts() {
    assert_eq!(spans("a {\"\n\"}"), vec![2..7]);
}
