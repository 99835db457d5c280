//! Comment toggling.
//!
//! New line comments use `#`. Uncommenting also recognises `//`, which the
//! scanner treats as an equivalent line comment.

pub const LINE_COMMENT_PREFIX: &str = "#";
pub const BLOCK_COMMENT_PREFIX: &str = "/*";
pub const BLOCK_COMMENT_SUFFIX: &str = "*/";

/// Line comment markers recognised when uncommenting, longest first.
const LINE_MARKERS: [&str; 2] = ["//", "#"];

fn split_indent(line: &str) -> (&str, &str) {
    let body = line.trim_start_matches([' ', '\t']);
    line.split_at(line.len() - body.len())
}

/// Comment out `line`, keeping its indentation. Blank lines are returned
/// unchanged.
pub fn comment_line(line: &str) -> String {
    let (indent, body) = split_indent(line);
    if body.trim().is_empty() {
        return line.to_owned();
    }
    format!("{indent}{LINE_COMMENT_PREFIX} {body}")
}

/// Strip the line comment marker from `line`, plus one following space.
///
/// Returns `None` if the line is not a line comment.
pub fn uncomment_line(line: &str) -> Option<String> {
    let (indent, body) = split_indent(line);
    let rest = LINE_MARKERS
        .iter()
        .find_map(|marker| body.strip_prefix(marker))?;
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    Some(format!("{indent}{rest}"))
}

pub fn is_line_comment(line: &str) -> bool {
    let (_, body) = split_indent(line);
    LINE_MARKERS.iter().any(|marker| body.starts_with(marker))
}

/// Toggle a group of lines: if every non-blank line is commented, uncomment
/// them all; otherwise comment them all.
pub fn toggle_lines<'a, I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: Clone,
{
    let lines = lines.into_iter();
    let all_commented = lines
        .clone()
        .filter(|line| !line.trim().is_empty())
        .all(is_line_comment);
    lines
        .map(|line| {
            if all_commented {
                uncomment_line(line).unwrap_or_else(|| line.to_owned())
            } else {
                comment_line(line)
            }
        })
        .collect()
}

/// Wrap `text` in a block comment.
pub fn comment_block(text: &str) -> String {
    format!("{BLOCK_COMMENT_PREFIX}{text}{BLOCK_COMMENT_SUFFIX}")
}
