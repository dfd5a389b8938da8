use crate::lexer::SourceLine;

/// Carve the body that starts at `start` out of `lines`.
///
/// Lines belong to the body while they are blank or indented deeper than
/// `parent_indent`. Returns the body and the index of the first line after
/// it. The same rule serves `for`, `if` and `else` bodies.
pub fn extract_block<'l, 'a>(
    lines: &'l [SourceLine<'a>],
    start: usize,
    parent_indent: usize,
) -> (&'l [SourceLine<'a>], usize) {
    let start = start.min(lines.len());
    let len = lines[start..]
        .iter()
        .take_while(|line| line.is_blank() || line.indent() > parent_indent)
        .count();
    let end = start + len;
    (&lines[start..end], end)
}
