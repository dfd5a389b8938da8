use codequest_ast::span::Span;

/// One physical line of a program, borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    text: &'a str,
    number: u32,
}

impl<'a> SourceLine<'a> {
    pub fn new(text: &'a str, number: u32) -> Self {
        Self { text, number }
    }

    /// 1-based line number in the original program.
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn trimmed(&self) -> &'a str {
        self.text.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    /// Count of leading whitespace characters. Tabs count as one.
    pub fn indent(&self) -> usize {
        self.text.chars().take_while(|c| c.is_whitespace()).count()
    }

    pub fn span(&self) -> Span {
        Span {
            line: self.number,
            indent: u32::try_from(self.indent()).unwrap_or(u32::MAX),
        }
    }
}

/// Split a program into lines on `\n`.
///
/// A trailing `\r` stays on the line and disappears with trimming, so CRLF
/// sources classify the same as LF ones. An empty source yields one blank line.
pub fn split_lines(src: &str) -> Vec<SourceLine<'_>> {
    src.split('\n')
        .enumerate()
        .map(|(i, text)| SourceLine::new(text, u32::try_from(i + 1).unwrap_or(u32::MAX)))
        .collect()
}
