use crate::error::ParseError;
use crate::lexer::{split_lines, SourceLine};
use codequest_ast::ast::{CmpOp, Condition, RangeArgs, Stmt};

/// A source line paired with its classification.
#[derive(Debug, Clone)]
pub struct ParsedLine<'a> {
    pub line: SourceLine<'a>,
    pub stmt: Result<Stmt, ParseError>,
}

/// Classify every line of `src` without executing anything.
///
/// Execution classifies lazily, line by line, so a malformed line inside a
/// body that never runs is not an error at run time. This listing reports
/// every line regardless.
pub fn parse_str(src: &str) -> Vec<ParsedLine<'_>> {
    split_lines(src)
        .into_iter()
        .map(|line| ParsedLine {
            line,
            stmt: classify(line.trimmed()),
        })
        .collect()
}

/// Classify one trimmed line.
///
/// Shapes are tried in a fixed order: skip, print, assignment, for, if.
/// The first match wins and anything left is `Stmt::Unrecognized`.
pub fn classify(line: &str) -> Result<Stmt, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Stmt::Skip);
    }
    if let Some(expr) = match_print(line) {
        return Ok(Stmt::Print {
            expr: expr.to_string(),
        });
    }
    if let Some((target, value)) = match_assign(line) {
        return Ok(Stmt::Assign {
            target: target.to_string(),
            value: value.to_string(),
        });
    }
    if let Some((var, args)) = match_for(line) {
        return Ok(Stmt::For {
            var: var.to_string(),
            range: parse_range(args)?,
        });
    }
    if let Some(cond) = match_if(line) {
        return Ok(Stmt::If {
            cond: split_condition(cond)?,
        });
    }
    Ok(Stmt::Unrecognized {
        text: line.to_string(),
    })
}

// ======= line shapes =======

/// `print(<expr>)`; the closing paren must end the line.
fn match_print(line: &str) -> Option<&str> {
    line.strip_prefix("print(")?.strip_suffix(')')
}

/// `<word> = <rest>`
fn match_assign(line: &str) -> Option<(&str, &str)> {
    let (name, rest) = split_word(line)?;
    let value = rest.trim_start().strip_prefix('=')?;
    Some((name, value.trim_start()))
}

/// `for <word> in range(<args>):`
fn match_for(line: &str) -> Option<(&str, &str)> {
    let rest = skip_ws1(line.strip_prefix("for")?)?;
    let (var, rest) = split_word(rest)?;
    let rest = skip_ws1(rest)?;
    let rest = skip_ws1(rest.strip_prefix("in")?)?;
    let args = rest.strip_prefix("range(")?.strip_suffix("):")?;
    Some((var, args))
}

/// `if <cond>:`
fn match_if(line: &str) -> Option<&str> {
    skip_ws1(line.strip_prefix("if")?)?.strip_suffix(':')
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Split a leading `[A-Za-z0-9_]+` run off `s`.
fn split_word(s: &str) -> Option<(&str, &str)> {
    let len = s.bytes().take_while(|b| is_word_byte(*b)).count();
    if len == 0 {
        return None;
    }
    Some(s.split_at(len))
}

/// Skip one or more whitespace characters.
fn skip_ws1(s: &str) -> Option<&str> {
    let rest = s.trim_start();
    (rest.len() < s.len()).then_some(rest)
}

// ======= range / condition =======

/// Parse the argument list of `range(...)`: `end` or `start, end`.
///
/// Only the argument count is an error. A bound with no integer prefix, such
/// as a variable name, or one that overflows `i64` yields an empty range.
pub fn parse_range(args: &str) -> Result<RangeArgs, ParseError> {
    if args.trim().is_empty() {
        return Err(ParseError::InvalidRange);
    }
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() > 2 {
        return Err(ParseError::InvalidRange);
    }
    let bounds = parts
        .iter()
        .map(|part| parse_int_prefix(part))
        .collect::<Option<Vec<i64>>>();
    Ok(match bounds.as_deref() {
        Some([end]) => RangeArgs { start: 0, end: *end },
        Some([start, end]) => RangeArgs {
            start: *start,
            end: *end,
        },
        _ => RangeArgs::EMPTY,
    })
}

/// Leading optionally-signed decimal integer; trailing text is ignored, so
/// `3.7` reads as 3.
fn parse_int_prefix(s: &str) -> Option<i64> {
    let digits_from = usize::from(s.starts_with(['+', '-']));
    let digits = s[digits_from..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    s[..digits_from + digits].parse().ok()
}

/// Split an `if` condition at the leftmost comparison operator.
///
/// The right operand runs up to the next operator, if any: `a < b < c`
/// compares `a` with `b` and drops the rest.
pub fn split_condition(cond: &str) -> Result<Condition, ParseError> {
    let (pos, op) = find_operator(cond).ok_or(ParseError::InvalidCondition)?;
    let lhs = &cond[..pos];
    let rest = &cond[pos + op.symbol().len()..];
    let rhs = match find_operator(rest) {
        Some((next, _)) => &rest[..next],
        None => rest,
    };
    Ok(Condition {
        lhs: lhs.trim().to_string(),
        op,
        rhs: rhs.trim().to_string(),
    })
}

fn find_operator(text: &str) -> Option<(usize, CmpOp)> {
    let bytes = text.as_bytes();
    (0..bytes.len()).find_map(|i| {
        CmpOp::SCAN_ORDER
            .into_iter()
            .find(|op| bytes[i..].starts_with(op.symbol().as_bytes()))
            .map(|op| (i, op))
    })
}
