//! Expression evaluator.
//!
//! Expressions are plain text. Rules are tried in a fixed order and the
//! first that applies wins: quoted literal, variable, number, then the
//! operators `+`, `-`, `*`, `/`, each checked by a substring scan. There is
//! no precedence and no parenthesis handling: `2 + 3 * 4` splits on `+`
//! first and evaluates `3 * 4` as one operand, while `2 * 3 + 4` does the
//! same the other way round.

use tracing::trace;

use crate::error::{RunError, RunResult};
use crate::scope::EffectiveScope;
use crate::value::{self, Value};

/// Evaluate `expression` against the bindings visible to the current line.
pub fn evaluate(expression: &str, scope: &EffectiveScope<'_>) -> RunResult<Value> {
    let expr = expression.trim();
    trace!(expr, "evaluate");

    if let Some(text) = string_literal(expr) {
        return Ok(Value::Str(text.to_string()));
    }
    if let Some(bound) = scope.get(expr) {
        return Ok(bound.clone());
    }
    if let Some(n) = value::numeric_literal(expr) {
        return Ok(Value::Number(n));
    }

    if expr.contains('+') {
        eval_add(expr, scope)
    } else if expr.contains('-') {
        eval_sub(expr, scope)
    } else if expr.contains('*') {
        eval_mul(expr, scope)
    } else if expr.contains('/') {
        eval_div(expr, scope)
    } else {
        Err(RunError::Name {
            name: expr.to_string(),
        })
    }
}

/// Text between matching outer quotes, if the inner text does not contain
/// that quote again. `'a' + 'b'` is therefore two literals joined by `+`,
/// not one literal.
fn string_literal(expr: &str) -> Option<&str> {
    ['\'', '"'].into_iter().find_map(|quote| {
        let inner = expr.strip_prefix(quote)?.strip_suffix(quote)?;
        (!inner.contains(quote)).then_some(inner)
    })
}

/// Split on every `op` and evaluate each operand.
fn operands(expr: &str, op: char, scope: &EffectiveScope<'_>) -> RunResult<Vec<Value>> {
    expr.split(op).map(|part| evaluate(part, scope)).collect()
}

/// Numeric sum when every operand is number-like, otherwise concatenation.
fn eval_add(expr: &str, scope: &EffectiveScope<'_>) -> RunResult<Value> {
    let values = operands(expr, '+', scope)?;
    if values.iter().all(Value::is_number_like) {
        let sum = values.iter().fold(0.0, |acc, v| acc + v.to_number());
        Ok(Value::Number(sum))
    } else {
        Ok(Value::Str(values.iter().map(Value::to_string).collect()))
    }
}

fn eval_sub(expr: &str, scope: &EffectiveScope<'_>) -> RunResult<Value> {
    let values = operands(expr, '-', scope)?;
    if !values.iter().all(Value::is_number_like) {
        return Err(RunError::Type { op: '-' });
    }
    let diff = values
        .iter()
        .map(Value::to_number)
        .reduce(|acc, n| acc - n)
        .unwrap_or(0.0);
    Ok(Value::Number(diff))
}

/// Non-numeric operands become NaN rather than failing.
fn eval_mul(expr: &str, scope: &EffectiveScope<'_>) -> RunResult<Value> {
    let values = operands(expr, '*', scope)?;
    let product = values.iter().fold(1.0, |acc, v| acc * v.to_number());
    Ok(Value::Number(product))
}

/// Only the second operand is checked for zero; later ones divide through
/// to an infinity.
fn eval_div(expr: &str, scope: &EffectiveScope<'_>) -> RunResult<Value> {
    let values = operands(expr, '/', scope)?;
    if values.get(1).map(Value::to_number) == Some(0.0) {
        return Err(RunError::ZeroDivision);
    }
    let quotient = values
        .iter()
        .map(Value::to_number)
        .reduce(|acc, n| acc / n)
        .unwrap_or(f64::NAN);
    Ok(Value::Number(quotient))
}
