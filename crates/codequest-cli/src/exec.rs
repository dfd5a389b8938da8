//! Statement executor.
//!
//! Walks a list of source lines with a cursor, classifying each line as it
//! is reached and recursing into `for`/`if`/`else` bodies carved out by
//! indentation. Lines are classified only when executed, so a malformed line
//! in a branch that never runs does not fail the program.

use codequest_ast::ast::{CmpOp, Condition, RangeArgs, Stmt};
use codequest_parse::{classify, extract_block, split_lines, SourceLine};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

use crate::error::{ErrorKind, RunError, RunResult};
use crate::eval::evaluate;
use crate::scope::{self, BlockScope, EffectiveScope, GlobalScope};
use crate::value::{self, Value};

/// Per-run settings.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Upper bound on executed statements plus loop iterations; `None` runs
    /// to completion however long that takes.
    pub max_steps: Option<u64>,
}

impl RunConfig {
    pub fn with_max_steps(mut self, limit: u64) -> Self {
        self.max_steps = Some(limit);
        self
    }
}

/// Outcome of one run. Output is empty whenever `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    pub output: Vec<String>,
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl ExecutionResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl From<RunResult<Vec<String>>> for ExecutionResult {
    fn from(result: RunResult<Vec<String>>) -> Self {
        match result {
            Ok(output) => Self {
                output,
                error: None,
                kind: None,
            },
            Err(e) => Self {
                output: Vec::new(),
                error: Some(e.to_string()),
                kind: Some(e.kind()),
            },
        }
    }
}

/// Run a program with no step limit.
pub fn run(source: &str) -> ExecutionResult {
    run_with_config(source, &RunConfig::default())
}

pub fn run_with_config(source: &str, config: &RunConfig) -> ExecutionResult {
    execute(source, config).into()
}

/// Run a program and return its printed lines, or the error that stopped it.
pub fn execute(source: &str, config: &RunConfig) -> RunResult<Vec<String>> {
    let lines = split_lines(source);
    debug!(lines = lines.len(), max_steps = ?config.max_steps, "run start");

    let mut interp = Interpreter::new(config);
    let mut block = BlockScope::new();
    let result = interp.exec_block(&lines, &mut block);

    debug!(
        steps = interp.steps,
        globals = interp.globals.len(),
        ok = result.is_ok(),
        "run finished"
    );
    result.map(|()| interp.output)
}

/// How a body gets its block scope.
enum BodyScope<'s> {
    /// `if`/`else`: the enclosing block's own scope object
    Shared(&'s mut BlockScope),
    /// loop iteration: a fresh scope seeded with the loop variable
    Iteration(BlockScope),
}

struct Interpreter<'c> {
    globals: GlobalScope,
    output: Vec<String>,
    config: &'c RunConfig,
    steps: u64,
}

impl<'c> Interpreter<'c> {
    fn new(config: &'c RunConfig) -> Self {
        Self {
            globals: GlobalScope::new(),
            output: Vec::new(),
            config,
            steps: 0,
        }
    }

    /// Count one unit of work against the configured limit.
    fn tick(&mut self) -> RunResult<()> {
        self.steps += 1;
        match self.config.max_steps {
            Some(limit) if self.steps > limit => Err(RunError::StepLimit { limit }),
            _ => Ok(()),
        }
    }

    fn exec_block(&mut self, lines: &[SourceLine<'_>], block: &mut BlockScope) -> RunResult<()> {
        let mut cursor = 0;
        while cursor < lines.len() {
            let line = lines[cursor];
            cursor += 1;

            let stmt = classify(line.trimmed())?;
            if stmt == Stmt::Skip {
                continue;
            }
            self.tick()?;
            debug!(line = line.number(), kind = stmt.kind(), "exec");

            match stmt {
                Stmt::Skip => {}

                Stmt::Print { expr } => {
                    let value = evaluate(&expr, &EffectiveScope::new(block, &self.globals))?;
                    self.output.push(value.to_string());
                }

                Stmt::Assign { target, value } => {
                    let value = evaluate(&value, &EffectiveScope::new(block, &self.globals))?;
                    scope::write(&target, value, block, &mut self.globals);
                }

                Stmt::For { var, range } => {
                    let (body, next) = extract_block(lines, cursor, line.indent());
                    cursor = next;
                    self.exec_for(&var, range, body, block)?;
                }

                Stmt::If { cond } => {
                    let taken = self.eval_condition(&cond, block)?;
                    let (if_body, next) = extract_block(lines, cursor, line.indent());
                    cursor = next;

                    let mut else_body: &[SourceLine<'_>] = &[];
                    if let Some(candidate) = lines.get(cursor) {
                        if candidate.trimmed() == "else:" && candidate.indent() == line.indent() {
                            let (body, next) = extract_block(lines, cursor + 1, line.indent());
                            else_body = body;
                            cursor = next;
                        }
                    }

                    let body = if taken { if_body } else { else_body };
                    self.exec_body(body, BodyScope::Shared(&mut *block))?;
                }

                Stmt::Unrecognized { text } => {
                    return Err(RunError::UnsupportedSyntax { line: text });
                }
            }
        }
        Ok(())
    }

    fn exec_for(
        &mut self,
        var: &str,
        range: RangeArgs,
        body: &[SourceLine<'_>],
        block: &BlockScope,
    ) -> RunResult<()> {
        debug!(var, iterations = range.len(), body_lines = body.len(), "for");
        for j in range.start..range.end {
            self.tick()?;
            let scope = block.for_iteration(var, Value::Number(j as f64));
            self.exec_body(body, BodyScope::Iteration(scope))?;
        }
        Ok(())
    }

    fn exec_body(&mut self, body: &[SourceLine<'_>], scope: BodyScope<'_>) -> RunResult<()> {
        match scope {
            BodyScope::Shared(block) => self.exec_block(body, block),
            BodyScope::Iteration(mut fresh) => self.exec_block(body, &mut fresh),
        }
    }

    fn eval_condition(&self, cond: &Condition, block: &BlockScope) -> RunResult<bool> {
        let scope = EffectiveScope::new(block, &self.globals);
        let lhs = evaluate(&cond.lhs, &scope)?;
        let rhs = evaluate(&cond.rhs, &scope)?;
        let taken = apply_comparison(cond.op, &lhs, &rhs);
        debug!(%lhs, op = %cond.op, %rhs, taken, "if");
        Ok(taken)
    }
}

/// `==`/`!=` use loose equality; the others are false whenever the operands
/// are unordered (NaN).
fn apply_comparison(op: CmpOp, lhs: &Value, rhs: &Value) -> bool {
    let ord = value::compare(lhs, rhs);
    match op {
        CmpOp::Eq => value::loose_eq(lhs, rhs),
        CmpOp::Ne => !value::loose_eq(lhs, rhs),
        CmpOp::Gt => ord == Some(Ordering::Greater),
        CmpOp::Lt => ord == Some(Ordering::Less),
        CmpOp::Ge => matches!(ord, Some(Ordering::Greater | Ordering::Equal)),
        CmpOp::Le => matches!(ord, Some(Ordering::Less | Ordering::Equal)),
    }
}
