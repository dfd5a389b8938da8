pub mod span {
    use serde::Serialize;

    /// Location of a source line: 1-based line number and leading-whitespace width.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
    pub struct Span {
        pub line: u32,
        pub indent: u32,
    }
}

pub mod ast {
    use serde::Serialize;

    /// One classified source line.
    ///
    /// Expressions are kept as raw text: the evaluator resolves them at run
    /// time against the scope that is live when the line executes.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub enum Stmt {
        /// Blank line or `#` comment
        Skip,
        /// `print(<expr>)`
        Print { expr: String },
        /// `<target> = <value>`
        Assign { target: String, value: String },
        /// `for <var> in range(<args>):`
        For { var: String, range: RangeArgs },
        /// `if <cond>:`
        If { cond: Condition },
        /// Anything else; executing it is a syntax error
        Unrecognized { text: String },
    }

    impl Stmt {
        /// Short name used in logs and `parse` output.
        pub fn kind(&self) -> &'static str {
            match self {
                Stmt::Skip => "skip",
                Stmt::Print { .. } => "print",
                Stmt::Assign { .. } => "assign",
                Stmt::For { .. } => "for",
                Stmt::If { .. } => "if",
                Stmt::Unrecognized { .. } => "unrecognized",
            }
        }
    }

    /// Half-open integer range `[start, end)`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub struct RangeArgs {
        pub start: i64,
        pub end: i64,
    }

    impl RangeArgs {
        /// Range that runs its body zero times.
        pub const EMPTY: RangeArgs = RangeArgs { start: 0, end: 0 };

        pub fn len(&self) -> u64 {
            if self.end > self.start {
                self.end.abs_diff(self.start)
            } else {
                0
            }
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    /// `<lhs> <op> <rhs>` as split out of an `if` line.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct Condition {
        pub lhs: String,
        pub op: CmpOp,
        pub rhs: String,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum CmpOp {
        Ge,
        Le,
        Eq,
        Ne,
        Gt,
        Lt,
    }

    impl CmpOp {
        /// Operators in the order they are tried at each position of a
        /// condition. Two-character forms come first so `>=` never splits
        /// as `>` followed by `=`.
        pub const SCAN_ORDER: [CmpOp; 6] = [
            CmpOp::Ge,
            CmpOp::Le,
            CmpOp::Eq,
            CmpOp::Ne,
            CmpOp::Gt,
            CmpOp::Lt,
        ];

        pub fn symbol(&self) -> &'static str {
            match self {
                CmpOp::Ge => ">=",
                CmpOp::Le => "<=",
                CmpOp::Eq => "==",
                CmpOp::Ne => "!=",
                CmpOp::Gt => ">",
                CmpOp::Lt => "<",
            }
        }
    }

    impl std::fmt::Display for CmpOp {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.symbol())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn range_len_is_zero_when_reversed() {
            assert_eq!(RangeArgs { start: 5, end: 2 }.len(), 0);
            assert!(RangeArgs { start: 3, end: 3 }.is_empty());
            assert_eq!(RangeArgs { start: -2, end: 3 }.len(), 5);
        }

        #[test]
        fn two_char_operators_scan_first() {
            let pos = |op: CmpOp| CmpOp::SCAN_ORDER.iter().position(|o| *o == op).unwrap();
            assert!(pos(CmpOp::Ge) < pos(CmpOp::Gt));
            assert!(pos(CmpOp::Le) < pos(CmpOp::Lt));
        }
    }
}
