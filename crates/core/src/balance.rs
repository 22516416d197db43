//! Brace and parenthesis balance check for generated files.
//!
//! This is a count, not a parser: brackets inside string literals are
//! counted too. Generated modules are written so the counts always agree.

use std::fmt;

/// Opening/closing counts for one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BalanceReport {
    pub open_braces: usize,
    pub close_braces: usize,
    pub open_parens: usize,
    pub close_parens: usize,
}

/// One unbalanced bracket pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceWarning {
    pub pair: &'static str,
    pub open: usize,
    pub close: usize,
}

impl fmt::Display for BalanceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unbalanced {}: {} opening vs {} closing",
            self.pair, self.open, self.close
        )
    }
}

impl BalanceReport {
    pub fn is_balanced(&self) -> bool {
        self.warnings().is_empty()
    }

    pub fn warnings(&self) -> Vec<BalanceWarning> {
        let mut warnings = Vec::new();
        if self.open_braces != self.close_braces {
            warnings.push(BalanceWarning {
                pair: "braces",
                open: self.open_braces,
                close: self.close_braces,
            });
        }
        if self.open_parens != self.close_parens {
            warnings.push(BalanceWarning {
                pair: "parentheses",
                open: self.open_parens,
                close: self.close_parens,
            });
        }
        warnings
    }
}

pub fn check_balance(text: &str) -> BalanceReport {
    text.chars().fold(BalanceReport::default(), |mut report, c| {
        match c {
            '{' => report.open_braces += 1,
            '}' => report.close_braces += 1,
            '(' => report.open_parens += 1,
            ')' => report.close_parens += 1,
            _ => {}
        }
        report
    })
}
