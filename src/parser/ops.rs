//! Operator precedence and associativity table.
//!
//! The table is owned by a [`crate::parser::Parser`] instance, never global:
//! `defop` declarations extend the copy held by the parser that saw them, so
//! custom operators affect the remainder of that parse only.

use std::collections::HashMap;

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpInfo {
    pub precedence: u32,
    pub fixity: Fixity,
}

#[derive(Debug, Clone)]
pub struct OperatorTable {
    entries: HashMap<String, OpInfo>,
}

impl OperatorTable {
    /// Look up an operator by its lexeme. Lookup is by lexeme rather than
    /// token kind so that `,`, `->`, and identifier-named custom operators
    /// all participate in precedence climbing.
    pub fn lookup(&self, lexeme: &str) -> Option<OpInfo> {
        self.entries.get(lexeme).copied()
    }

    /// Register (or redefine) an operator, as `defop` does.
    pub fn define(&mut self, name: &str, precedence: u32, fixity: Fixity) {
        self.entries.insert(
            name.to_string(),
            OpInfo {
                precedence,
                fixity,
            },
        );
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        let fixed: &[(&str, u32, Fixity)] = &[
            ("+", 3, Fixity::Left),
            ("-", 3, Fixity::Left),
            ("*", 4, Fixity::Left),
            ("/", 4, Fixity::Left),
            ("^", 5, Fixity::Right),
            ("++", 3, Fixity::Left),
            ("==", 2, Fixity::Left),
            (">", 2, Fixity::Left),
            (">=", 2, Fixity::Left),
            ("<", 2, Fixity::Left),
            ("<=", 2, Fixity::Left),
            ("&&", 2, Fixity::Left),
            ("||", 2, Fixity::Left),
            ("::", 2, Fixity::Left),
            (":", 1, Fixity::Left),
            ("$", 1, Fixity::Left),
            (">>", 1, Fixity::Left),
            (">>=", 1, Fixity::Left),
            ("<$>", 1, Fixity::Left),
            (".", 1, Fixity::Left),
            (",", 1, Fixity::Left),
            ("->", 1, Fixity::Right),
        ];
        let entries = fixed
            .iter()
            .map(|&(name, precedence, fixity)| {
                (
                    name.to_string(),
                    OpInfo {
                        precedence,
                        fixity,
                    },
                )
            })
            .collect();
        Self { entries }
    }
}
