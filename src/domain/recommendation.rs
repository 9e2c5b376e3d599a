//! Recommendation output: one CK statement followed by one liver statement.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Ck,
    Liver,
}

impl StatementKind {
    pub fn label(self) -> &'static str {
        match self {
            StatementKind::Ck => "CK",
            StatementKind::Liver => "Liver",
        }
    }
}

/// A single guidance statement with its conditional follow-up clauses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub text: &'static str,
    pub follow_ups: &'static [&'static str],
}

impl Statement {
    pub const fn new(kind: StatementKind, text: &'static str) -> Self {
        Self {
            kind,
            text,
            follow_ups: &[],
        }
    }

    pub const fn with_follow_ups(
        kind: StatementKind,
        text: &'static str,
        follow_ups: &'static [&'static str],
    ) -> Self {
        Self {
            kind,
            text,
            follow_ups,
        }
    }

    /// Rendered with the kind label, e.g. `CK: Continue statin...`.
    pub fn labelled(&self) -> String {
        format!("{}: {}", self.kind.label(), self)
    }
}

/// Headline, then each follow-up on its own `- ` line.
impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)?;
        for clause in self.follow_ups {
            write!(f, "\n- {}", clause)?;
        }
        Ok(())
    }
}

/// Combined evaluation result. Field order is the rendering order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    ck: Statement,
    liver: Statement,
}

impl Recommendation {
    pub(crate) fn new(ck: Statement, liver: Statement) -> Self {
        debug_assert_eq!(ck.kind, StatementKind::Ck);
        debug_assert_eq!(liver.kind, StatementKind::Liver);
        Self { ck, liver }
    }

    pub fn ck(&self) -> &Statement {
        &self.ck
    }

    pub fn liver(&self) -> &Statement {
        &self.liver
    }

    pub fn statements(&self) -> [&Statement; 2] {
        [&self.ck, &self.liver]
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}", self.ck.labelled(), self.liver.labelled())
    }
}
