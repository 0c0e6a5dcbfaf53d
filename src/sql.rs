//! Rendering of `INSERT IGNORE` seed statements for the `users` table.
//!
//! Every value placed inside a string literal goes through [`escape_literal`],
//! so an email containing quotes or backslashes cannot terminate the literal early.

use std::{borrow::Cow, fmt::Write as _};

use crate::status::UserState;

pub const PASSWORD_PLACEHOLDER: &str = "No password set";
pub const UPGRADE_COMMENT: &str = "This user was created during the upgrade to Stroom 6";
pub const CREATED_BY: &str = "transform_user_extract.py";

/// One row destined for the `users` table.
#[derive(Debug, Clone, Copy)]
pub struct InsertStatement<'a> {
    pub email: &'a str,
    pub state: UserState,
    pub created_on: &'a str,
}

impl InsertStatement<'_> {
    /// Appends the statement, terminated by a newline, to `out`.
    pub fn render_into(&self, out: &mut String) {
        // writing into a String cannot fail
        let _ = write!(
            out,
            "INSERT IGNORE INTO users (\n    \
             email, password_hash, state, comments, created_on, created_by_user)\n\
             VALUES ('{}', '{}', '{}',\n    \
             '{}',\n    \
             '{}', '{}');\n",
            escape_literal(self.email),
            escape_literal(PASSWORD_PLACEHOLDER),
            escape_literal(self.state.label()),
            escape_literal(UPGRADE_COMMENT),
            escape_literal(self.created_on),
            escape_literal(CREATED_BY),
        );
    }
}

/// Escapes `value` for use inside a single-quoted MySQL string literal.
pub fn escape_literal(value: &str) -> Cow<'_, str> {
    if !value.chars().any(needs_escape) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\0' => escaped.push_str("\\0"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{1a}' => escaped.push_str("\\Z"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

fn needs_escape(ch: char) -> bool {
    matches!(ch, '\\' | '\'' | '\0' | '\n' | '\r' | '\u{1a}')
}
