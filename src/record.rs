//! Parsing of a single extract row into a [`UserRecord`].
//!
//! Row-level failures are reported through [`RowError`]; they never abort a run.

use thiserror::Error;

use crate::status::UserState;

pub const EMAIL_COLUMN: usize = 0;
pub const STATUS_COLUMN: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub email: String,
    pub state: UserState,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("missing status column")]
    MissingStatus,
    #[error("invalid status code '{0}'")]
    InvalidStatus(String),
    #[error("unknown status code {0}")]
    UnknownStatus(i64),
}

impl UserRecord {
    /// Builds a record from the decoded fields of one data row.
    ///
    /// Only the first two fields are read; anything after the status column is ignored.
    pub fn from_fields(fields: &[String]) -> Result<Self, RowError> {
        if fields.len() <= STATUS_COLUMN {
            return Err(RowError::MissingStatus);
        }
        let state = parse_status(&fields[STATUS_COLUMN])?;
        Ok(Self {
            email: fields[EMAIL_COLUMN].clone(),
            state,
        })
    }
}

pub fn parse_status(raw: &str) -> Result<UserState, RowError> {
    let code = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| RowError::InvalidStatus(raw.to_string()))?;
    UserState::from_code(code).ok_or(RowError::UnknownStatus(code))
}
