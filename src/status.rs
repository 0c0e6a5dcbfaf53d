//! Legacy account status codes and the labels used by the new `users.state` column.

use std::fmt;

use serde::Serialize;

/// Account state as stored in the upgraded schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserState {
    Enabled,
    Disabled,
    Locked,
    Inactive,
}

impl UserState {
    pub const ALL: [UserState; 4] = [
        UserState::Enabled,
        UserState::Disabled,
        UserState::Locked,
        UserState::Inactive,
    ];

    /// Maps a legacy status code onto a state. Codes outside `0..=3` have no mapping.
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(UserState::Enabled),
            1 => Some(UserState::Disabled),
            2 => Some(UserState::Locked),
            3 => Some(UserState::Inactive),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            UserState::Enabled => "enabled",
            UserState::Disabled => "disabled",
            UserState::Locked => "locked",
            UserState::Inactive => "inactive",
        }
    }
}

impl fmt::Display for UserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_labels() {
        assert_eq!(UserState::from_code(0).map(UserState::label), Some("enabled"));
        assert_eq!(UserState::from_code(1).map(UserState::label), Some("disabled"));
        assert_eq!(UserState::from_code(2).map(UserState::label), Some("locked"));
        assert_eq!(UserState::from_code(3).map(UserState::label), Some("inactive"));
    }

    #[test]
    fn unknown_codes_have_no_mapping() {
        for code in [-1, 4, 9, 100, i64::MAX, i64::MIN] {
            assert_eq!(UserState::from_code(code), None, "code {code}");
        }
    }

    #[test]
    fn all_lists_states_in_code_order() {
        for (code, state) in UserState::ALL.into_iter().enumerate() {
            assert_eq!(UserState::from_code(code as i64), Some(state));
        }
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&UserState::Locked).unwrap();
        assert_eq!(json, "\"locked\"");
    }
}
