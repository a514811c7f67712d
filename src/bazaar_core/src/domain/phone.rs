use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::user_error::UserError;

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone regex is valid"));

/// Phone number in E.164-like form: optional leading `+` and 7 to 15 digits.
///
/// Spaces, dashes and parentheses are stripped before validation so
/// `+1 (555) 010-2030` and `+15550102030` refer to the same number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, UserError> {
        let normalized: String = raw
            .as_ref()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect();

        if !PHONE_REGEX.is_match(&normalized) {
            return Err(UserError::InvalidPhone);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
