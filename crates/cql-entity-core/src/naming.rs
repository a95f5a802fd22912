// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Naming strategies for physical schema names.

use std::str::FromStr;

use convert_case::{Boundary, Case, Casing};
use serde::{Deserialize, Serialize};

/// Transformation from a logical name to a physical table or column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    /// `userName` becomes `user_name`.
    SnakeCase,
    /// `userName` becomes `"userName"`; all-lowercase names pass through.
    CaseSensitive,
    /// `userName` becomes `username`.
    #[default]
    LowerCase
}

impl NamingStrategy {
    /// Apply the strategy to a raw name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cql_entity_core::NamingStrategy;
    ///
    /// assert_eq!(NamingStrategy::SnakeCase.apply("userName"), "user_name");
    /// assert_eq!(NamingStrategy::CaseSensitive.apply("userName"), "\"userName\"");
    /// assert_eq!(NamingStrategy::CaseSensitive.apply("name"), "name");
    /// assert_eq!(NamingStrategy::LowerCase.apply("userName"), "username");
    /// ```
    #[must_use]
    pub fn apply(&self, raw: &str) -> String {
        match self {
            Self::SnakeCase => snake_case(raw),
            Self::CaseSensitive => {
                if raw.chars().any(char::is_uppercase) {
                    format!("\"{raw}\"")
                } else {
                    raw.to_string()
                }
            }
            Self::LowerCase => raw.to_lowercase()
        }
    }
}

/// Split camel-case tokens, lower-case them and join with single underscores.
///
/// Digits stay attached to the preceding token; only an upper-case letter
/// after a digit starts a new one.
fn snake_case(raw: &str) -> String {
    let converted = raw
        .remove_boundaries(&[Boundary::LowerDigit, Boundary::UpperDigit, Boundary::DigitLower])
        .to_case(Case::Snake);
    let mut out = String::with_capacity(converted.len());
    for c in converted.chars() {
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out
}

impl FromStr for NamingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "snake_case" | "snakecase" => Ok(Self::SnakeCase),
            "case_sensitive" | "casesensitive" => Ok(Self::CaseSensitive),
            "lower_case" | "lowercase" => Ok(Self::LowerCase),
            _ => Err(s.to_string())
        }
    }
}
