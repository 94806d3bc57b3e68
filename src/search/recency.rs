// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Recency (date restriction) filter
//!
//! A recency filter is a period letter followed by an age, e.g. `d7`
//! (last 7 days), `w1` (last week), `m3` (last 3 months), `y1` (last year).
//! Only the shape is checked here; the search index interprets the value.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use super::types::SearchError;

fn recency_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[dwmy][1-9][0-9]{0,3}$").expect("static regex"))
}

/// Unit of a recency filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecencyPeriod {
    Days,
    Weeks,
    Months,
    Years,
}

/// A syntactically valid recency filter
///
/// Keeps the original text so it is forwarded to the index unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recency {
    raw: String,
    period: RecencyPeriod,
    age: u32,
}

impl Recency {
    /// Parse and validate a recency string such as `w1` or `m3`
    pub fn parse(value: &str) -> Result<Self, SearchError> {
        if !recency_pattern().is_match(value) {
            return Err(SearchError::InvalidRecency {
                value: value.to_string(),
            });
        }

        let period = match &value[..1] {
            "d" => RecencyPeriod::Days,
            "w" => RecencyPeriod::Weeks,
            "m" => RecencyPeriod::Months,
            _ => RecencyPeriod::Years,
        };
        let age = value[1..].parse().map_err(|_| SearchError::InvalidRecency {
            value: value.to_string(),
        })?;

        Ok(Self {
            raw: value.to_string(),
            period,
            age,
        })
    }

    /// The value as sent in the `dateRestrict` parameter
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn period(&self) -> RecencyPeriod {
        self.period
    }

    pub fn age(&self) -> u32 {
        self.age
    }
}

impl FromStr for Recency {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Recency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
