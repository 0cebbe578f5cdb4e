//! Filter types exchanged with the background process

use serde::{Deserialize, Serialize};
use std::fmt;

/// Metadata of a custom filter list as parsed by the background process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub version: Option<String>,
    pub expires: Option<String>,
    pub time_updated: Option<String>,
    /// File name or URL the list was loaded from
    pub source: Option<String>,
    pub rules_count: usize,
}

/// Raw text of a filter list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterContent(String);

impl FilterContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Number of non-empty, non-comment lines
    pub fn rule_lines(&self) -> usize {
        self.0
            .lines()
            .filter(|line| {
                let line = line.trim();
                !line.is_empty() && !line.starts_with('!')
            })
            .count()
    }
}

impl From<String> for FilterContent {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for FilterContent {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl fmt::Display for FilterContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated custom filter, ready to be subscribed to
#[derive(Debug, Clone, PartialEq)]
pub struct CustomFilter {
    pub info: FilterInfo,
    pub content: FilterContent,
}
