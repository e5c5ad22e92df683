//! Profile configuration.

use std::fmt;
use std::str::FromStr;

/// Output format of a rendered profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// Box-drawn tables separated by blank lines.
    #[default]
    Text,
    /// `<table>` elements joined with `<br>`.
    Html,
    /// Pretty-printed JSON of the profile fields.
    Json,
}

impl TableFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown table format '{other}'")),
        }
    }
}

/// Options for column profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileOptions {
    /// Most common values shown in the frequency table.
    pub freq_most: usize,
    /// Least common values shown in the frequency table.
    pub freq_least: usize,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            freq_most: 10,
            freq_least: 5,
        }
    }
}

impl ProfileOptions {
    #[must_use]
    pub fn with_freq_most(mut self, most: usize) -> Self {
        self.freq_most = most;
        self
    }

    #[must_use]
    pub fn with_freq_least(mut self, least: usize) -> Self {
        self.freq_least = least;
        self
    }
}
