use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a canonical review came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReviewSource {
    Tripadvisor,
    Google,
    Fallback,
}

impl ReviewSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewSource::Tripadvisor => "tripadvisor",
            ReviewSource::Google => "google",
            ReviewSource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for ReviewSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tripadvisor" => Ok(ReviewSource::Tripadvisor),
            "google" => Ok(ReviewSource::Google),
            "fallback" => Ok(ReviewSource::Fallback),
            other => Err(format!("Unknown review source: {}", other)),
        }
    }
}
