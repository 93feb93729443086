//! Rule records held by the matcher's candidate buckets.

use crate::error::Error;
use regex::Regex;

/// A single matching rule: the pattern as written, its compiled anchored
/// form, and the payload returned when the rule wins.
///
/// The compiled handle is always derived from `source` wrapped as
/// `\A(?:source)\z`, so a successful match spans the whole URL.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug)]
pub struct Rule {
    source: String,
    #[cfg_attr(feature = "serde", serde(with = "serde_regex"))]
    regex: Regex,
    payload: String,
}

impl Rule {
    /// Compiles `source` into a full-match rule carrying `payload`.
    pub fn new(source: &str, payload: &str) -> Result<Self, Error> {
        let regex = Regex::new(&format!(r"\A(?:{})\z", source))?;

        Ok(Rule {
            source: source.to_string(),
            regex,
            payload: payload.to_string(),
        })
    }

    /// Tests the rule against the whole of `url`.
    #[inline]
    pub fn full_match(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    /// The pattern exactly as it was supplied.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }
}
