//! Locale tags identifying language profiles
//!
//! A tag has the shape `language[-Script][-REGION]`, e.g. `de`, `zh-Hant`,
//! `pt-BR` or `sr-Latn-RS`. Profiles, frequency tables and detection results
//! are keyed by [`Locale`]; the cross-validation harness compares only the
//! language part.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors produced while parsing a locale tag
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Invalid locale tag: {0:?} (expected language[-Script][-REGION], e.g. de, zh-Hant, pt-BR)")]
    Invalid(String),
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<lang>[a-z]{2,3})(?:[-_](?P<script>[A-Z][a-z]{3}))?(?:[-_](?P<region>[A-Z]{2}|[0-9]{3}))?$")
            .expect("locale pattern is valid")
    })
}

/// Identifies the language (and optionally script and region) of a profile
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    language: String,
    script: Option<String>,
    region: Option<String>,
}

impl Locale {
    /// Parse a locale tag
    ///
    /// # Example
    /// ```
    /// use langgram::Locale;
    ///
    /// let locale = Locale::parse("sr-Latn-RS").unwrap();
    /// assert_eq!(locale.language(), "sr");
    /// assert_eq!(locale.script(), Some("Latn"));
    /// assert_eq!(locale.region(), Some("RS"));
    /// assert_eq!(locale.to_string(), "sr-Latn-RS");
    /// ```
    pub fn parse(tag: &str) -> Result<Self, LocaleError> {
        let caps = tag_pattern()
            .captures(tag.trim())
            .ok_or_else(|| LocaleError::Invalid(tag.to_string()))?;

        Ok(Self {
            language: caps["lang"].to_string(),
            script: caps.name("script").map(|m| m.as_str().to_string()),
            region: caps.name("region").map(|m| m.as_str().to_string()),
        })
    }

    /// The ISO 639 language code
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The ISO 15924 script code, if any
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// The region code, if any
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// True when both locales share the same language, ignoring script and region
    pub fn same_language(&self, other: &Locale) -> bool {
        self.language == other.language
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language)?;
        if let Some(script) = &self.script {
            write!(f, "-{}", script)?;
        }
        if let Some(region) = &self.region {
            write!(f, "-{}", region)?;
        }
        Ok(())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Locale::parse(&tag).map_err(serde::de::Error::custom)
    }
}
