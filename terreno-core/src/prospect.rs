//! Prospect (captured lead) types and the visitor language.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source tag recorded when the visitor arrived without a referral tag.
pub const DEFAULT_SOURCE: &str = "direct";

// ============================================================================
// LANGUAGE
// ============================================================================

/// Visitor language, carried in the session and stamped onto each prospect.
///
/// Only Spanish and English are recognized; Spanish is the default for a
/// fresh session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    /// Parse a language tag. Returns `None` for anything other than
    /// `es`/`en`; callers decide whether unknown tags are ignored or
    /// rejected (the session layer ignores them silently).
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "es" => Some(Language::Es),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PROSPECT
// ============================================================================

/// One captured lead from the contact form.
///
/// `id` and `created_at` are assigned by the store at insert time and never
/// change afterwards. Records are append-only: no exposed operation updates
/// or deletes an individual prospect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prospect {
    /// Store-assigned identifier, unique and monotonic, never reused.
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    /// Free-form acquisition tag, e.g. "direct" or a WhatsApp referral tag.
    pub source: String,
    /// Assigned by the store at insert time, not client-supplied.
    pub created_at: DateTime<Utc>,
    /// Label of the single listed property this lead is about.
    pub property_label: String,
    /// Session language at the moment of submission.
    pub language: Language,
}

/// Input for recording a new prospect. Everything the visitor controls,
/// plus the session language and the property the page is selling.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProspect {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    /// `None` falls back to [`DEFAULT_SOURCE`].
    pub source: Option<String>,
    pub language: Language,
    pub property_label: String,
}

impl NewProspect {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: None,
            source: None,
            language: Language::default(),
            property_label: String::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_property_label(mut self, label: impl Into<String>) -> Self {
        self.property_label = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse_recognized() {
        assert_eq!(Language::parse("es"), Some(Language::Es));
        assert_eq!(Language::parse("en"), Some(Language::En));
    }

    #[test]
    fn test_language_parse_unknown() {
        assert_eq!(Language::parse("fr"), None);
        assert_eq!(Language::parse(""), None);
        assert_eq!(Language::parse("ES"), None);
    }

    #[test]
    fn test_language_default_is_spanish() {
        assert_eq!(Language::default(), Language::Es);
    }

    #[test]
    fn test_language_serde_lowercase() {
        let json = serde_json::to_string(&Language::En).unwrap();
        assert_eq!(json, "\"en\"");
        let back: Language = serde_json::from_str("\"es\"").unwrap();
        assert_eq!(back, Language::Es);
    }

    #[test]
    fn test_new_prospect_builder() {
        let input = NewProspect::new("Ana Lopez", "50212345678")
            .with_source("whatsapp")
            .with_language(Language::Es)
            .with_property_label("monterrico-lotes");

        assert_eq!(input.name, "Ana Lopez");
        assert_eq!(input.phone, "50212345678");
        assert_eq!(input.email, None);
        assert_eq!(input.source.as_deref(), Some("whatsapp"));
        assert_eq!(input.language, Language::Es);
        assert_eq!(input.property_label, "monterrico-lotes");
    }
}
