//! Content for the single listed property.
//!
//! The application sells exactly one property, so the listing is a constant
//! built at startup rather than a stored entity. Copy exists in both
//! languages; the web layer picks the variant for the session language.

use serde::{Deserialize, Serialize};

use crate::prospect::Language;

/// Localized marketing copy for the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyCopy {
    pub title: String,
    pub description: String,
}

/// The single listed property: bilingual copy, price, gallery and the
/// WhatsApp contact used for the deep link on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyListing {
    /// Stable label stamped onto every prospect captured for this listing.
    pub label: String,
    pub price: String,
    pub es: PropertyCopy,
    pub en: PropertyCopy,
    /// Gallery paths, served under `/static/`.
    pub images: Vec<String>,
    /// International format without the leading `+`, as `wa.me` expects.
    pub whatsapp_number: String,
}

impl PropertyListing {
    /// The Monterrico beach lots listing.
    pub fn monterrico() -> Self {
        Self {
            label: "monterrico-lotes".to_string(),
            price: "$26,700".to_string(),
            es: PropertyCopy {
                title: "Terrenos en Monterrico".to_string(),
                description: "Terrenos de 15x30mts2 a 400 mts de la playa, \
                    excelente inversion para airbnb o para casa de vacaciones. \
                    Acceso facil para conectar servicios y directo a carretera."
                    .to_string(),
            },
            en: PropertyCopy {
                title: "Lots in Monterrico".to_string(),
                description: "15x30 m\u{b2} lots located just 400 meters from \
                    the beach, an excellent investment for Airbnb or a vacation \
                    home. Easy access to utilities and direct connection to the \
                    main road."
                    .to_string(),
            },
            images: vec![
                "uploads/demo_casa1.jpg".to_string(),
                "uploads/demo_casa2.jpg".to_string(),
                "uploads/demo_casa3.jpg".to_string(),
            ],
            whatsapp_number: "50244851125".to_string(),
        }
    }

    /// Copy for the given language.
    pub fn copy(&self, language: Language) -> &PropertyCopy {
        match language {
            Language::Es => &self.es,
            Language::En => &self.en,
        }
    }

    /// `wa.me` deep link with a prefilled message in the visitor's language.
    pub fn whatsapp_link(&self, language: Language) -> String {
        let message = match language {
            Language::Es => format!("Hola, me interesa {}", self.es.title),
            Language::En => format!("Hi, I'm interested in {}", self.en.title),
        };
        format!(
            "https://wa.me/{}?text={}",
            self.whatsapp_number,
            urlencoding::encode(&message)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_follows_language() {
        let listing = PropertyListing::monterrico();
        assert_eq!(listing.copy(Language::Es).title, "Terrenos en Monterrico");
        assert_eq!(listing.copy(Language::En).title, "Lots in Monterrico");
    }

    #[test]
    fn test_whatsapp_link_encodes_message() {
        let listing = PropertyListing::monterrico();
        let link = listing.whatsapp_link(Language::Es);
        assert!(link.starts_with("https://wa.me/50244851125?text="));
        assert!(!link.contains(' '));
        assert!(link.contains("Monterrico"));
    }

    #[test]
    fn test_whatsapp_link_is_localized() {
        let listing = PropertyListing::monterrico();
        let es = listing.whatsapp_link(Language::Es);
        let en = listing.whatsapp_link(Language::En);
        assert_ne!(es, en);
        assert!(en.contains("Lots"));
    }
}
