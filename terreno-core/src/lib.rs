//! TERRENO Core - domain types for the landing application
//!
//! This crate holds the data model shared by the storage and web layers:
//! the `Prospect` lead record, the visitor `Language`, the property content
//! shown on the landing page, and the error taxonomy.

pub mod error;
pub mod property;
pub mod prospect;

pub use error::{ConfigError, StorageError, StoreError, ValidationError};
pub use property::{PropertyCopy, PropertyListing};
pub use prospect::{Language, NewProspect, Prospect, DEFAULT_SOURCE};
