//! Knowledge tables for Krishi Mitra
//!
//! Three read-only JSON tables back the assistant: crop advisory,
//! mandi (market) prices, and government schemes. They are loaded once
//! at startup; a missing or unreadable file degrades that intent
//! family instead of failing the process.
//!
//! The [`KnowledgeIndex`] is the derived, immutable view the rule
//! classifier and slot-filling logic match against.

pub mod index;
pub mod loader;
pub mod tables;

pub use index::KnowledgeIndex;
pub use loader::KnowledgeBase;
pub use tables::{CropInfo, FertilizerInfo, PriceEntry, Scheme};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
