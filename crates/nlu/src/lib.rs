//! Rule-based intent classification for Krishi Mitra
//!
//! Turns one raw Hindi utterance into an `NluResult`. Matching is
//! case-insensitive substring containment against ordered keyword
//! tables, evaluated in a fixed priority: help, weather, mandi price,
//! schemes, crop-detail families, fallback. The classifier is a total
//! function — every input, including the empty string, produces a
//! well-formed result.

pub mod classifier;
pub mod keywords;

pub use classifier::RuleClassifier;
