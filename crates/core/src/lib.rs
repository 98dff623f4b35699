//! Core types for the Krishi Mitra dialogue engine
//!
//! This crate provides the types shared across all other crates:
//! - The closed intent enumeration and per-intent entity unions
//! - The NLU result handed from the classifier to the responder
//! - The weather collaborator trait and its snapshot type

pub mod intent;
pub mod weather;

pub use intent::{Entities, IntentTag, NluResult, SchemeFilter};
pub use weather::{WeatherError, WeatherProvider, WeatherSnapshot};
