//! Dialogue engine for Krishi Mitra
//!
//! Ties the rule classifier, the per-session context and reply
//! generation together. One [`TurnResolver::resolve_turn`] call per
//! user turn: it decides whether the text answers a pending slot or
//! is a fresh question, produces the reply, and updates the context
//! in place.
//!
//! Continuation across turns is driven by the structured
//! [`StillNeeds`] signal the responder returns next to each reply —
//! never by matching the reply prose.

pub mod context;
pub mod responder;
pub mod resolver;
pub mod templates;

pub use context::{DialogueContext, MandiSlots};
pub use resolver::{TurnOutcome, TurnResolver};
pub use responder::{ReplyOutcome, Responder, StillNeeds};
