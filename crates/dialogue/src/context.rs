//! Per-session dialogue context
//!
//! One instance per conversation, owned by the adapter's session
//! store and mutated only by the turn resolver. The two awaiting
//! flags are mutually exclusive; the resolver's branch ordering
//! keeps them so.

use serde::{Deserialize, Serialize};

/// Mandi price slots collected across turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MandiSlots {
    pub crop_name: Option<String>,
    pub mandi_location: Option<String>,
}

impl MandiSlots {
    pub fn is_empty(&self) -> bool {
        self.crop_name.is_none() && self.mandi_location.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.crop_name.is_some() && self.mandi_location.is_some()
    }
}

/// Mutable state of one conversation session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueContext {
    /// The last reply asked "which place?" — the next turn is taken
    /// verbatim as a weather location.
    pub awaiting_weather_location: bool,
    /// A mandi price question is still missing at least one slot.
    pub awaiting_mandi_info: bool,
    /// Slots already pinned for the open mandi conversation.
    pub pending_mandi: MandiSlots,
}

impl DialogueContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// No slot-filling conversation is open.
    pub fn is_fresh(&self) -> bool {
        !self.awaiting_weather_location && !self.awaiting_mandi_info
    }

    /// Clear all fields; used on exit commands and conversation ends.
    pub fn clear(&mut self) {
        self.awaiting_weather_location = false;
        self.awaiting_mandi_info = false;
        self.pending_mandi = MandiSlots::default();
    }
}
