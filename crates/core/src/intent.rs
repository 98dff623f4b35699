//! Intent and entity representation
//!
//! Intents form a closed enumeration; entities are a tagged union whose
//! shape follows the intent family. A crop name inside `Entities::Mandi`
//! may be a verbatim, unvalidated user string — the responder decides
//! what to do with unrecognized values.

use serde::{Deserialize, Serialize};

/// Closed set of user goals the classifier can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentTag {
    GetHelp,
    GetWeather,
    GetMandiPrice,
    AskSchemeInfo,
    AskCropSowingTime,
    AskCropGeneralInfo,
    AskCropPests,
    AskCropFertilizers,
    AskCropSoilType,
    AskCropIrrigation,
    Unknown,
}

impl IntentTag {
    /// Intents answered from the crop advisory table.
    pub fn is_crop_detail(&self) -> bool {
        matches!(
            self,
            IntentTag::AskCropSowingTime
                | IntentTag::AskCropGeneralInfo
                | IntentTag::AskCropPests
                | IntentTag::AskCropFertilizers
                | IntentTag::AskCropSoilType
                | IntentTag::AskCropIrrigation
        )
    }

    /// Stable identifier used in logs and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentTag::GetHelp => "get_help",
            IntentTag::GetWeather => "get_weather",
            IntentTag::GetMandiPrice => "get_mandi_price",
            IntentTag::AskSchemeInfo => "ask_scheme_info",
            IntentTag::AskCropSowingTime => "ask_crop_sowing_time",
            IntentTag::AskCropGeneralInfo => "ask_crop_general_info",
            IntentTag::AskCropPests => "ask_crop_pests",
            IntentTag::AskCropFertilizers => "ask_crop_fertilizers",
            IntentTag::AskCropSoilType => "ask_crop_soil_type",
            IntentTag::AskCropIrrigation => "ask_crop_irrigation",
            IntentTag::Unknown => "unknown",
        }
    }
}

/// Regional filter for scheme listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeFilter {
    Jharkhand,
    AllIndia,
}

/// Entities extracted from an utterance, shaped by the intent family.
///
/// `None` covers intents that carry no entities (help, unknown).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entities {
    None,
    Weather {
        /// `None` means the user asked about weather without naming a
        /// place — the signal for the location follow-up turn.
        location: Option<String>,
    },
    Mandi {
        crop_name: Option<String>,
        mandi_location: Option<String>,
    },
    Scheme {
        scheme_name: Option<String>,
        filter: Option<SchemeFilter>,
    },
    CropDetail {
        crop_name: String,
    },
}

impl Entities {
    pub fn empty_mandi() -> Self {
        Entities::Mandi {
            crop_name: None,
            mandi_location: None,
        }
    }
}

/// Result of classifying one utterance.
///
/// Invariant: `intent` is always set; text the rules cannot place
/// yields `IntentTag::Unknown` with `Entities::None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NluResult {
    pub intent: IntentTag,
    pub entities: Entities,
}

impl NluResult {
    pub fn new(intent: IntentTag, entities: Entities) -> Self {
        Self { intent, entities }
    }

    pub fn unknown() -> Self {
        Self {
            intent: IntentTag::Unknown,
            entities: Entities::None,
        }
    }
}
