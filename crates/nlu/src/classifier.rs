//! The rule-based classifier
//!
//! Priority order matters: crop names co-occur with price, weather and
//! scheme vocabulary ("कानपुर मंडी में गेहूं का भाव"), so each family's
//! own keyword set gates entry into its branch before any entity
//! resolution runs. The crop-detail family goes last for exactly this
//! reason.

use std::sync::Arc;

use krishi_core::{Entities, IntentTag, NluResult, SchemeFilter};
use krishi_knowledge::KnowledgeIndex;

use crate::keywords::*;

/// Deterministic keyword/entity matcher over the knowledge index.
pub struct RuleClassifier {
    index: Arc<KnowledgeIndex>,
    known_locations: Vec<String>,
}

impl RuleClassifier {
    pub fn new(index: Arc<KnowledgeIndex>, known_locations: Vec<String>) -> Self {
        Self {
            index,
            known_locations,
        }
    }

    pub fn index(&self) -> &KnowledgeIndex {
        &self.index
    }

    /// Classify one utterance. Total: never fails, never panics.
    pub fn classify(&self, text: &str) -> NluResult {
        if text.trim().is_empty() {
            return NluResult::unknown();
        }
        let text_lower = text.to_lowercase();

        // Priority 1: help
        if any_contained(&text_lower, HELP_KEYWORDS) {
            return NluResult::new(IntentTag::GetHelp, Entities::None);
        }

        // Priority 2: weather. A weather keyword ends classification
        // here whether or not a location resolves.
        if any_contained(&text_lower, WEATHER_KEYWORDS) {
            let location = self
                .known_locations
                .iter()
                .find(|loc| text_lower.contains(&loc.to_lowercase()))
                .cloned();
            return NluResult::new(IntentTag::GetWeather, Entities::Weather { location });
        }

        // Priority 3: mandi price
        if any_contained(&text_lower, MANDI_PRICE_KEYWORDS) {
            let mandi_location = self
                .index
                .market_for_contained_core_name(&text_lower)
                .map(String::from)
                .or_else(|| {
                    self.index
                        .known_markets()
                        .iter()
                        .find(|m| text_lower.contains(&m.to_lowercase()))
                        .cloned()
                });
            let crop_name = self.find_crop(&text_lower);
            return NluResult::new(
                IntentTag::GetMandiPrice,
                Entities::Mandi {
                    crop_name,
                    mandi_location,
                },
            );
        }

        // Priority 4: schemes — generic vocabulary OR a specific scheme
        // matched by its canonical name or any declared keyword.
        let is_scheme_q = any_contained(&text_lower, SCHEME_KEYWORDS);
        let scheme_name = self.find_scheme(&text_lower);
        if is_scheme_q || scheme_name.is_some() {
            return NluResult::new(
                IntentTag::AskSchemeInfo,
                Entities::Scheme {
                    scheme_name,
                    filter: scheme_filter(&text_lower),
                },
            );
        }

        // Priority 5: crop-detail families, gated on a known crop name.
        if let Some(crop_name) = self.find_crop(&text_lower) {
            let families: &[(&[&str], IntentTag)] = &[
                (PEST_INFO_KEYWORDS, IntentTag::AskCropPests),
                (FERTILIZER_KEYWORDS, IntentTag::AskCropFertilizers),
                (SOIL_TYPE_KEYWORDS, IntentTag::AskCropSoilType),
                (IRRIGATION_KEYWORDS, IntentTag::AskCropIrrigation),
                (SOWING_TIME_KEYWORDS, IntentTag::AskCropSowingTime),
                (GENERAL_INFO_KEYWORDS, IntentTag::AskCropGeneralInfo),
            ];
            for (table, intent) in families {
                if any_contained(&text_lower, table) {
                    return NluResult::new(*intent, Entities::CropDetail { crop_name });
                }
            }
        }

        NluResult::unknown()
    }

    /// First known crop whose name occurs in the text.
    fn find_crop(&self, text_lower: &str) -> Option<String> {
        self.index
            .known_crops()
            .iter()
            .find(|crop| text_lower.contains(&crop.to_lowercase()))
            .cloned()
    }

    /// Canonical name of the first scheme (table order) whose full
    /// name or any declared keyword occurs in the text.
    fn find_scheme(&self, text_lower: &str) -> Option<String> {
        for scheme in self.index.schemes() {
            let name_lower = scheme.name.to_lowercase();
            if !name_lower.is_empty() && text_lower.contains(&name_lower) {
                return Some(scheme.name.clone());
            }
            if scheme
                .keywords
                .iter()
                .any(|kw| text_lower.contains(&kw.to_lowercase()))
            {
                return Some(scheme.name.clone());
            }
        }
        None
    }
}

/// Regional filter, derived only when locale words co-occur with
/// scheme vocabulary.
fn scheme_filter(text_lower: &str) -> Option<SchemeFilter> {
    if !any_contained(text_lower, SCHEME_FILTER_CONTEXT_WORDS) {
        return None;
    }
    if any_contained(text_lower, JHARKHAND_FILTER_WORDS) {
        Some(SchemeFilter::Jharkhand)
    } else if any_contained(text_lower, ALL_INDIA_FILTER_WORDS) {
        Some(SchemeFilter::AllIndia)
    } else {
        None
    }
}
