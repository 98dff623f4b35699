//! Serde models for the three knowledge tables

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Advisory record for one crop. Every field is optional in the data;
/// the responder apologizes per-field when one is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CropInfo {
    #[serde(default)]
    pub sowing_time: Option<String>,
    #[serde(default)]
    pub general_info: Option<String>,
    #[serde(default)]
    pub pests: Vec<String>,
    #[serde(default)]
    pub fertilizers: Option<FertilizerInfo>,
    #[serde(default)]
    pub soil_type: Option<String>,
    #[serde(default)]
    pub irrigation: Option<String>,
}

/// Fertilizer advice appears in the data either as one sentence or as
/// a stage-by-stage breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FertilizerInfo {
    Text(String),
    Breakdown(BTreeMap<String, String>),
}

/// One crop's price in one market.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceEntry {
    pub price: String,
    pub last_updated: String,
}

/// A government scheme or advisory program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheme {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub eligibility: Option<String>,
    #[serde(default)]
    pub advice: Option<String>,
}
