//! Reply generation
//!
//! Turns one classified utterance into reply text plus a structured
//! continuation signal. The responder never mutates dialogue state;
//! the resolver reads [`StillNeeds`] to decide which awaiting flag to
//! raise for the next turn.

use std::sync::Arc;

use krishi_core::{Entities, IntentTag, NluResult, SchemeFilter, WeatherProvider, WeatherSnapshot};
use krishi_knowledge::{FertilizerInfo, KnowledgeBase, KnowledgeIndex, Scheme};

use crate::templates;

/// Slots the conversation still has to collect before the question
/// can be answered. All false means the turn is self-contained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StillNeeds {
    pub weather_location: bool,
    pub crop_name: bool,
    pub mandi_location: bool,
}

impl StillNeeds {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn any(&self) -> bool {
        self.weather_location || self.crop_name || self.mandi_location
    }
}

/// One generated reply with its continuation signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyOutcome {
    pub text: String,
    pub still_needs: StillNeeds,
}

impl ReplyOutcome {
    fn done(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            still_needs: StillNeeds::none(),
        }
    }

    fn needing(text: impl Into<String>, still_needs: StillNeeds) -> Self {
        Self {
            text: text.into(),
            still_needs,
        }
    }
}

/// Stateless reply generator over the knowledge tables and the
/// weather collaborator.
pub struct Responder {
    kb: Arc<KnowledgeBase>,
    index: Arc<KnowledgeIndex>,
    weather: Arc<dyn WeatherProvider>,
    example_queries: Vec<String>,
}

impl Responder {
    pub fn new(
        kb: Arc<KnowledgeBase>,
        index: Arc<KnowledgeIndex>,
        weather: Arc<dyn WeatherProvider>,
        example_queries: Vec<String>,
    ) -> Self {
        Self {
            kb,
            index,
            weather,
            example_queries,
        }
    }

    /// Generate the reply for one classified utterance. Total: every
    /// intent/entity combination produces some reply text.
    pub async fn generate_reply(&self, nlu: &NluResult) -> ReplyOutcome {
        match nlu.intent {
            IntentTag::GetHelp => ReplyOutcome::done(templates::HELP_MESSAGE),
            IntentTag::GetWeather => self.weather_reply(&nlu.entities).await,
            IntentTag::GetMandiPrice => self.mandi_reply(&nlu.entities),
            IntentTag::AskSchemeInfo => self.scheme_reply(&nlu.entities),
            intent if intent.is_crop_detail() => self.crop_detail_reply(intent, &nlu.entities),
            _ => ReplyOutcome::done(self.unknown_reply()),
        }
    }

    async fn weather_reply(&self, entities: &Entities) -> ReplyOutcome {
        let location = match entities {
            Entities::Weather {
                location: Some(loc),
            } => loc,
            _ => {
                return ReplyOutcome::needing(
                    templates::ASK_WEATHER_LOCATION,
                    StillNeeds {
                        weather_location: true,
                        ..StillNeeds::default()
                    },
                );
            }
        };

        match self.weather.fetch(location).await {
            Ok(Some(snapshot)) => ReplyOutcome::done(format_weather(&snapshot)),
            Ok(None) => ReplyOutcome::done(templates::weather_not_found(location)),
            Err(e) => {
                tracing::warn!(location = %location, error = %e, "Weather lookup failed");
                ReplyOutcome::done(templates::weather_not_found(location))
            }
        }
    }

    fn mandi_reply(&self, entities: &Entities) -> ReplyOutcome {
        let (crop_name, mandi_location) = match entities {
            Entities::Mandi {
                crop_name,
                mandi_location,
            } => (crop_name.as_deref(), mandi_location.as_deref()),
            _ => (None, None),
        };

        let table = match self.kb.mandi.as_ref() {
            Some(t) => t,
            None => return ReplyOutcome::done(templates::MANDI_DATA_UNAVAILABLE),
        };

        match (crop_name, mandi_location) {
            (None, None) => ReplyOutcome::needing(
                templates::ASK_CROP_AND_MANDI,
                StillNeeds {
                    crop_name: true,
                    mandi_location: true,
                    ..StillNeeds::default()
                },
            ),
            (Some(crop), None) => {
                let lines: Vec<String> = table
                    .iter()
                    .filter_map(|(mandi, crops)| {
                        crops.get(crop).map(|entry| {
                            format!(
                                "{} का भाव {} में {} है (आखरी अपडेट: {})।",
                                crop, mandi, entry.price, entry.last_updated
                            )
                        })
                    })
                    .collect();
                if lines.is_empty() {
                    ReplyOutcome::needing(
                        templates::crop_price_not_found_anywhere(crop),
                        StillNeeds {
                            mandi_location: true,
                            ..StillNeeds::default()
                        },
                    )
                } else if lines.len() >= 3 {
                    ReplyOutcome::done(format!(
                        "विभिन्न मंडियों में भाव इस प्रकार हैं: {}",
                        lines.join(" ")
                    ))
                } else {
                    ReplyOutcome::done(lines.join(" "))
                }
            }
            (None, Some(mandi)) => ReplyOutcome::needing(
                templates::ask_crop_for_mandi(mandi),
                StillNeeds {
                    crop_name: true,
                    ..StillNeeds::default()
                },
            ),
            (Some(crop), Some(mandi)) => match table.get(mandi) {
                Some(crops) => match crops.get(crop) {
                    Some(entry) => ReplyOutcome::done(format!(
                        "{} का भाव {} में {} है। यह जानकारी {} को अपडेट की गई थी।",
                        crop, mandi, entry.price, entry.last_updated
                    )),
                    None => ReplyOutcome::done(format!(
                        "क्षमा करें, {} में {} के भाव की जानकारी उपलब्ध नहीं है।",
                        mandi, crop
                    )),
                },
                None => ReplyOutcome::done(format!(
                    "क्षमा करें, मुझे {} की जानकारी नहीं है। मैं कुछ चुनिंदा मंडियों का ही भाव बता सकता हूँ।",
                    mandi
                )),
            },
        }
    }

    fn scheme_reply(&self, entities: &Entities) -> ReplyOutcome {
        let schemes = self.index.schemes();
        if schemes.is_empty() {
            return ReplyOutcome::done(templates::SCHEME_DATA_UNAVAILABLE);
        }

        let (scheme_name, filter) = match entities {
            Entities::Scheme {
                scheme_name,
                filter,
            } => (scheme_name.as_deref(), *filter),
            _ => (None, None),
        };

        if let Some(query) = scheme_name {
            if let Some(scheme) = find_scheme_for_query(schemes, query) {
                return ReplyOutcome::done(format_scheme_card(scheme));
            }
        }

        ReplyOutcome::done(format_scheme_listing(schemes, filter))
    }

    fn crop_detail_reply(&self, intent: IntentTag, entities: &Entities) -> ReplyOutcome {
        let table = match self.kb.crops.as_ref() {
            Some(t) => t,
            None => return ReplyOutcome::done(templates::CROP_DATA_UNAVAILABLE),
        };
        let crop = match entities {
            Entities::CropDetail { crop_name } => crop_name.as_str(),
            _ => return ReplyOutcome::done(self.unknown_reply()),
        };
        let info = table.get(crop);

        let text = match intent {
            IntentTag::AskCropSowingTime => match info.and_then(|i| i.sowing_time.as_deref()) {
                Some(time) => format!("{} की बुवाई का सही समय {} है।", crop, time),
                None => format!("क्षमा करें, मुझे {} की बुवाई के समय की जानकारी नहीं है।", crop),
            },
            IntentTag::AskCropGeneralInfo => match info.and_then(|i| i.general_info.as_deref()) {
                Some(general) => format!("{} के बारे में यह जानकारी है: {}", crop, general),
                None => format!(
                    "क्षमा करें, मेरे पास {} के बारे में सामान्य जानकारी उपलब्ध नहीं है।",
                    crop
                ),
            },
            IntentTag::AskCropPests => match info.map(|i| i.pests.as_slice()) {
                Some(pests) if !pests.is_empty() => format!(
                    "{} में लगने वाले प्रमुख कीट या रोग हैं: {}।",
                    crop,
                    templates::hindi_list(pests)
                ),
                _ => format!(
                    "क्षमा करें, मेरे पास {} के कीट या रोगों की विशिष्ट जानकारी उपलब्ध नहीं है।",
                    crop
                ),
            },
            IntentTag::AskCropFertilizers => match info.and_then(|i| i.fertilizers.as_ref()) {
                Some(FertilizerInfo::Text(advice)) => {
                    format!("{} के लिए खाद की सलाह है: {}", crop, advice)
                }
                Some(FertilizerInfo::Breakdown(stages)) => {
                    let mut parts = vec![format!("{} के लिए खाद की सलाह:", crop)];
                    for (stage, advice) in stages {
                        parts.push(format!("{}: {}", capitalize(stage), advice));
                    }
                    parts.join(" ")
                }
                None => format!(
                    "क्षमा करें, मेरे पास {} के लिए खाद की विशिष्ट जानकारी उपलब्ध नहीं है।",
                    crop
                ),
            },
            IntentTag::AskCropSoilType => match info.and_then(|i| i.soil_type.as_deref()) {
                Some(soil) => format!("{} के लिए उपयुक्त मिट्टी है: {}", crop, soil),
                None => format!(
                    "क्षमा करें, मेरे पास {} के लिए मिट्टी की विशिष्ट जानकारी उपलब्ध नहीं है।",
                    crop
                ),
            },
            IntentTag::AskCropIrrigation => match info.and_then(|i| i.irrigation.as_deref()) {
                Some(irrigation) => {
                    format!("{} की सिंचाई के बारे में जानकारी: {}", crop, irrigation)
                }
                None => format!(
                    "क्षमा करें, मेरे पास {} के लिए सिंचाई की विशिष्ट जानकारी उपलब्ध नहीं है।",
                    crop
                ),
            },
            _ => self.unknown_reply(),
        };
        ReplyOutcome::done(text)
    }

    /// Unknown-intent reply with a deterministic pair of example
    /// queries.
    fn unknown_reply(&self) -> String {
        if self.example_queries.len() >= 2 {
            format!(
                "{} आप ऐसा कुछ पूछ सकते हैं: '{}' या '{}'",
                templates::UNKNOWN_BASE,
                self.example_queries[0],
                self.example_queries[1]
            )
        } else {
            format!("{}{}", templates::UNKNOWN_BASE, templates::UNKNOWN_HELP_HINT)
        }
    }
}

fn format_weather(snapshot: &WeatherSnapshot) -> String {
    let mut parts = vec![format!(
        "{} में मौसम {} है।",
        snapshot.city_name, snapshot.description
    )];
    if let Some(temp) = snapshot.temp_celsius {
        parts.push(format!("तापमान लगभग {:.1}° सेल्सियस है", temp));
    }
    if let Some(humidity) = snapshot.humidity {
        parts.push(format!("और हवा में नमी {}% है।", humidity));
    }
    parts.join(" ")
}

/// Flexible match between a user scheme query and the catalogue:
/// the query occurs in the name, equals a keyword, or contains the
/// full name. Table order decides ties.
fn find_scheme_for_query<'a>(schemes: &'a [Scheme], query: &str) -> Option<&'a Scheme> {
    let query_lower = query.to_lowercase();
    schemes.iter().find(|s| {
        let name_lower = s.name.to_lowercase();
        name_lower.contains(&query_lower)
            || s.keywords.iter().any(|k| k.to_lowercase() == query_lower)
            || query_lower.contains(&name_lower)
    })
}

fn format_scheme_card(scheme: &Scheme) -> String {
    let mut parts = vec![format!("**{}**", scheme.name)];
    if !scheme.category.is_empty() {
        parts.push(format!("*श्रेणी:* {}", scheme.category));
    }
    if let Some(focus) = &scheme.focus {
        parts.push(format!("*मुख्य उद्देश्य:* {}", focus));
    }
    if let Some(details) = &scheme.details {
        parts.push(format!("*विवरण:* {}", details));
    }
    if let Some(eligibility) = &scheme.eligibility {
        parts.push(format!("*पात्रता:* {}", eligibility));
    }
    if let Some(advice) = &scheme.advice {
        parts.push(format!("*सलाह:* {}", advice));
    }
    parts.join("\n")
}

fn format_scheme_listing(schemes: &[Scheme], filter: Option<SchemeFilter>) -> String {
    let mut parts = vec![templates::SCHEME_LIST_HEADER.to_string()];

    let jharkhand: Vec<&Scheme> = schemes
        .iter()
        .filter(|s| s.category.contains("Jharkhand"))
        .collect();
    let all_india: Vec<&Scheme> = schemes
        .iter()
        .filter(|s| s.category.contains("All India"))
        .collect();

    match filter {
        Some(SchemeFilter::Jharkhand) if !jharkhand.is_empty() => {
            parts.push("\n**झारखंड विशिष्ट योजनाएं/पहल:**".to_string());
            push_names(&mut parts, &jharkhand, 5);
        }
        Some(SchemeFilter::AllIndia) if !all_india.is_empty() => {
            parts.push("\n**अखिल भारतीय योजनाएं:**".to_string());
            push_names(&mut parts, &all_india, 5);
        }
        _ => {
            if !jharkhand.is_empty() {
                parts.push("\n**कुछ झारखंड विशिष्ट योजनाएं/पहल:**".to_string());
                push_names(&mut parts, &jharkhand, 3);
            }
            if !all_india.is_empty() {
                parts.push("\n**कुछ अखिल भारतीय योजनाएं:**".to_string());
                push_names(&mut parts, &all_india, 3);
            }
            if jharkhand.is_empty() && all_india.is_empty() {
                parts.push("\n**कुछ मुख्य योजनाएं हैं:**".to_string());
                let all: Vec<&Scheme> = schemes.iter().collect();
                push_names(&mut parts, &all, 3);
            }
        }
    }

    parts.push(format!("\n{}", templates::SCHEME_LIST_FOOTER));
    parts.join("\n")
}

fn push_names(parts: &mut Vec<String>, schemes: &[&Scheme], limit: usize) {
    for scheme in schemes.iter().take(limit) {
        parts.push(format!("- {}", scheme.name));
    }
    if schemes.len() > limit {
        parts.push("  और भी...".to_string());
    }
}

/// ASCII-capitalize a stage label; Devanagari labels pass through
/// unchanged.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
