//! Turn resolution
//!
//! Decides, per user turn, whether the text closes the conversation,
//! answers a pending slot, or opens a fresh question. Branch order is
//! fixed: exit command, weather follow-up, mandi follow-up, fresh
//! classification. The first applicable branch consumes the turn.

use krishi_core::{Entities, IntentTag, NluResult};
use krishi_nlu::RuleClassifier;

use crate::context::{DialogueContext, MandiSlots};
use crate::responder::{ReplyOutcome, Responder};
use crate::templates;

/// Everything one turn produced: the NLU view of the utterance, the
/// reply, and whether the session said goodbye.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub nlu: NluResult,
    pub reply: ReplyOutcome,
    pub farewell: bool,
}

/// Resolves user turns against a mutable per-session context.
pub struct TurnResolver {
    classifier: RuleClassifier,
    responder: Responder,
    exit_phrases: Vec<String>,
}

impl TurnResolver {
    pub fn new(
        classifier: RuleClassifier,
        responder: Responder,
        exit_phrases: Vec<String>,
    ) -> Self {
        Self {
            classifier,
            responder,
            exit_phrases,
        }
    }

    /// Resolve one turn, updating `ctx` in place.
    pub async fn resolve_turn(&self, text: &str, ctx: &mut DialogueContext) -> TurnOutcome {
        let text_lower = text.to_lowercase();

        // Exit commands win over any open conversation.
        if self
            .exit_phrases
            .iter()
            .any(|p| text_lower.contains(&p.to_lowercase()))
        {
            ctx.clear();
            return TurnOutcome {
                nlu: NluResult::unknown(),
                reply: ReplyOutcome {
                    text: templates::FAREWELL.to_string(),
                    still_needs: Default::default(),
                },
                farewell: true,
            };
        }

        if ctx.awaiting_weather_location {
            return self.weather_followup(text, ctx).await;
        }

        if ctx.awaiting_mandi_info {
            return self.mandi_followup(text, ctx).await;
        }

        self.fresh_turn(text, ctx).await
    }

    /// The whole turn is taken verbatim as the place name; the flag
    /// drops whether or not the lookup succeeds, so a failed lookup
    /// does not trap the session in a retry loop.
    async fn weather_followup(&self, text: &str, ctx: &mut DialogueContext) -> TurnOutcome {
        ctx.awaiting_weather_location = false;
        let nlu = NluResult::new(
            IntentTag::GetWeather,
            Entities::Weather {
                location: Some(text.trim().to_string()),
            },
        );
        tracing::debug!(location = %text.trim(), "Weather location follow-up");
        let reply = self.responder.generate_reply(&nlu).await;
        TurnOutcome {
            nlu,
            reply,
            farewell: false,
        }
    }

    async fn mandi_followup(&self, text: &str, ctx: &mut DialogueContext) -> TurnOutcome {
        let mut slots = ctx.pending_mandi.clone();
        self.fill_mandi_slot(text.trim(), &mut slots);

        let nlu = NluResult::new(
            IntentTag::GetMandiPrice,
            Entities::Mandi {
                crop_name: slots.crop_name.clone(),
                mandi_location: slots.mandi_location.clone(),
            },
        );
        tracing::debug!(?slots, "Mandi slot follow-up");
        let reply = self.responder.generate_reply(&nlu).await;

        if reply.still_needs.crop_name || reply.still_needs.mandi_location {
            ctx.awaiting_mandi_info = true;
            ctx.pending_mandi = slots;
        } else {
            ctx.awaiting_mandi_info = false;
            ctx.pending_mandi = MandiSlots::default();
        }

        TurnOutcome {
            nlu,
            reply,
            farewell: false,
        }
    }

    /// Pin the follow-up text into the first open slot. With both
    /// slots open an exact market core name claims the market slot,
    /// anything else defaults to the crop slot.
    fn fill_mandi_slot(&self, answer: &str, slots: &mut MandiSlots) {
        let index = self.classifier.index();
        if slots.is_empty() {
            if let Some(market) = index.market_for_exact_core_name(answer) {
                slots.mandi_location = Some(market.to_string());
            } else {
                slots.crop_name = Some(answer.to_string());
            }
        } else if slots.crop_name.is_none() {
            slots.crop_name = Some(answer.to_string());
        } else if slots.mandi_location.is_none() {
            slots.mandi_location = match index.market_for_contained_core_name(answer) {
                Some(market) => Some(market.to_string()),
                None => Some(answer.to_string()),
            };
        }
    }

    async fn fresh_turn(&self, text: &str, ctx: &mut DialogueContext) -> TurnOutcome {
        let nlu = self.classifier.classify(text);
        tracing::debug!(intent = nlu.intent.as_str(), "Classified fresh turn");
        let reply = self.responder.generate_reply(&nlu).await;

        ctx.awaiting_weather_location = reply.still_needs.weather_location;

        if reply.still_needs.crop_name || reply.still_needs.mandi_location {
            ctx.awaiting_mandi_info = true;
            ctx.pending_mandi = match &nlu.entities {
                Entities::Mandi {
                    crop_name,
                    mandi_location,
                } => MandiSlots {
                    crop_name: crop_name.clone(),
                    mandi_location: mandi_location.clone(),
                },
                _ => MandiSlots::default(),
            };
        } else {
            ctx.awaiting_mandi_info = false;
            ctx.pending_mandi = MandiSlots::default();
        }

        TurnOutcome {
            nlu,
            reply,
            farewell: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use krishi_core::{WeatherError, WeatherProvider, WeatherSnapshot};
    use krishi_knowledge::{KnowledgeBase, KnowledgeIndex, Scheme};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    struct FixedWeather;

    #[async_trait]
    impl WeatherProvider for FixedWeather {
        async fn fetch(&self, location: &str) -> Result<Option<WeatherSnapshot>, WeatherError> {
            Ok(Some(WeatherSnapshot {
                city_name: location.to_string(),
                description: "साफ़ आकाश".to_string(),
                temp_celsius: Some(28.0),
                humidity: Some(55),
            }))
        }
    }

    fn sample_kb() -> KnowledgeBase {
        let crops: BTreeMap<String, krishi_knowledge::CropInfo> =
            serde_json::from_str(r#"{"गेहूं": {}, "धान": {}, "मक्का": {}}"#).unwrap();
        let mandi: BTreeMap<String, BTreeMap<String, krishi_knowledge::PriceEntry>> =
            serde_json::from_str(
                r#"{
                "कानपुर मंडी": {"गेहूं": {"price": "₹2100 प्रति क्विंटल", "last_updated": "2024-05-01"}},
                "लखनऊ मंडी": {"धान": {"price": "₹1900 प्रति क्विंटल", "last_updated": "2024-05-02"}}
            }"#,
            )
            .unwrap();
        let schemes = vec![Scheme {
            name: "पीएम किसान सम्मान निधि".to_string(),
            category: "All India".to_string(),
            keywords: vec!["पीएम किसान".to_string()],
            focus: None,
            details: None,
            eligibility: None,
            advice: None,
        }];
        KnowledgeBase {
            crops: Some(crops),
            mandi: Some(mandi),
            schemes: Some(schemes),
        }
    }

    fn resolver() -> TurnResolver {
        let kb = Arc::new(sample_kb());
        let index = Arc::new(KnowledgeIndex::build(&kb));
        let classifier = RuleClassifier::new(
            index.clone(),
            vec!["दिल्ली".to_string(), "रांची".to_string()],
        );
        let responder = Responder::new(
            kb,
            index,
            Arc::new(FixedWeather),
            vec![
                "गेहूं की खेती कब करें".to_string(),
                "दिल्ली में मौसम".to_string(),
            ],
        );
        TurnResolver::new(
            classifier,
            responder,
            vec![
                "धन्यवाद".to_string(),
                "बाय".to_string(),
                "बाय बाय".to_string(),
                "स्टॉप".to_string(),
                "बंद करो".to_string(),
            ],
        )
    }

    #[tokio::test]
    async fn weather_two_turn_flow() {
        let r = resolver();
        let mut ctx = DialogueContext::new();

        let turn1 = r.resolve_turn("मौसम कैसा है", &mut ctx).await;
        assert_eq!(turn1.reply.text, templates::ASK_WEATHER_LOCATION);
        assert!(ctx.awaiting_weather_location);
        assert!(!ctx.awaiting_mandi_info);

        let turn2 = r.resolve_turn("रांची", &mut ctx).await;
        assert!(turn2.reply.text.contains("रांची में मौसम साफ़ आकाश है।"));
        assert!(ctx.is_fresh());
    }

    #[tokio::test]
    async fn weather_followup_takes_text_verbatim() {
        let r = resolver();
        let mut ctx = DialogueContext::new();
        ctx.awaiting_weather_location = true;

        // Even an unrecognized place is forwarded as the location.
        let turn = r.resolve_turn("  जमशेदपुर  ", &mut ctx).await;
        assert_eq!(
            turn.nlu.entities,
            Entities::Weather {
                location: Some("जमशेदपुर".to_string())
            }
        );
        assert!(!ctx.awaiting_weather_location);
    }

    #[tokio::test]
    async fn mandi_three_turn_slot_fill() {
        let r = resolver();
        let mut ctx = DialogueContext::new();

        let turn1 = r.resolve_turn("क्या रेट है", &mut ctx).await;
        assert_eq!(turn1.reply.text, templates::ASK_CROP_AND_MANDI);
        assert!(ctx.awaiting_mandi_info);
        assert!(ctx.pending_mandi.is_empty());

        // "मक्का" is a known crop with no price anywhere: the crop slot
        // pins and the market question keeps the conversation open.
        let turn2 = r.resolve_turn("मक्का", &mut ctx).await;
        assert!(turn2.reply.text.contains("मक्का"));
        assert!(ctx.awaiting_mandi_info);
        assert_eq!(ctx.pending_mandi.crop_name.as_deref(), Some("मक्का"));
        assert!(ctx.pending_mandi.mandi_location.is_none());

        let turn3 = r.resolve_turn("कानपुर", &mut ctx).await;
        assert!(turn3.reply.text.contains("कानपुर मंडी"));
        assert!(ctx.is_fresh());
        assert!(ctx.pending_mandi.is_empty());
    }

    #[tokio::test]
    async fn mandi_followup_market_core_name_claims_market_slot() {
        let r = resolver();
        let mut ctx = DialogueContext::new();
        ctx.awaiting_mandi_info = true;

        // Exact market core name with both slots open goes to the
        // market slot, not the crop default.
        let turn = r.resolve_turn("कानपुर", &mut ctx).await;
        assert_eq!(
            turn.reply.text,
            "आप कानपुर मंडी में किस फसल का भाव जानना चाहते हैं?"
        );
        assert!(ctx.awaiting_mandi_info);
        assert_eq!(
            ctx.pending_mandi.mandi_location.as_deref(),
            Some("कानपुर मंडी")
        );

        let turn2 = r.resolve_turn("गेहूं", &mut ctx).await;
        assert!(turn2.reply.text.contains("₹2100 प्रति क्विंटल"));
        assert!(ctx.is_fresh());
    }

    #[tokio::test]
    async fn mandi_followup_unknown_answer_defaults_to_crop() {
        let r = resolver();
        let mut ctx = DialogueContext::new();
        ctx.awaiting_mandi_info = true;

        let turn = r.resolve_turn("केसर", &mut ctx).await;
        // Not a known crop or market, so it lands in the crop slot and
        // the no-price-anywhere apology asks for a market.
        assert!(turn.reply.text.contains("केसर"));
        assert!(ctx.awaiting_mandi_info);
        assert_eq!(ctx.pending_mandi.crop_name.as_deref(), Some("केसर"));
    }

    #[tokio::test]
    async fn fresh_mandi_query_with_partial_entities_seeds_slots() {
        let r = resolver();
        let mut ctx = DialogueContext::new();

        let turn = r.resolve_turn("कानपुर मंडी में भाव बताओ", &mut ctx).await;
        assert_eq!(turn.nlu.intent, IntentTag::GetMandiPrice);
        assert!(ctx.awaiting_mandi_info);
        assert_eq!(
            ctx.pending_mandi.mandi_location.as_deref(),
            Some("कानपुर मंडी")
        );
        assert!(ctx.pending_mandi.crop_name.is_none());
    }

    #[tokio::test]
    async fn complete_mandi_query_leaves_context_fresh() {
        let r = resolver();
        let mut ctx = DialogueContext::new();

        let turn = r
            .resolve_turn("कानपुर मंडी में गेहूं का भाव क्या है", &mut ctx)
            .await;
        assert!(turn.reply.text.contains("₹2100 प्रति क्विंटल"));
        assert!(ctx.is_fresh());
    }

    #[tokio::test]
    async fn exit_phrase_resets_open_conversation() {
        let r = resolver();
        let mut ctx = DialogueContext::new();

        r.resolve_turn("क्या रेट है", &mut ctx).await;
        assert!(ctx.awaiting_mandi_info);

        let turn = r.resolve_turn("धन्यवाद", &mut ctx).await;
        assert!(turn.farewell);
        assert_eq!(turn.reply.text, templates::FAREWELL);
        assert_eq!(ctx, DialogueContext::default());
    }

    #[tokio::test]
    async fn exit_phrase_wins_over_weather_followup() {
        let r = resolver();
        let mut ctx = DialogueContext::new();
        ctx.awaiting_weather_location = true;

        let turn = r.resolve_turn("बाय बाय", &mut ctx).await;
        assert!(turn.farewell);
        assert!(ctx.is_fresh());
    }

    #[tokio::test]
    async fn awaiting_flags_stay_mutually_exclusive() {
        let r = resolver();
        let mut ctx = DialogueContext::new();

        r.resolve_turn("मौसम कैसा है", &mut ctx).await;
        assert!(ctx.awaiting_weather_location && !ctx.awaiting_mandi_info);

        // The location answer closes the weather exchange; a new
        // mandi question then opens only the mandi flag.
        r.resolve_turn("दिल्ली", &mut ctx).await;
        r.resolve_turn("क्या रेट है", &mut ctx).await;
        assert!(!ctx.awaiting_weather_location && ctx.awaiting_mandi_info);
    }

    #[tokio::test]
    async fn unknown_turn_clears_stale_mandi_state() {
        let r = resolver();
        let mut ctx = DialogueContext::new();
        ctx.pending_mandi.crop_name = Some("गेहूं".to_string());

        let turn = r.resolve_turn("कुछ भी ऊल जलूल", &mut ctx).await;
        assert_eq!(turn.nlu.intent, IntentTag::Unknown);
        assert!(ctx.pending_mandi.is_empty());
    }
}
