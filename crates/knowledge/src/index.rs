//! Derived lookup index
//!
//! Built once from the loaded tables and immutable afterwards; safe
//! for unsynchronized concurrent reads. Rebuilding means reloading
//! the underlying tables first.

use std::collections::HashSet;

use crate::loader::KnowledgeBase;
use crate::tables::Scheme;

/// Literal suffix token stripped from market names to get the short
/// form users actually say ("कानपुर मंडी" → "कानपुर").
const MARKET_SUFFIX: &str = "मंडी";

/// Read-only lookup sets derived from the knowledge tables.
#[derive(Debug, Default)]
pub struct KnowledgeIndex {
    known_crops: Vec<String>,
    known_markets: Vec<String>,
    known_market_core_names: Vec<String>,
    known_scheme_keywords: HashSet<String>,
    known_scheme_names: HashSet<String>,
    schemes: Vec<Scheme>,
}

impl KnowledgeIndex {
    pub fn build(kb: &KnowledgeBase) -> Self {
        let known_crops: Vec<String> = kb
            .crops
            .as_ref()
            .map(|t| t.keys().cloned().collect())
            .unwrap_or_default();

        let known_markets: Vec<String> = kb
            .mandi
            .as_ref()
            .map(|t| t.keys().cloned().collect())
            .unwrap_or_default();

        let known_market_core_names = known_markets
            .iter()
            .map(|m| m.replace(MARKET_SUFFIX, "").trim().to_string())
            .collect();

        let schemes = kb.schemes.clone().unwrap_or_default();

        let mut known_scheme_keywords = HashSet::new();
        let mut known_scheme_names = HashSet::new();
        for scheme in &schemes {
            known_scheme_names.insert(scheme.name.to_lowercase());
            for kw in &scheme.keywords {
                known_scheme_keywords.insert(kw.to_lowercase());
            }
        }

        tracing::debug!(
            crops = known_crops.len(),
            markets = known_markets.len(),
            schemes = schemes.len(),
            "Knowledge index built"
        );

        Self {
            known_crops,
            known_markets,
            known_market_core_names,
            known_scheme_keywords,
            known_scheme_names,
            schemes,
        }
    }

    /// Crop names in deterministic (sorted) order.
    pub fn known_crops(&self) -> &[String] {
        &self.known_crops
    }

    /// Full market names; index-aligned with [`known_market_core_names`].
    ///
    /// [`known_market_core_names`]: Self::known_market_core_names
    pub fn known_markets(&self) -> &[String] {
        &self.known_markets
    }

    pub fn known_market_core_names(&self) -> &[String] {
        &self.known_market_core_names
    }

    pub fn known_scheme_keywords(&self) -> &HashSet<String> {
        &self.known_scheme_keywords
    }

    pub fn known_scheme_names(&self) -> &HashSet<String> {
        &self.known_scheme_names
    }

    /// Schemes in table order; first match wins during classification.
    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    /// Full market name for a core-name that exactly equals `text`
    /// (case-insensitive).
    pub fn market_for_exact_core_name(&self, text: &str) -> Option<&str> {
        let needle = text.trim().to_lowercase();
        self.known_market_core_names
            .iter()
            .position(|core| core.to_lowercase() == needle)
            .map(|i| self.known_markets[i].as_str())
    }

    /// Full market name for the first core-name contained in `text`
    /// (case-insensitive).
    pub fn market_for_contained_core_name(&self, text: &str) -> Option<&str> {
        let haystack = text.to_lowercase();
        self.known_market_core_names
            .iter()
            .position(|core| !core.is_empty() && haystack.contains(&core.to_lowercase()))
            .map(|i| self.known_markets[i].as_str())
    }

    /// Whether `text` exactly names a known crop (case-insensitive).
    pub fn is_known_crop(&self, text: &str) -> bool {
        let needle = text.trim().to_lowercase();
        self.known_crops.iter().any(|c| c.to_lowercase() == needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{CropInfo, PriceEntry};
    use std::collections::BTreeMap;

    fn sample_kb() -> KnowledgeBase {
        let mut crops = BTreeMap::new();
        crops.insert("गेहूं".to_string(), CropInfo::default());
        crops.insert("धान".to_string(), CropInfo::default());

        let mut kanpur = BTreeMap::new();
        kanpur.insert(
            "गेहूं".to_string(),
            PriceEntry {
                price: "₹2100".to_string(),
                last_updated: "2024-05-01".to_string(),
            },
        );
        let mut mandi = BTreeMap::new();
        mandi.insert("कानपुर मंडी".to_string(), kanpur);

        let schemes = vec![Scheme {
            name: "पीएम किसान सम्मान निधि".to_string(),
            category: "All India".to_string(),
            keywords: vec!["पीएम किसान".to_string(), "किसान सम्मान".to_string()],
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

    #[test]
    fn core_names_strip_market_suffix() {
        let index = KnowledgeIndex::build(&sample_kb());
        assert_eq!(index.known_markets(), &["कानपुर मंडी".to_string()]);
        assert_eq!(index.known_market_core_names(), &["कानपुर".to_string()]);
    }

    #[test]
    fn exact_core_name_resolves_full_market() {
        let index = KnowledgeIndex::build(&sample_kb());
        assert_eq!(index.market_for_exact_core_name("कानपुर"), Some("कानपुर मंडी"));
        assert_eq!(index.market_for_exact_core_name(" कानपुर "), Some("कानपुर मंडी"));
        assert_eq!(index.market_for_exact_core_name("कानपुर में"), None);
    }

    #[test]
    fn contained_core_name_resolves_full_market() {
        let index = KnowledgeIndex::build(&sample_kb());
        assert_eq!(
            index.market_for_contained_core_name("कानपुर के पास"),
            Some("कानपुर मंडी")
        );
        assert_eq!(index.market_for_contained_core_name("पटना"), None);
    }

    #[test]
    fn scheme_names_and_keywords_lowercased() {
        let index = KnowledgeIndex::build(&sample_kb());
        assert!(index.known_scheme_keywords().contains("पीएम किसान"));
        assert!(index
            .known_scheme_names()
            .contains("पीएम किसान सम्मान निधि"));
    }

    #[test]
    fn empty_base_yields_empty_index() {
        let index = KnowledgeIndex::build(&KnowledgeBase::default());
        assert!(index.known_crops().is_empty());
        assert!(index.known_markets().is_empty());
        assert!(index.schemes().is_empty());
    }
}
