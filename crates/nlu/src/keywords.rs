//! Hindi keyword tables
//!
//! Ordered lists; the classifier takes the first hit within a table.
//! Phrasings cover common ASR variants of the same question.

pub const HELP_KEYWORDS: &[&str] = &[
    "मदद",
    "सहायता",
    "क्या कर सकते हो",
    "क्या कर सकता है",
    "क्या कर सकते हैं",
    "कैसे इस्तेमाल करूं",
    "हेल्प",
    "उदाहरण दो",
    "उदाहरण बताएं",
];

pub const WEATHER_KEYWORDS: &[&str] = &["मौसम", "तापमान", "बारिश", "हवा", "कैसा है आज"];

pub const MANDI_PRICE_KEYWORDS: &[&str] = &[
    "भाव",
    "क्या भाव है",
    "क्या रेट है",
    "दाम क्या है",
    "कीमत क्या है",
    "मंडी में",
    "का रेट",
    "का भाव",
    "का दाम",
];

/// Generic crop-reference phrases; combined with a crop name these
/// gate entry into the crop-detail branch, they never pick an intent
/// on their own.
pub const CROP_REFERENCE_KEYWORDS: &[&str] = &["की खेती", "की फसल", "की बुवाई", "फसल"];

pub const SCHEME_KEYWORDS: &[&str] = &[
    "योजना",
    "स्कीम",
    "सब्सिडी",
    "सरकारी मदद",
    "लोन",
    "ऋण",
    "कार्यक्रम",
    "सरकारी योजना",
    "सलाह",
];

/// Locale words deriving the scheme listing filter. Each must co-occur
/// with scheme vocabulary to take effect.
pub const JHARKHAND_FILTER_WORDS: &[&str] = &["झारखंड"];
pub const ALL_INDIA_FILTER_WORDS: &[&str] = &["केंद्र", "भारत", "अखिल भारतीय"];
pub const SCHEME_FILTER_CONTEXT_WORDS: &[&str] = &["योजना", "स्कीम"];

// Crop-detail sub-families, in the order they are checked: more
// specific vocabularies first, general info last.

pub const PEST_INFO_KEYWORDS: &[&str] = &[
    "में कीट",
    "कौन से कीट",
    "के कीट",
    "कीट की समस्या",
    "कीट समस्या",
    "कौन सी बीमारी",
    "बीमारी",
    "रोग",
    "के रोग",
    "में लगने वाले रोग",
];

pub const FERTILIZER_KEYWORDS: &[&str] = &[
    "खाद",
    "कौन सी खाद",
    "खाद कब डालें",
    "उर्वरक",
    "फर्टिलाइजर",
    "कितनी खाद",
    "खाद की मात्रा",
    "खाद कब और कितनी दें",
    "कितनी खाद दें",
];

pub const SOIL_TYPE_KEYWORDS: &[&str] = &[
    "मिट्टी",
    "कैसी मिट्टी",
    "किस तरह की मिट्टी",
    "मिट्टी की जानकारी",
    "भूमि",
    "भूमि कैसी होनी चाहिए",
    "मिट्टी का प्रकार",
];

pub const IRRIGATION_KEYWORDS: &[&str] = &[
    "सिंचाई",
    "पानी कब दें",
    "पानी कब देना है",
    "कितना पानी",
    "पानी की आवश्यकता",
    "पानी कैसे दें",
    "सिंचाई कैसे करें",
    "सिंचाई कब करनी चाहिए",
];

pub const SOWING_TIME_KEYWORDS: &[&str] = &[
    "कब करें",
    "कब करते हैं",
    "कब बोना",
    "का समय",
    "का सही समय",
    "बोने का समय",
    "लगाने का समय",
    "कब लगाया जाता है",
    "कब बोई जाती है",
];

pub const GENERAL_INFO_KEYWORDS: &[&str] = &[
    "के बारे में बताओ",
    "के बारे में जानकारी",
    "जानकारी दो",
    "क्या है",
    "कैसी फसल है",
    "कैसा होता है",
    "विवरण दें",
];

/// True when any keyword in `table` occurs inside `text_lower`.
/// `text_lower` must already be lower-cased.
pub fn any_contained(text_lower: &str, table: &[&str]) -> bool {
    table.iter().any(|kw| text_lower.contains(kw))
}
