//! Canonical Hindi reply templates
//!
//! The single authoritative wording for every fixed sentence the
//! responder can produce. Adapters must relay these verbatim;
//! dialogue continuation is decided by the responder's `StillNeeds`
//! signal, so the wording here is presentation only.

pub const HELP_MESSAGE: &str = "मैं आपकी मदद कर सकता हूँ: फसल की बुवाई का समय, सामान्य जानकारी, कीट-रोग, खाद (उर्वरक), मिट्टी, और सिंचाई की जानकारी; साथ ही मौसम की जानकारी, मंडी भाव, और सरकारी योजनाओं के बारे में भी बता सकता हूँ। उदाहरण: 'गेहूं की खेती कब करें', 'धान में कीट', 'मक्का के लिए खाद', 'आलू के लिए मिट्टी', 'टमाटर में सिंचाई', 'दिल्ली में मौसम', 'कानपुर मंडी में गेहूं का भाव', 'सरकारी योजनाएं दिखाओ'। बातचीत समाप्त करने के लिए 'धन्यवाद' या 'बाय' कहें।";

pub const FAREWELL: &str = "आपकी सहायता करके खुशी हुई। फिर मिलेंगे!";

pub const ASK_WEATHER_LOCATION: &str = "आप किस जगह के मौसम के बारे में जानना चाहते हैं?";

pub const ASK_CROP_AND_MANDI: &str = "आप किस फसल का और किस मंडी में भाव जानना चाहते हैं?";

pub const CROP_DATA_UNAVAILABLE: &str =
    "क्षमा करें, मैं इस समय फसल सलाहकार डेटा तक नहीं पहुंच पा रहा हूँ।";

pub const MANDI_DATA_UNAVAILABLE: &str =
    "क्षमा करें, मैं इस समय मंडी भाव डेटा तक नहीं पहुंच पा रहा हूँ।";

pub const SCHEME_DATA_UNAVAILABLE: &str =
    "क्षमा करें, मेरे पास अभी योजनाओं की जानकारी उपलब्ध नहीं है।";

pub const UNKNOWN_BASE: &str = "क्षमा करें, मैं आपका सवाल समझ नहीं पाया।";

pub const UNKNOWN_HELP_HINT: &str =
    " आप 'मदद' या 'सहायता' कहकर जान सकते हैं कि मैं क्या कर सकता हूँ।";

pub const SCHEME_LIST_HEADER: &str =
    "किसानों और ग्रामीण विकास के लिए कई योजनाएं और सलाहकार सेवाएं उपलब्ध हैं।";

pub const SCHEME_LIST_FOOTER: &str =
    "आप किसी विशिष्ट योजना का नाम लेकर पूछ सकते हैं, या श्रेणी के अनुसार (जैसे 'झारखंड की योजनाएं')।";

pub fn ask_crop_for_mandi(mandi: &str) -> String {
    format!("आप {} में किस फसल का भाव जानना चाहते हैं?", mandi)
}

pub fn crop_price_not_found_anywhere(crop: &str) -> String {
    format!(
        "क्षमा करें, मुझे {} के लिए किसी भी मंडी में भाव की जानकारी नहीं है। आप किस मंडी के बारे में पूछ रहे हैं?",
        crop
    )
}

pub fn weather_not_found(location: &str) -> String {
    format!(
        "क्षमा करें, मैं {} के लिए मौसम की जानकारी प्राप्त नहीं कर सका। कृपया शहर का नाम जांचें या बाद में प्रयास करें।",
        location
    )
}

/// Join items the way the replies phrase lists: "A", "A और B",
/// "A, B और C".
pub fn hindi_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [first, second] => format!("{} और {}", first, second),
        [head @ .., last] => format!("{} और {}", head.join(", "), last),
    }
}
