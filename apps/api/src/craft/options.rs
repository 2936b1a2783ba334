//! Language and tone choices offered to the user.
//!
//! The server accepts any string for both; these lists only drive the client.

use serde::Serialize;

pub const DEFAULT_LANGUAGE: &str = "Indonesia";
pub const DEFAULT_TONE: &str = "professional";

pub const LANGUAGES: &[&str] = &[
    "Indonesia",
    "English",
    "Spanish",
    "French",
    "German",
    "Italian",
    "Portuguese",
    "Dutch",
    "Russian",
    "Chinese (Simplified)",
    "Japanese",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToneOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub const TONES: &[ToneOption] = &[
    ToneOption {
        value: "professional",
        label: "Professional",
    },
    ToneOption {
        value: "friendly",
        label: "Friendly",
    },
    ToneOption {
        value: "confident",
        label: "Confident",
    },
    ToneOption {
        value: "enthusiastic",
        label: "Enthusiastic",
    },
    ToneOption {
        value: "formal",
        label: "Formal",
    },
    ToneOption {
        value: "casual",
        label: "Casual",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct OptionsCatalogue {
    pub languages: &'static [&'static str],
    pub tones: &'static [ToneOption],
    pub default_language: &'static str,
    pub default_tone: &'static str,
}

pub fn catalogue() -> OptionsCatalogue {
    OptionsCatalogue {
        languages: LANGUAGES,
        tones: TONES,
        default_language: DEFAULT_LANGUAGE,
        default_tone: DEFAULT_TONE,
    }
}
