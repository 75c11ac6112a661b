//! Descriptive profiles and icons keyed by model display name.
//!
//! Both lookups are pure: the same display name always yields the same result.

use std::fmt;

use serde::Serialize;

/// Relative response latency of a model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Speed {
    Moderate,
    Fast,
    VeryFast,
    UltraFast,
}

impl Speed {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Speed::Moderate => "moderate",
            Speed::Fast => "fast",
            Speed::VeryFast => "very fast ⚡",
            Speed::UltraFast => "ultra fast ⚡⚡",
        }
    }

    /// Anything quicker than the baseline counts as fast in the quick-pick guide.
    #[must_use]
    pub const fn is_fast(self) -> bool {
        !matches!(self, Speed::Moderate)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Star rating, 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Quality(u8);

impl Quality {
    pub const TOP: Quality = Quality(5);

    #[must_use]
    pub const fn stars(count: u8) -> Self {
        assert!(count >= 1 && count <= 5, "quality must be 1..=5 stars");
        Self(count)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_top(self) -> bool {
        self.0 == Self::TOP.0
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            f.write_str("⭐")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Profile {
    pub description: &'static str,
    pub strengths: &'static str,
    pub best_for: &'static str,
    pub speed: Speed,
    pub quality: Quality,
}

const fn profile(
    description: &'static str,
    strengths: &'static str,
    best_for: &'static str,
    speed: Speed,
    stars: u8,
) -> Profile {
    Profile {
        description,
        strengths,
        best_for,
        speed,
        quality: Quality::stars(stars),
    }
}

/// Hand-written profiles for the built-in catalog entries.
const CURATED: &[(&str, Profile)] = &[
    (
        "Llama 3.3 70B",
        profile(
            "Meta's latest large language model",
            "High-quality answers, complex reasoning, creative work",
            "Expert questions, long conversations, hard problems",
            Speed::Moderate,
            5,
        ),
    ),
    (
        "Llama 3.1 70B",
        profile(
            "Stable, capable large model",
            "Balanced performance, reliable answers",
            "General questions, analysis, summarization",
            Speed::Moderate,
            5,
        ),
    ),
    (
        "Llama 3.1 8B",
        profile(
            "Fast, efficient small model",
            "Quick responses, low latency",
            "Simple questions, fast chat, real-time replies",
            Speed::VeryFast,
            4,
        ),
    ),
    (
        "Mixtral 8x7B",
        profile(
            "Mistral AI's high-performance MoE model",
            "Broad task coverage, multitasking",
            "Coding, technical writing, multilingual work",
            Speed::Fast,
            5,
        ),
    ),
    (
        "Llama 3.2 90B Vision",
        profile(
            "Large multimodal model with vision",
            "Image understanding, visual reasoning",
            "Image analysis, visual question answering",
            Speed::Moderate,
            5,
        ),
    ),
    (
        "Llama 3.2 11B Vision",
        profile(
            "Vision model tuned for fast processing",
            "Fast image processing, efficient vision tasks",
            "Quick image analysis, real-time vision work",
            Speed::Fast,
            4,
        ),
    ),
];

const TTS: Profile = profile(
    "Text-to-speech model",
    "Natural speech generation, multiple voices",
    "Speech synthesis, audio generation",
    Speed::Fast,
    4,
);
const VISION: Profile = profile(
    "Multimodal vision model",
    "Image understanding, visual analysis",
    "Image analysis, visual question answering",
    Speed::Moderate,
    4,
);
const LLAMA4_MAVERICK: Profile = profile(
    "Meta's Llama 4 Maverick model",
    "Latest architecture, stronger reasoning",
    "Complex problem solving, expert conversations",
    Speed::Fast,
    5,
);
const LLAMA4_SCOUT: Profile = profile(
    "Meta's Llama 4 Scout model",
    "Fast exploration, efficient processing",
    "Quick answers, everyday chat",
    Speed::VeryFast,
    4,
);
const LLAMA_LARGE: Profile = profile(
    "Meta's large language model",
    "High-quality answers, complex reasoning",
    "Expert questions, demanding tasks",
    Speed::Moderate,
    5,
);
const LLAMA_SMALL: Profile = profile(
    "Meta's efficient language model",
    "Fast responses, efficient processing",
    "General questions, quick chat",
    Speed::Fast,
    4,
);
const MIXTRAL: Profile = profile(
    "Mistral AI's MoE model",
    "Versatile tasks, coding support",
    "Coding, technical writing, complex tasks",
    Speed::Fast,
    5,
);
const GEMMA: Profile = profile(
    "Google's lightweight language model",
    "Efficient processing, fast responses",
    "Everyday chat, quick tasks",
    Speed::VeryFast,
    4,
);
const QWEN: Profile = profile(
    "Alibaba's multilingual language model",
    "Multilingual support, varied tasks",
    "Multilingual processing, general work",
    Speed::Moderate,
    4,
);
const KIMI: Profile = profile(
    "Moonshot AI's long-context language model",
    "Long-context understanding, complex dialogue",
    "Long document analysis, complex reasoning",
    Speed::Moderate,
    5,
);
const COMPOUND: Profile = profile(
    "Groq's optimized language model",
    "Very fast inference, efficient processing",
    "Fast answers, real-time chat",
    Speed::UltraFast,
    5,
);
const GPT_OSS: Profile = profile(
    "Open-weight GPT-style model",
    "Strong language understanding, general tasks",
    "Everyday chat, varied tasks",
    Speed::Moderate,
    5,
);
const ALLAM: Profile = profile(
    "Multilingual language model with Arabic focus",
    "Arabic support, multilingual processing",
    "Multilingual work, cultural context",
    Speed::Fast,
    4,
);
const GENERIC: Profile = profile(
    "Language model",
    "General task handling",
    "General questions, conversation",
    Speed::Moderate,
    3,
);

/// Look up the descriptive profile for a display name.
///
/// Curated entries win; otherwise the first matching keyword family is used.
#[must_use]
pub fn describe(display_name: &str) -> Profile {
    if let Some((_, curated)) = CURATED.iter().find(|(name, _)| *name == display_name) {
        return *curated;
    }

    let lower = display_name.to_lowercase();
    let has = |needle: &str| lower.contains(needle);

    if has("tts") {
        return TTS;
    }
    if has("vision") {
        return VISION;
    }
    if has("llama 4") || has("llama-4") {
        if has("maverick") {
            return LLAMA4_MAVERICK;
        }
        if has("scout") {
            return LLAMA4_SCOUT;
        }
    }
    if has("llama") {
        return if has("70b") || has("90b") {
            LLAMA_LARGE
        } else {
            LLAMA_SMALL
        };
    }
    if has("mixtral") {
        MIXTRAL
    } else if has("gemma") {
        GEMMA
    } else if has("qwen") {
        QWEN
    } else if has("kimi") {
        KIMI
    } else if has("compound") {
        COMPOUND
    } else if has("gpt-oss") {
        GPT_OSS
    } else if has("allam") {
        ALLAM
    } else {
        GENERIC
    }
}

/// Icon families, most specific first.
const ICON_RULES: &[(&[&str], &str, &str)] = &[
    (&["Tts", "TTS"], "🔊", "[tts]"),
    (&["Vision"], "👁️", "[eye]"),
    (&["Llama 4"], "🦙✨", "[L4]"),
    (&["Llama"], "🦙", "[L]"),
    (&["Mixtral"], "🌀", "[Mx]"),
    (&["Gemma"], "💎", "[Gm]"),
    (&["Qwen"], "🐉", "[Qw]"),
    (&["Kimi"], "🌙", "[Ki]"),
    (&["Compound"], "⚡", "[Co]"),
    (&["GPT-OSS"], "🔓", "[Go]"),
    (&["Allam"], "🌍", "[Al]"),
];

const DEFAULT_ICON: &str = "🤖";
const DEFAULT_ASCII_ICON: &str = "[*]";

#[must_use]
pub fn icon_for(display_name: &str) -> &'static str {
    icon_lookup(display_name).map_or(DEFAULT_ICON, |(emoji, _)| emoji)
}

/// Same families as [`icon_for`], for terminals limited to ASCII.
#[must_use]
pub fn ascii_icon_for(display_name: &str) -> &'static str {
    icon_lookup(display_name).map_or(DEFAULT_ASCII_ICON, |(_, ascii)| ascii)
}

fn icon_lookup(display_name: &str) -> Option<(&'static str, &'static str)> {
    ICON_RULES
        .iter()
        .find(|(needles, _, _)| needles.iter().any(|n| display_name.contains(n)))
        .map(|(_, emoji, ascii)| (*emoji, *ascii))
}
