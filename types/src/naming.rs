//! Provider model identifiers to human display names.

/// Identifier fragments marking endpoints that cannot serve chat completions
/// (speech synthesis, transcription, moderation).
const NON_CHAT_MARKERS: &[&str] = &["tts", "whisper", "guard", "safeguard"];

/// A display-name rule: every `needles` fragment present, no `excluded` fragment present.
struct NameRule {
    needles: &'static [&'static str],
    excluded: &'static [&'static str],
    display: &'static str,
}

const fn rule(needle: &'static [&'static str], display: &'static str) -> NameRule {
    NameRule {
        needles: needle,
        excluded: &[],
        display,
    }
}

/// Ordered most specific first; the first match wins.
const NAME_RULES: &[NameRule] = &[
    rule(&["llama-3.3-70b"], "Llama 3.3 70B"),
    rule(&["llama-3.1-70b"], "Llama 3.1 70B"),
    rule(&["llama-3.1-8b"], "Llama 3.1 8B"),
    rule(&["mixtral-8x7b"], "Mixtral 8x7B"),
    rule(&["llama-3.2-90b-vision"], "Llama 3.2 90B Vision"),
    rule(&["llama-3.2-11b-vision"], "Llama 3.2 11B Vision"),
    rule(&["llama-4-maverick"], "Llama 4 Maverick 17B"),
    rule(&["llama-4-scout"], "Llama 4 Scout 17B"),
    rule(&["kimi-k2"], "Kimi K2"),
    rule(&["compound-mini"], "Groq Compound Mini"),
    NameRule {
        needles: &["compound"],
        excluded: &["mini"],
        display: "Groq Compound",
    },
    rule(&["gpt-oss-120b"], "GPT-OSS 120B"),
    rule(&["gpt-oss-20b"], "GPT-OSS 20B"),
    rule(&["qwen3-32b"], "Qwen 3 32B"),
    rule(&["allam-2-7b"], "Allam 2 7B"),
];

/// Whether a provider identifier can be offered as a chat model.
#[must_use]
pub fn is_chat_model(model_id: &str) -> bool {
    let lower = model_id.to_lowercase();
    !NON_CHAT_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Derive the display name for a provider identifier.
///
/// Curated rules are tried in order; unmatched ids get a generic title-cased
/// rendering of the identifier.
#[must_use]
pub fn display_name_for(model_id: &str) -> String {
    NAME_RULES
        .iter()
        .find(|rule| {
            rule.needles.iter().all(|n| model_id.contains(n))
                && !rule.excluded.iter().any(|n| model_id.contains(n))
        })
        .map_or_else(|| generic_display_name(model_id), |rule| rule.display.to_string())
}

fn generic_display_name(model_id: &str) -> String {
    // The inserted " - " loses its dash to the second replace.
    title_case(&model_id.replace('/', " - ").replace('-', " "))
}

/// Upper-case the first letter of every alphabetic run and lower-case the rest.
fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_alpha = false;
    for c in raw.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
