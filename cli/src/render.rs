//! Plain-text rendering for the REPL.
//!
//! Everything here returns a `String` so the output can be tested without a
//! terminal.

use std::fmt::Write;

use playground_core::{
    FailureKind, ModelGuide, Notice, Reselection, SessionState, SessionStats,
};
use playground_types::{AssistantMessage, Catalog, ModelEntry, ascii_icon_for, scan_script};

/// Glyph choices for the current terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub ascii_only: bool,
}

impl Style {
    fn icon(self, entry: &ModelEntry) -> &'static str {
        if self.ascii_only {
            ascii_icon_for(entry.display_name())
        } else {
            entry.icon()
        }
    }

    fn warn(self) -> &'static str {
        if self.ascii_only { "[!]" } else { "⚠️" }
    }

    fn info(self) -> &'static str {
        if self.ascii_only { "[i]" } else { "ℹ️" }
    }

    fn quality(self, entry: &ModelEntry) -> String {
        let quality = entry.profile().quality;
        if self.ascii_only {
            format!("{}/5", quality.value())
        } else {
            quality.to_string()
        }
    }

    fn speed(self, entry: &ModelEntry) -> &'static str {
        let label = entry.profile().speed.label();
        if self.ascii_only {
            label.trim_end_matches(['⚡', ' '])
        } else {
            label
        }
    }
}

pub fn model_list(catalog: &Catalog, session: &SessionState, style: Style) -> String {
    let mut out = String::new();
    for (index, entry) in session.available_models(catalog).enumerate() {
        let marker = if session.selected_model() == Some(entry.display_name()) {
            '*'
        } else {
            ' '
        };
        let _ = writeln!(
            out,
            "{marker} {:>2}. {} {}  ({})",
            index + 1,
            style.icon(entry),
            entry.display_name(),
            entry.model_id()
        );
    }

    let disabled: Vec<&str> = session.disabled_models().collect();
    if !disabled.is_empty() {
        let _ = writeln!(out, "\n{} Disabled this session:", style.warn());
        for name in disabled {
            let _ = writeln!(out, "  - {name}");
        }
    }
    out.trim_end().to_string()
}

pub fn model_info(entry: &ModelEntry, style: Style) -> String {
    let profile = entry.profile();
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", style.icon(entry), entry.display_name());
    let _ = writeln!(out, "  id:        {}", entry.model_id());
    let _ = writeln!(out, "  about:     {}", profile.description);
    let _ = writeln!(out, "  strengths: {}", profile.strengths);
    let _ = writeln!(out, "  best for:  {}", profile.best_for);
    let _ = writeln!(out, "  speed:     {}", style.speed(entry));
    let _ = writeln!(out, "  quality:   {}", style.quality(entry));
    let _ = write!(
        out,
        "  images:    {}",
        if entry.supports_vision() {
            "supported"
        } else {
            "not supported"
        }
    );
    out
}

pub fn guide(guide: &ModelGuide<'_>, style: Style) -> String {
    let mut out = String::new();
    for section in &guide.sections {
        if style.ascii_only {
            let _ = writeln!(out, "## {}", section.category.title());
        } else {
            let _ = writeln!(out, "{} {}", section.category.icon(), section.category.title());
        }
        for entry in &section.models {
            let profile = entry.profile();
            let _ = writeln!(out, "  {} {}", style.icon(entry), entry.display_name());
            let _ = writeln!(out, "    - {}", profile.description);
            let _ = writeln!(
                out,
                "    - quality: {} | speed: {}",
                style.quality(entry),
                style.speed(entry)
            );
            let _ = writeln!(out, "    - best for: {}", profile.best_for);
        }
        out.push('\n');
    }

    let _ = writeln!(out, "Total models: {}", guide.total);
    out.push_str("\nQuick pick:\n");
    let picks = &guide.quick_pick;
    for (label, names) in [
        ("speed", &picks.fast),
        ("quality", &picks.quality),
        ("coding", &picks.coding),
        ("images", &picks.vision),
    ] {
        if !names.is_empty() {
            let _ = writeln!(out, "  {label:<8} {}", names.join(", "));
        }
    }
    out.trim_end().to_string()
}

pub fn stats(stats: &SessionStats) -> String {
    format!(
        "messages: {}\nmodel: {}\ntemperature: {:.1}\nmax tokens: {}\ndisabled models: {}",
        stats.messages,
        stats.model.as_deref().unwrap_or("(none)"),
        stats.temperature,
        stats.max_tokens,
        stats.disabled
    )
}

/// Header line plus the reply with Han ideographs masked.
pub fn reply(reply: &AssistantMessage, catalog: &Catalog, style: Style) -> String {
    let icon = catalog
        .get(reply.model_used())
        .map_or(if style.ascii_only { "[*]" } else { "🤖" }, |entry| {
            style.icon(entry)
        });
    let scanned = scan_script(reply.content());
    format!("{icon} {}\n{}", reply.model_used(), scanned.text)
}

pub fn notice(notice: &Notice, style: Style) -> String {
    match notice {
        Notice::ImageDropped => format!(
            "{} The current model cannot process images; the image was not sent.",
            style.warn()
        ),
        Notice::ScriptFlagged { offending } => {
            let chars: Vec<String> = offending.iter().map(char::to_string).collect();
            format!(
                "{} Reply contains Chinese/Japanese characters: {}",
                style.warn(),
                chars.join(", ")
            )
        }
    }
}

pub fn disabled(model: &str, kind: FailureKind, reselection: &Reselection, style: Style) -> String {
    let mut out = format!("{} {}", style.warn(), kind.notice(model));
    if let Some(guidance) = kind.guidance() {
        let _ = write!(out, "\n{} {guidance}", style.info());
    }
    match reselection {
        Reselection::Switched { to } => {
            let _ = write!(out, "\n{} Switching to '{to}'.", style.info());
        }
        Reselection::Exhausted => {
            let _ = write!(
                out,
                "\n{} No usable models left. Try /enable-all or /refresh.",
                style.warn()
            );
        }
        Reselection::Unchanged => {}
    }
    out
}

pub fn switched(reselection: &Reselection, style: Style) -> Option<String> {
    match reselection {
        Reselection::Switched { to } => Some(format!(
            "{} The previous model is no longer available; switched to '{to}'.",
            style.warn()
        )),
        Reselection::Exhausted => Some(format!("{} No usable models available.", style.warn())),
        Reselection::Unchanged => None,
    }
}

#[cfg(test)]
mod tests {
    use playground_core::{FailureKind, Notice, Reselection, SessionState, build_guide};
    use playground_types::{AssistantMessage, Catalog};

    use super::{Style, disabled, guide, model_info, model_list, notice, reply};

    const EMOJI: Style = Style { ascii_only: false };
    const ASCII: Style = Style { ascii_only: true };

    #[test]
    fn list_marks_selection_and_hides_disabled() {
        let catalog = Catalog::static_defaults();
        let mut session = SessionState::new(&catalog, None);
        session.disable(&catalog, "Mixtral 8x7B");

        let text = model_list(&catalog, &session, EMOJI);
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("*  1. 🦙 Llama 3.3 70B"));
        assert!(first.ends_with("(llama-3.3-70b-versatile)"));
        assert_eq!(text.matches("Mixtral 8x7B").count(), 1);
        assert!(text.contains("Disabled this session:\n  - Mixtral 8x7B"));
    }

    #[test]
    fn ascii_info_has_no_emoji() {
        let catalog = Catalog::static_defaults();
        let entry = catalog.get("Llama 3.1 8B").unwrap();
        let text = model_info(entry, ASCII);
        assert!(text.starts_with("[L] Llama 3.1 8B"));
        assert!(text.contains("speed:     very fast\n"));
        assert!(text.contains("quality:   4/5"));
        assert!(text.is_ascii());
    }

    #[test]
    fn reply_masks_han_characters() {
        let catalog = Catalog::static_defaults();
        let message = AssistantMessage::new("Llama 3.3 70B", "안녕하세요 你好", true);
        assert_eq!(reply(&message, &catalog, EMOJI), "🦙 Llama 3.3 70B\n안녕하세요 ??");

        let flagged = Notice::ScriptFlagged {
            offending: vec!['你', '好'],
        };
        assert!(notice(&flagged, EMOJI).ends_with("characters: 你, 好"));
    }

    #[test]
    fn disabled_notice_mentions_switch_and_guidance() {
        let text = disabled(
            "Kimi K2",
            FailureKind::TermsRequired,
            &Reselection::Switched {
                to: "Llama 3.3 70B".into(),
            },
            ASCII,
        );
        assert_eq!(
            text,
            "[!] Kimi K2 requires accepting its terms.\n\
             [i] Accept the model terms in the Groq Console to use it.\n\
             [i] Switching to 'Llama 3.3 70B'."
        );
    }

    #[test]
    fn guide_lists_sections_and_picks() {
        let catalog = Catalog::static_defaults();
        let text = guide(&build_guide(&catalog), ASCII);
        assert!(text.starts_with("## Llama large models (70B+)"));
        assert!(text.contains("Total models: 6"));
        assert!(text.contains("  coding   Llama 3.3 70B, Llama 3.1 70B, Mixtral 8x7B"));
        assert!(text.contains("  images   Llama 3.2 90B Vision, Llama 3.2 11B Vision"));
    }
}
