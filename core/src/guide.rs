//! Model comparison guide over a catalog snapshot.

use playground_types::{Catalog, ModelEntry};

const QUICK_PICK_LIMIT: usize = 3;
const VISION_PICK_LIMIT: usize = 2;

/// Guide sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    LlamaLarge,
    LlamaSmall,
    Mixtral,
    Vision,
    Gemma,
    Qwen,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::LlamaLarge,
        Category::LlamaSmall,
        Category::Mixtral,
        Category::Vision,
        Category::Gemma,
        Category::Qwen,
        Category::Other,
    ];

    /// Vision takes precedence over family.
    #[must_use]
    pub fn of(display_name: &str) -> Self {
        let lower = display_name.to_lowercase();
        if display_name.contains("Vision") {
            Category::Vision
        } else if display_name.contains("Llama") {
            if lower.contains("70b") || lower.contains("90b") || display_name.contains("3.3") {
                Category::LlamaLarge
            } else {
                Category::LlamaSmall
            }
        } else if display_name.contains("Mixtral") {
            Category::Mixtral
        } else if display_name.contains("Gemma") {
            Category::Gemma
        } else if display_name.contains("Qwen") {
            Category::Qwen
        } else {
            Category::Other
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Category::LlamaLarge => "Llama large models (70B+)",
            Category::LlamaSmall => "Llama small and medium models",
            Category::Mixtral => "Mixtral models",
            Category::Vision => "Vision models (image analysis)",
            Category::Gemma => "Gemma models",
            Category::Qwen => "Qwen models",
            Category::Other => "Other models",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Category::LlamaLarge | Category::LlamaSmall => "🦙",
            Category::Mixtral => "🌀",
            Category::Vision => "👁️",
            Category::Gemma => "💎",
            Category::Qwen => "🐉",
            Category::Other => "🤖",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GuideSection<'c> {
    pub category: Category,
    pub models: Vec<&'c ModelEntry>,
}

/// Short recommendation lists by use case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickPick<'c> {
    pub fast: Vec<&'c str>,
    pub quality: Vec<&'c str>,
    pub coding: Vec<&'c str>,
    pub vision: Vec<&'c str>,
}

#[derive(Debug, Clone)]
pub struct ModelGuide<'c> {
    /// Non-empty sections only.
    pub sections: Vec<GuideSection<'c>>,
    pub quick_pick: QuickPick<'c>,
    pub total: usize,
}

fn is_coding_pick(display_name: &str) -> bool {
    let lower = display_name.to_lowercase();
    display_name.contains("Mixtral")
        || (display_name.contains("Llama") && (lower.contains("70b") || lower.contains("90b")))
}

fn pick(catalog: &Catalog, limit: usize, keep: impl Fn(&ModelEntry) -> bool) -> Vec<&str> {
    catalog
        .iter()
        .filter(|entry| keep(entry))
        .map(ModelEntry::display_name)
        .take(limit)
        .collect()
}

#[must_use]
pub fn build_guide(catalog: &Catalog) -> ModelGuide<'_> {
    let sections = Category::ALL
        .into_iter()
        .map(|category| GuideSection {
            category,
            models: catalog
                .iter()
                .filter(|entry| Category::of(entry.display_name()) == category)
                .collect(),
        })
        .filter(|section| !section.models.is_empty())
        .collect();

    let quick_pick = QuickPick {
        fast: pick(catalog, QUICK_PICK_LIMIT, |e| e.profile().speed.is_fast()),
        quality: pick(catalog, QUICK_PICK_LIMIT, |e| e.profile().quality.is_top()),
        coding: pick(catalog, QUICK_PICK_LIMIT, |e| is_coding_pick(e.display_name())),
        vision: pick(catalog, VISION_PICK_LIMIT, |e| {
            Category::of(e.display_name()) == Category::Vision
        }),
    };

    ModelGuide {
        sections,
        quick_pick,
        total: catalog.len(),
    }
}
