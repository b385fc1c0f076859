//! Keyword based path detection.
//!
//! Each theme is scored by counting words in the brain dump that start with
//! one of its keywords. Up to [`MAX_DETECTED_PATHS`] themes are returned,
//! highest score first; when nothing matches the defaults are returned.

use super::Path;
use regex::Regex;
use std::sync::LazyLock;

/// Maximum number of paths suggested for one brain dump
pub const MAX_DETECTED_PATHS: usize = 4;

struct Theme {
    id: &'static str,
    label: &'static str,
    description: &'static str,
    keywords: &'static [&'static str],
}

const THEMES: &[Theme] = &[
    Theme {
        id: "future",
        label: "Fear of the Future",
        description: "Uncertainty about what's next and the choices ahead",
        keywords: &[
            "future", "job", "school", "career", "move", "moving", "decision", "decide",
            "choice", "choices", "next", "plan", "plans",
        ],
    },
    Theme {
        id: "relationships",
        label: "Connection & Relationships",
        description: "Thoughts about your connections with others",
        keywords: &[
            "friend", "girlfriend", "boyfriend", "partner", "relationship", "alone", "people",
            "connection", "social", "family", "parent", "parents", "sibling",
        ],
    },
    Theme {
        id: "pressure",
        label: "Pressure to Get It Right",
        description: "The weight of expectations and perfectionism",
        keywords: &[
            "perfect", "enough", "should", "have to", "pressure", "expectations", "fail",
            "failure", "wrong", "mistake", "anxious", "worry", "stress",
        ],
    },
    Theme {
        id: "identity",
        label: "Who Am I Becoming?",
        description: "Questions about your sense of self and purpose",
        keywords: &[
            "who i am", "myself", "identity", "purpose", "meaning", "value", "worth", "lost",
            "direction", "know who", "become", "becoming",
        ],
    },
    Theme {
        id: "overwhelm",
        label: "Feeling Overwhelmed",
        description: "When everything feels like too much",
        keywords: &[
            "overwhelmed", "tired", "exhausted", "stuck", "trapped", "helpless", "hopeless",
            "nothing", "pointless",
        ],
    },
    Theme {
        id: "emotions",
        label: "Emotional Weight",
        description: "The feelings that are sitting with you",
        keywords: &[
            "sad", "depressed", "down", "lonely", "empty", "numb", "feel nothing", "dark", "bad",
        ],
    },
];

struct CompiledTheme {
    path: Path,
    patterns: Vec<Regex>,
}

static COMPILED: LazyLock<Vec<CompiledTheme>> = LazyLock::new(|| {
    THEMES
        .iter()
        .map(|theme| CompiledTheme {
            path: Path::new(theme.id, theme.label, theme.description),
            patterns: theme
                .keywords
                .iter()
                .map(|keyword| {
                    Regex::new(&format!(r"(?i)\b{}\w*\b", regex::escape(keyword)))
                        .expect("keyword pattern is valid")
                })
                .collect(),
        })
        .collect()
});

/// Paths offered when no theme matches
pub fn default_paths() -> Vec<Path> {
    vec![
        Path::new(
            "overwhelm",
            "Feeling Overwhelmed",
            "When everything feels like too much",
        ),
        Path::new(
            "uncertainty",
            "Not Sure What's Wrong",
            "A sense that something's off, but unclear what",
        ),
        Path::new("fear", "Fear and Uncertainty", "Anxiety about the unknown"),
        Path::new(
            "clarity",
            "Wanting Clarity",
            "A desire to understand yourself better",
        ),
    ]
}

/// Suggest paths for a brain dump, best match first.
pub fn detect_paths(brain_dump: &str) -> Vec<Path> {
    if brain_dump.trim().is_empty() {
        return default_paths();
    }

    let mut scored: Vec<(usize, &Path)> = COMPILED
        .iter()
        .filter_map(|theme| {
            let score: usize = theme
                .patterns
                .iter()
                .map(|p| p.find_iter(brain_dump).count())
                .sum();
            (score > 0).then_some((score, &theme.path))
        })
        .collect();

    if scored.is_empty() {
        return default_paths();
    }

    // Stable sort keeps theme order for equal scores
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_DETECTED_PATHS)
        .map(|(_, path)| path.clone())
        .collect()
}
