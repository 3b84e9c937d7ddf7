//! Lexical matcher: one normalization routine and the named keyword groups shared by the
//! safety filter, the emotional map, the exercise selector, and the recurrence trackers.
//!
//! Matching is plain substring search over normalized text. Keywords are stems
//! ("άγχ" matches "άγχος", "αγχωμένη"), so lists stay short. Accent and final-sigma
//! variants do not need separate entries because keywords pass through the same
//! [`normalize`] as the user text.

use once_cell::sync::Lazy;

/// Bumped whenever a keyword table changes meaning.
pub const LEXICON_VERSION: u32 = 2;

/// Lower-cases and folds Greek tonos, dialytika and final sigma.
///
/// Decomposed input (a base letter followed by a combining mark) folds the same way as the
/// precomposed form: the marks are dropped.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .map(fold_char)
        .collect()
}

const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

fn fold_char(c: char) -> char {
    match c {
        'ά' => 'α',
        'έ' => 'ε',
        'ή' => 'η',
        'ί' | 'ϊ' | 'ΐ' => 'ι',
        'ό' => 'ο',
        'ύ' | 'ϋ' | 'ΰ' => 'υ',
        'ώ' => 'ω',
        'ς' => 'σ',
        '’' | '‘' => '\'',
        other => other,
    }
}

/// Text that already went through [`normalize`]. Build once per turn, match many times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized(String);

impl Normalized {
    pub fn new(text: &str) -> Self {
        Self(normalize(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A named list of keyword stems.
#[derive(Debug)]
pub struct KeywordGroup {
    name: &'static str,
    keywords: Vec<String>,
}

impl KeywordGroup {
    pub fn new(name: &'static str, raw: &[&str]) -> Self {
        let mut keywords: Vec<String> = raw
            .iter()
            .map(|k| normalize(k.trim()))
            .filter(|k| !k.is_empty())
            .collect();
        keywords.dedup();
        Self { name, keywords }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True when any keyword occurs in the normalized text.
    pub fn matches(&self, text: &Normalized) -> bool {
        self.keywords.iter().any(|k| text.as_str().contains(k.as_str()))
    }

    /// Convenience for one-off checks on raw text.
    pub fn matches_text(&self, text: &str) -> bool {
        self.matches(&Normalized::new(text))
    }
}

/// Self-harm, suicidal ideation and acute crisis language.
pub static CRISIS: Lazy<KeywordGroup> = Lazy::new(|| {
    KeywordGroup::new(
        "crisis",
        &[
            "αυτοκτον",
            "να πεθάνω",
            "να τελειώσω τη ζωή μου",
            "να τελειώσω με όλα",
            "τέλος στη ζωή μου",
            "δεν θέλω να ζω",
            "δε θέλω να ζω",
            "δεν αξίζει να ζω",
            "να βλάψω τον εαυτό μου",
            "αυτοτραυματ",
            "κόψω τις φλέβες",
            "suicid",
            "kill myself",
            "end my life",
            "want to die",
            "self-harm",
            "self harm",
            "hurt myself",
        ],
    )
});

pub static ANXIETY: Lazy<KeywordGroup> = Lazy::new(|| {
    KeywordGroup::new("anxiety", &["άγχ", "αγχος", "στρες", "πανικ", "anxi", "stress", "panic"])
});

/// Studies, university and exams.
pub static STUDY: Lazy<KeywordGroup> = Lazy::new(|| {
    KeywordGroup::new(
        "study",
        &[
            "σπουδ",
            "σχολή",
            "πανεπιστ",
            "πανεπηστ",
            "εξετάσ",
            "εργασι",
            "μάθημα",
            "διάβασμα",
            "exam",
            "study",
            "studies",
        ],
    )
});

pub static PRESSURE: Lazy<KeywordGroup> =
    Lazy::new(|| KeywordGroup::new("pressure", &["πίεσ", "πιεζ", "πολλά", "pressure"]));

pub static FATIGUE: Lazy<KeywordGroup> =
    Lazy::new(|| KeywordGroup::new("fatigue", &["κουρασ", "κουράσ", "εξαντ", "tired", "exhaust"]));

pub static HOPE: Lazy<KeywordGroup> = Lazy::new(|| KeywordGroup::new("hope", &["ελπί", "hope"]));

pub static LONELINESS: Lazy<KeywordGroup> =
    Lazy::new(|| KeywordGroup::new("loneliness", &["μοναξ", "lonel"]));

pub static SADNESS: Lazy<KeywordGroup> = Lazy::new(|| {
    KeywordGroup::new("sadness", &["λυπ", "στενοχ", "θλίψ", "θλιμ", "κλαί", "sad"])
});

/// Explicit trouble sleeping.
pub static SLEEP_DIFFICULTY: Lazy<KeywordGroup> = Lazy::new(|| {
    KeywordGroup::new(
        "sleep_difficulty",
        &[
            "ύπν",
            "ξενύχτ",
            "αϋπν",
            "δεν κοιμήθηκα",
            "δυσκολεύομαι να κοιμηθώ",
            "insomnia",
            "can't sleep",
        ],
    )
});

/// Racing or tangled thoughts.
pub static OVERTHINKING: Lazy<KeywordGroup> =
    Lazy::new(|| KeywordGroup::new("overthinking", &["σκέψ", "μπερδ", "overthink"]));
