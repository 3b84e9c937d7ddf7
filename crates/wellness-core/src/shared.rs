//! Shared check-in types: mood scale, sleep/water bands, the submitted turn, and the user profile.

use crate::error::CheckinError;
use serde::{Deserialize, Serialize};

/// Upper bound of the mood score.
pub const MOOD_MAX: u8 = 100;

/// The fixed 5-point emoji scale shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodScale {
    Down,
    Uneasy,
    Neutral,
    Okay,
    Great,
}

impl MoodScale {
    pub const ALL: [MoodScale; 5] = [
        MoodScale::Down,
        MoodScale::Uneasy,
        MoodScale::Neutral,
        MoodScale::Okay,
        MoodScale::Great,
    ];

    pub fn emoji(self) -> &'static str {
        match self {
            MoodScale::Down => "😔",
            MoodScale::Uneasy => "😕",
            MoodScale::Neutral => "😐",
            MoodScale::Okay => "🙂",
            MoodScale::Great => "😄",
        }
    }

    /// Score recorded for this point of the scale.
    pub fn score(self) -> u8 {
        match self {
            MoodScale::Down => 10,
            MoodScale::Uneasy => 30,
            MoodScale::Neutral => 50,
            MoodScale::Okay => 70,
            MoodScale::Great => 90,
        }
    }

    pub fn from_emoji(emoji: &str) -> Option<Self> {
        let emoji = emoji.trim();
        Self::ALL.into_iter().find(|m| m.emoji() == emoji)
    }
}

/// Hours of sleep, as a categorical band. Ordered from least to most sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SleepBand {
    #[serde(rename = "0–2")]
    ZeroToTwo,
    #[serde(rename = "3–5")]
    ThreeToFive,
    #[serde(rename = "6–8")]
    SixToEight,
    #[serde(rename = "9+")]
    NinePlus,
}

impl SleepBand {
    pub const ALL: [SleepBand; 4] = [
        SleepBand::ZeroToTwo,
        SleepBand::ThreeToFive,
        SleepBand::SixToEight,
        SleepBand::NinePlus,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SleepBand::ZeroToTwo => "0–2",
            SleepBand::ThreeToFive => "3–5",
            SleepBand::SixToEight => "6–8",
            SleepBand::NinePlus => "9+",
        }
    }

    /// Parses a band label. Accepts an ASCII hyphen in place of the en dash.
    /// Unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        let canonical = canonical_band_label(label);
        Self::ALL.into_iter().find(|b| b.label() == canonical)
    }

    /// The two lowest bands.
    pub fn is_low(self) -> bool {
        matches!(self, SleepBand::ZeroToTwo | SleepBand::ThreeToFive)
    }
}

/// Glasses of water, as a categorical band. Ordered from least to most water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WaterBand {
    #[serde(rename = "0")]
    None,
    #[serde(rename = "1–3")]
    OneToThree,
    #[serde(rename = "4–6")]
    FourToSix,
    #[serde(rename = "7+")]
    SevenPlus,
}

impl WaterBand {
    pub const ALL: [WaterBand; 4] = [
        WaterBand::None,
        WaterBand::OneToThree,
        WaterBand::FourToSix,
        WaterBand::SevenPlus,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WaterBand::None => "0",
            WaterBand::OneToThree => "1–3",
            WaterBand::FourToSix => "4–6",
            WaterBand::SevenPlus => "7+",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        let canonical = canonical_band_label(label);
        Self::ALL.into_iter().find(|b| b.label() == canonical)
    }

    /// The two lowest bands.
    pub fn is_low(self) -> bool {
        matches!(self, WaterBand::None | WaterBand::OneToThree)
    }
}

fn canonical_band_label(label: &str) -> String {
    label.trim().replace(['-', '‐', '—'], "–")
}

/// One user submission. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    mood: u8,
    sleep: Option<SleepBand>,
    water: Option<WaterBand>,
    text: String,
}

impl Turn {
    /// Builds a turn, rejecting empty or whitespace-only text. Mood is clamped to 0–100.
    pub fn new(
        mood: u8,
        sleep: Option<SleepBand>,
        water: Option<WaterBand>,
        text: impl Into<String>,
    ) -> Result<Self, CheckinError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CheckinError::EmptyText);
        }
        Ok(Self {
            mood: mood.min(MOOD_MAX),
            sleep,
            water,
            text: trimmed.to_string(),
        })
    }

    /// Builds a turn from raw form labels. Unknown band labels are kept as absent.
    pub fn from_labels(
        mood: u8,
        sleep_label: &str,
        water_label: &str,
        text: impl Into<String>,
    ) -> Result<Self, CheckinError> {
        Self::new(mood, SleepBand::parse(sleep_label), WaterBand::parse(water_label), text)
    }

    pub fn mood(&self) -> u8 {
        self.mood
    }

    pub fn sleep(&self) -> Option<SleepBand> {
        self.sleep
    }

    pub fn water(&self) -> Option<WaterBand> {
        self.water
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Optional user profile handed to the generation collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age_range: String,
    /// Life context or role (e.g. "student of philology").
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub main_goals: String,
    #[serde(default)]
    pub main_struggles: String,
    #[serde(default)]
    pub helpful_things: String,
}

impl UserProfile {
    /// True when none of the fields used in a prompt carries text.
    pub fn is_blank(&self) -> bool {
        [&self.context, &self.main_goals, &self.main_struggles]
            .iter()
            .all(|s| s.trim().is_empty())
    }
}
