//! Micro-exercise catalog and the per-turn selector.

use crate::lexicon::{Normalized, ANXIETY, LONELINESS, OVERTHINKING, PRESSURE, SADNESS};
use crate::shared::{SleepBand, WaterBand};
use serde::{Deserialize, Serialize};

/// Mood at or below this suggests the soothing phrase even without a text cue.
const SOOTHING_MOOD_MAX: u8 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exercise {
    #[serde(rename = "breathing_4_2_6")]
    Breathing,
    ThoughtDump,
    SoothingPhrase,
    #[serde(rename = "body_care_water")]
    Hydration,
}

impl Exercise {
    pub const ALL: [Exercise; 4] = [
        Exercise::Breathing,
        Exercise::ThoughtDump,
        Exercise::SoothingPhrase,
        Exercise::Hydration,
    ];

    /// Stable id used by the exercise completion log.
    pub fn id(self) -> &'static str {
        match self {
            Exercise::Breathing => "breathing_4_2_6",
            Exercise::ThoughtDump => "thought_dump",
            Exercise::SoothingPhrase => "soothing_phrase",
            Exercise::Hydration => "body_care_water",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.id() == id.trim())
    }

    pub fn title(self) -> &'static str {
        match self {
            Exercise::Breathing => "Άσκηση αναπνοής 4–2–6",
            Exercise::ThoughtDump => "Άσκηση αποφόρτισης σκέψεων",
            Exercise::SoothingPhrase => "Άσκηση ηρεμίας για θλίψη / μοναξιά",
            Exercise::Hydration => "Άσκηση φροντίδας σώματος (νερό)",
        }
    }

    pub fn instructions(self) -> &'static str {
        match self {
            Exercise::Breathing => {
                "Εισπνοή από τη μύτη για 4'', κράτημα της αναπνοής για 2'', \
                 αργή εκπνοή από το στόμα για 6''. Επανάλαβε 5 φορές."
            }
            Exercise::ThoughtDump => {
                "Γράψε μία πρόταση που αρχίζει με: «Αυτό που με βαραίνει περισσότερο είναι…» \
                 χωρίς να τη φιλτράρεις. Το πρώτο πράγμα που θα σου βγει είναι συνήθως και το πιο σημαντικό."
            }
            Exercise::SoothingPhrase => {
                "Βάλε το χέρι στο στήθος σου, πάρε μία αργή ανάσα και πες από μέσα σου: \
                 «Είναι εντάξει να νιώθω έτσι. Δεν είμαι μόνος/η σε αυτό που ζω.»"
            }
            Exercise::Hydration => {
                "Αν δεν έχεις πιει νερό όλη μέρα, ένα απλό ποτήρι είναι πράξη φροντίδας \
                 για το σώμα και το μυαλό σου."
            }
        }
    }

    /// Text shown on the exercise card.
    pub fn suggestion_text(self) -> String {
        format!("{}: {}", self.title(), self.instructions())
    }
}

/// Picks exactly one exercise. Text cues win over the categorical inputs.
pub fn select_exercise(
    mood: u8,
    sleep: Option<SleepBand>,
    water: Option<WaterBand>,
    text: &Normalized,
) -> Exercise {
    if ANXIETY.matches(text) {
        return Exercise::Breathing;
    }
    if SADNESS.matches(text) || LONELINESS.matches(text) || mood <= SOOTHING_MOOD_MAX {
        return Exercise::SoothingPhrase;
    }
    if PRESSURE.matches(text) || OVERTHINKING.matches(text) {
        return Exercise::ThoughtDump;
    }
    if water.is_some_and(WaterBand::is_low) {
        return Exercise::Hydration;
    }
    if sleep.is_some_and(SleepBand::is_low) {
        Exercise::Breathing
    } else {
        Exercise::ThoughtDump
    }
}

/// Suggestion text for the turn.
pub fn exercise_suggestion(
    mood: u8,
    sleep: Option<SleepBand>,
    water: Option<WaterBand>,
    text: &str,
) -> String {
    select_exercise(mood, sleep, water, &Normalized::new(text)).suggestion_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(mood: u8, sleep: Option<SleepBand>, water: Option<WaterBand>, text: &str) -> Exercise {
        select_exercise(mood, sleep, water, &Normalized::new(text))
    }

    #[test]
    fn anxiety_cue_gets_breathing() {
        assert_eq!(pick(90, None, Some(WaterBand::None), "έχω άγχος"), Exercise::Breathing);
    }

    #[test]
    fn loneliness_or_very_low_mood_gets_soothing_phrase() {
        assert_eq!(pick(70, None, None, "νιώθω μοναξιά"), Exercise::SoothingPhrase);
        assert_eq!(pick(10, None, None, "τίποτα"), Exercise::SoothingPhrase);
    }

    #[test]
    fn pressure_gets_thought_dump() {
        assert_eq!(pick(50, None, None, "έχω πολλά να κάνω"), Exercise::ThoughtDump);
    }

    #[test]
    fn low_water_without_text_cue_gets_hydration() {
        assert_eq!(pick(50, None, Some(WaterBand::OneToThree), "μια μέρα"), Exercise::Hydration);
    }

    #[test]
    fn default_depends_on_sleep() {
        assert_eq!(pick(50, Some(SleepBand::ZeroToTwo), None, "μια μέρα"), Exercise::Breathing);
        assert_eq!(pick(50, Some(SleepBand::SixToEight), None, "μια μέρα"), Exercise::ThoughtDump);
        assert_eq!(pick(50, None, None, "μια μέρα"), Exercise::ThoughtDump);
    }

    #[test]
    fn ids_round_trip() {
        for e in Exercise::ALL {
            assert_eq!(Exercise::from_id(e.id()), Some(e));
        }
        assert_eq!(Exercise::from_id("yoga"), None);
    }
}
