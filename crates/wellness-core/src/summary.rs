//! Categorical summarizer: a deterministic one-paragraph reading of mood, sleep and water.

use crate::shared::{SleepBand, WaterBand};

/// Mood at or below this is "low".
pub const LOW_MOOD_MAX: u8 = 30;
/// Mood at or below this (and above [`LOW_MOOD_MAX`]) is "mid".
pub const MID_MOOD_MAX: u8 = 60;

/// Coarse mood band used by the summarizer and the fallback reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodBand {
    Low,
    Mid,
    High,
}

impl MoodBand {
    pub fn of(mood: u8) -> Self {
        if mood <= LOW_MOOD_MAX {
            MoodBand::Low
        } else if mood <= MID_MOOD_MAX {
            MoodBand::Mid
        } else {
            MoodBand::High
        }
    }
}

fn mood_fragment(mood: u8) -> &'static str {
    match MoodBand::of(mood) {
        MoodBand::Low => "Φαίνεται πως η διάθεσή σου σήμερα είναι χαμηλή.",
        MoodBand::Mid => "Η διάθεσή σου σήμερα μοιάζει κάπου στη μέση, ούτε πολύ καλά ούτε πολύ άσχημα.",
        MoodBand::High => "Χαίρομαι που η διάθεσή σου σήμερα είναι καλή!",
    }
}

fn sleep_fragment(sleep: Option<SleepBand>) -> Option<&'static str> {
    Some(match sleep? {
        SleepBand::ZeroToTwo => {
            "Κοιμήθηκες πολύ λίγο (0–2 ώρες), κάτι που επηρεάζει έντονα την ενέργεια και τη διάθεση."
        }
        SleepBand::ThreeToFive => "Ο ύπνος σου ήταν λιγότερος από όσο χρειάζεται το σώμα (3–5 ώρες).",
        SleepBand::SixToEight => "Ο ύπνος σου ήταν σε καλά επίπεδα (6–8 ώρες).",
        SleepBand::NinePlus => {
            "Κοιμήθηκες πολλές ώρες (9+)· μερικές φορές αυτό δείχνει ότι το σώμα ζητά περισσότερη ξεκούραση."
        }
    })
}

fn water_fragment(water: Option<WaterBand>) -> Option<&'static str> {
    Some(match water? {
        WaterBand::None => "Δεν έχεις πιει καθόλου νερό σήμερα· η ενυδάτωση είναι χαμηλή.",
        WaterBand::OneToThree => "Έχεις πιει λίγο νερό (1–3 ποτήρια)· η ενυδάτωση είναι ακόμη χαμηλή.",
        WaterBand::FourToSix => "Η ενυδάτωσή σου κινείται σε μέτρια επίπεδα (4–6 ποτήρια).",
        WaterBand::SevenPlus => "Μπράβο, έχεις πιει αρκετό νερό (7+ ποτήρια)!",
    })
}

/// Joins one fragment per dimension. Absent bands contribute nothing.
pub fn personal_reply(mood: u8, sleep: Option<SleepBand>, water: Option<WaterBand>) -> String {
    [Some(mood_fragment(mood)), sleep_fragment(sleep), water_fragment(water)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
}
