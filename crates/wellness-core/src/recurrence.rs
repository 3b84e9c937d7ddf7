//! Topic recurrence trackers.
//!
//! Each tracked topic counts matching turns until the threshold, then hands out its
//! 3-step action plan exactly once. `Delivered` is terminal for the session.

use crate::lexicon::{Normalized, ANXIETY, SLEEP_DIFFICULTY, STUDY};
use crate::shared::SleepBand;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Matching turns needed before a plan is emitted.
pub const DEFAULT_RECURRENCE_THRESHOLD: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    StudyAnxiety,
    SleepDifficulty,
}

impl Topic {
    /// Registration order; plans reached on the same turn are emitted in this order.
    pub const ALL: [Topic; 2] = [Topic::StudyAnxiety, Topic::SleepDifficulty];

    pub fn as_str(self) -> &'static str {
        match self {
            Topic::StudyAnxiety => "study_anxiety",
            Topic::SleepDifficulty => "sleep_difficulty",
        }
    }

    /// Study anxiety needs both an anxiety cue and a study cue. Sleep difficulty fires on
    /// a low sleep band or an explicit sleep complaint.
    pub fn detect(self, text: &Normalized, sleep: Option<SleepBand>) -> bool {
        match self {
            Topic::StudyAnxiety => ANXIETY.matches(text) && STUDY.matches(text),
            Topic::SleepDifficulty => {
                sleep.is_some_and(SleepBand::is_low) || SLEEP_DIFFICULTY.matches(text)
            }
        }
    }

    /// The topic's fixed action plan (markdown).
    pub fn action_plan(self) -> &'static str {
        match self {
            Topic::StudyAnxiety => STUDY_ACTION_PLAN,
            Topic::SleepDifficulty => SLEEP_ACTION_PLAN,
        }
    }
}

const STUDY_ACTION_PLAN: &str = "Απ’ όσα μου έχεις γράψει, φαίνεται πως το άγχος για τις σπουδές \
είναι κάτι που επανέρχεται. Ας δοκιμάσουμε ένα πολύ μικρό, ρεαλιστικό πλάνο για αυτή την εβδομάδα:\n\n\
1. **Μία άσκηση αναπνοής πριν το διάβασμα (4–2–6, για 5 γύρους)**  \n   \
Πριν ανοίξεις τα βιβλία, πάρε 1 λεπτό για αναπνοές ώστε να «μαλακώσει» λίγο η ένταση.\n\n\
2. **Μία πρόταση journaling το βράδυ**  \n   \
Γράψε κάθε βράδυ μία μόνο πρόταση που αρχίζει με: «Σήμερα στις σπουδές μου με ζόρισε περισσότερο…». \
Δεν το κρίνεις, απλώς το καταγράφεις.\n\n\
3. **Παρατήρηση μιας δύσκολης στιγμής άγχους**  \n   \
Διάλεξε μία στιγμή μέσα στην εβδομάδα (π.χ. πριν από διάβασμα ή εξετάσεις) και παρατήρησε: \
*τι σκέψεις πέρασαν από το μυαλό σου;* Απλώς σημείωσε 2–3 λέξεις, χωρίς να χρειάζεται να τα αναλύσεις \
εκείνη τη στιγμή.\n\n\
Στόχος δεν είναι να «λύσουμε» όλο το άγχος σε μία εβδομάδα, αλλά να αρχίσεις να το παρατηρείς \
με λίγο περισσότερη απόσταση και φροντίδα.";

const SLEEP_ACTION_PLAN: &str = "Βλέπω ότι ο ύπνος σου σε δυσκολεύει αρκετά το τελευταίο διάστημα. \
Δεν χρειάζεται να το λύσουμε τέλεια· ας δοκιμάσουμε ένα μικρό, ήπιο πλάνο:\n\n\
1. **Μικρή «τελετουργία κλεισίματος» 15′ πριν τον ύπνο**  \n   \
Για ένα τέταρτο πριν ξαπλώσεις, απόφυγε οθόνες/scroll και κάνε κάτι ήρεμο \
(λίγη μουσική, ελαφρύ τέντωμα, ζεστό ρόφημα χωρίς καφεΐνη).\n\n\
2. **Καταγραφή σκέψεων σε ένα χαρτί**  \n   \
Αν πριν τον ύπνο «τρέχει» το μυαλό σου, γράψε σε ένα χαρτί 3 φράσεις: «Αυτό με απασχολεί τώρα…». \
Δεν χρειάζεται λύση, μόνο να το βγάλεις από το κεφάλι.\n\n\
3. **Μία άσκηση αναπνοής 4–2–6 στο κρεβάτι**  \n   \
Πριν κλείσεις τα μάτια, κάνε 5 γύρους: εισπνοή 4'', κράτημα 2'', εκπνοή 6''. \
Αν βαριέσαι να μετράς, χρησιμοποίησε τον ρυθμό της αναπνοής σαν «νανούρισμα».\n\n\
Στόχος δεν είναι να κοιμάσαι τέλεια κάθε βράδυ, αλλά να στείλεις στο σώμα σου το μήνυμα \
ότι δικαιούται λίγη ηρεμία πριν το τέλος της μέρας.";

/// Observable tracker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "count", rename_all = "snake_case")]
pub enum TrackerState {
    Untriggered,
    Counting(u32),
    Delivered,
}

/// Per-session counter for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicTracker {
    topic: Topic,
    count: u32,
    delivered: bool,
}

impl TopicTracker {
    pub fn new(topic: Topic) -> Self {
        Self {
            topic,
            count: 0,
            delivered: false,
        }
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn state(&self) -> TrackerState {
        if self.delivered {
            TrackerState::Delivered
        } else if self.count == 0 {
            TrackerState::Untriggered
        } else {
            TrackerState::Counting(self.count)
        }
    }

    /// Feeds one turn. Returns the plan text on the turn the threshold is reached.
    pub fn observe(
        &mut self,
        text: &Normalized,
        sleep: Option<SleepBand>,
        threshold: u32,
    ) -> Option<&'static str> {
        if self.delivered || !self.topic.detect(text, sleep) {
            return None;
        }
        self.count += 1;
        if self.count < threshold.max(1) {
            return None;
        }
        self.delivered = true;
        info!(
            target: "wellness::recurrence",
            topic = self.topic.as_str(),
            count = self.count,
            "action plan delivered"
        );
        Some(self.topic.action_plan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAM: &str = "Έχω πολύ άγχος με τις εξετάσεις";

    #[test]
    fn study_anxiety_needs_both_cues() {
        let s = |t: &str| Topic::StudyAnxiety.detect(&Normalized::new(t), None);
        assert!(s(EXAM));
        assert!(s("στρες για τη σχολή"));
        assert!(!s("έχω άγχος"));
        assert!(!s("διάβασμα όλη μέρα"));
    }

    #[test]
    fn sleep_difficulty_is_band_or_text() {
        let quiet = Normalized::new("μια ήσυχη μέρα");
        assert!(Topic::SleepDifficulty.detect(&quiet, Some(SleepBand::ZeroToTwo)));
        assert!(Topic::SleepDifficulty.detect(&quiet, Some(SleepBand::ThreeToFive)));
        assert!(!Topic::SleepDifficulty.detect(&quiet, Some(SleepBand::SixToEight)));
        assert!(!Topic::SleepDifficulty.detect(&quiet, None));
        let complaint = Normalized::new("ξενύχτησα πάλι");
        assert!(Topic::SleepDifficulty.detect(&complaint, Some(SleepBand::NinePlus)));
    }

    #[test]
    fn plan_emitted_on_second_match_then_never_again() {
        let text = Normalized::new(EXAM);
        let mut t = TopicTracker::new(Topic::StudyAnxiety);
        assert_eq!(t.state(), TrackerState::Untriggered);
        assert!(t.observe(&text, None, 2).is_none());
        assert_eq!(t.state(), TrackerState::Counting(1));
        let plan = t.observe(&text, None, 2).expect("plan on second match");
        assert!(plan.contains("άγχος για τις σπουδές"));
        assert_eq!(t.state(), TrackerState::Delivered);
        for _ in 0..5 {
            assert!(t.observe(&text, None, 2).is_none());
        }
        assert_eq!(t.count(), 2);
    }

    #[test]
    fn non_matching_turns_do_not_count() {
        let mut t = TopicTracker::new(Topic::StudyAnxiety);
        let text = Normalized::new(EXAM);
        let other = Normalized::new("καλή μέρα");
        assert!(t.observe(&text, None, 2).is_none());
        assert!(t.observe(&other, None, 2).is_none());
        assert_eq!(t.state(), TrackerState::Counting(1));
        assert!(t.observe(&text, None, 2).is_some());
    }

    #[test]
    fn threshold_is_configurable() {
        let text = Normalized::new("ξενύχτι");
        let mut t = TopicTracker::new(Topic::SleepDifficulty);
        assert!(t.observe(&text, None, 3).is_none());
        assert!(t.observe(&text, None, 3).is_none());
        let plan = t.observe(&text, None, 3).expect("third match");
        assert!(plan.contains("ο ύπνος σου"));

        let mut once = TopicTracker::new(Topic::SleepDifficulty);
        assert!(once.observe(&text, None, 0).is_some());
    }
}
