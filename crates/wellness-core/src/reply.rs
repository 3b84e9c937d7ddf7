//! Therapeutic reply orchestrator.
//!
//! One attempt at the external generator per turn, no retries. Any failure, an absent
//! generator, or blank output becomes [`ReplyOutcome::Unavailable`]; the pipeline then
//! uses [`fallback_therapeutic_reply`]. Exactly one reply per turn either way.

use crate::error::GenerationError;
use crate::lexicon::{Normalized, ANXIETY, FATIGUE, LONELINESS, PRESSURE, SADNESS};
use crate::shared::{SleepBand, Turn, UserProfile, WaterBand};
use crate::summary::MoodBand;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Everything the generator may use to write a reply.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub mood: u8,
    pub sleep: Option<SleepBand>,
    pub water: Option<WaterBand>,
    pub text: &'a str,
    /// Present only when the profile carries usable text.
    pub profile: Option<&'a UserProfile>,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(turn: &'a Turn, profile: Option<&'a UserProfile>) -> Self {
        Self {
            mood: turn.mood(),
            sleep: turn.sleep(),
            water: turn.water(),
            text: turn.text(),
            profile: profile.filter(|p| !p.is_blank()),
        }
    }
}

/// External natural-language generator. Implementations enforce their own timeout.
#[async_trait::async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Name for logs (e.g. "openrouter").
    fn name(&self) -> &str;

    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GenerationError>;
}

/// Result of the single generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    Generated(String),
    Unavailable,
}

/// Where a reply entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Generated,
    Fallback,
}

/// Tries the generator once. Errors never escape; they are logged by class only.
pub async fn generate_reply(
    generator: Option<&dyn ReplyGenerator>,
    request: &GenerationRequest<'_>,
) -> ReplyOutcome {
    let Some(generator) = generator else {
        debug!(target: "wellness::reply", "no generator configured; using fallback");
        return ReplyOutcome::Unavailable;
    };
    match generator.generate(request).await {
        Ok(text) if !text.trim().is_empty() => ReplyOutcome::Generated(text.trim().to_string()),
        Ok(_) => {
            warn!(
                target: "wellness::reply",
                generator = generator.name(),
                error_kind = GenerationError::Empty.kind(),
                "generator returned blank text; using fallback"
            );
            ReplyOutcome::Unavailable
        }
        Err(e) => {
            warn!(
                target: "wellness::reply",
                generator = generator.name(),
                error_kind = e.kind(),
                "generator failed; using fallback"
            );
            ReplyOutcome::Unavailable
        }
    }
}

fn opening(mood: u8) -> &'static str {
    match MoodBand::of(mood) {
        MoodBand::Low => {
            "Σε ευχαριστώ που το μοιράστηκες μαζί μου. Ακούγεται πως η μέρα σου είναι βαριά, \
             και είναι απολύτως κατανοητό να νιώθεις έτσι."
        }
        MoodBand::Mid => {
            "Σε ευχαριστώ που μου είπες πώς πάει η μέρα σου. Είναι φυσικό κάποιες μέρες \
             να κινούνται κάπου στη μέση."
        }
        MoodBand::High => {
            "Χαίρομαι πολύ που η μέρα σου κυλά καλά! Αξίζει να σταθείς λίγο σε ό,τι σε βοήθησε σήμερα."
        }
    }
}

fn text_cue(text: &Normalized) -> Option<&'static str> {
    if ANXIETY.matches(text) {
        return Some(
            "Το άγχος που περιγράφεις δείχνει ότι κάτι είναι σημαντικό για σένα· \
             δεν χρειάζεται να το διώξεις, μόνο να του κάνεις λίγο χώρο.",
        );
    }
    if SADNESS.matches(text) || LONELINESS.matches(text) {
        return Some(
            "Όταν νιώθουμε λύπη ή μοναξιά, ένα μικρό μήνυμα σε κάποιον που εμπιστευόμαστε \
             μπορεί να κάνει τη διαφορά.",
        );
    }
    if FATIGUE.matches(text) {
        return Some(
            "Η κούραση είναι ο τρόπος του σώματος να ζητήσει παύση· δικαιούσαι να ξεκουραστείς χωρίς ενοχές.",
        );
    }
    if PRESSURE.matches(text) {
        return Some(
            "Όταν όλα μαζεύονται, βοηθά να διαλέξεις μόνο ένα μικρό βήμα για την επόμενη ώρα.",
        );
    }
    None
}

/// Deterministic rule-based reply used when the generator is unavailable.
pub fn fallback_therapeutic_reply(
    mood: u8,
    sleep: Option<SleepBand>,
    water: Option<WaterBand>,
    text: &str,
) -> String {
    let normalized = Normalized::new(text);
    let mut parts = vec![opening(mood)];
    if let Some(cue) = text_cue(&normalized) {
        parts.push(cue);
    }
    if sleep.is_some_and(SleepBand::is_low) {
        parts.push(
            "Με τόσο λίγο ύπνο είναι λογικό όλα να φαίνονται πιο δύσκολα· \
             αν μπορείς, πήγαινε απόψε λίγο νωρίτερα για ξεκούραση.",
        );
    }
    if water.is_some_and(WaterBand::is_low) {
        parts.push("Ένα ποτήρι νερό τώρα είναι μια μικρή αλλά πραγματική πράξη φροντίδας.");
    }
    parts.push("Είμαι εδώ για να το δούμε μαζί, ένα μικρό βήμα τη φορά.");
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Scripted {
        reply: Result<&'static str, ()>,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl ReplyGenerator for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(
            &self,
            _request: &GenerationRequest<'_>,
        ) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Ok(s) => Ok(s.to_string()),
                Err(()) => Err(GenerationError::Api {
                    status: 429,
                    body: "quota".to_string(),
                }),
            }
        }
    }

    fn turn() -> Turn {
        Turn::new(30, Some(SleepBand::ThreeToFive), Some(WaterBand::None), "είμαι κουρασμένη").unwrap()
    }

    #[tokio::test]
    async fn successful_generation_is_used_verbatim() {
        let g = Scripted {
            reply: Ok("  Μια ζεστή απάντηση.  "),
            calls: AtomicUsize::new(0),
        };
        let t = turn();
        let out = generate_reply(Some(&g), &GenerationRequest::new(&t, None)).await;
        assert_eq!(out, ReplyOutcome::Generated("Μια ζεστή απάντηση.".to_string()));
    }

    #[tokio::test]
    async fn failure_is_attempted_once_and_becomes_unavailable() {
        let g = Scripted {
            reply: Err(()),
            calls: AtomicUsize::new(0),
        };
        let t = turn();
        let out = generate_reply(Some(&g), &GenerationRequest::new(&t, None)).await;
        assert_eq!(out, ReplyOutcome::Unavailable);
        assert_eq!(g.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blank_output_and_absent_generator_are_unavailable() {
        let g = Scripted {
            reply: Ok("   "),
            calls: AtomicUsize::new(0),
        };
        let t = turn();
        let req = GenerationRequest::new(&t, None);
        assert_eq!(generate_reply(Some(&g), &req).await, ReplyOutcome::Unavailable);
        assert_eq!(generate_reply(None, &req).await, ReplyOutcome::Unavailable);
    }

    #[test]
    fn blank_profile_is_omitted_from_request() {
        let t = turn();
        let blank = UserProfile {
            name: "Μαρία".to_string(),
            ..Default::default()
        };
        assert!(GenerationRequest::new(&t, Some(&blank)).profile.is_none());
        let real = UserProfile {
            context: "φοιτήτρια".to_string(),
            ..Default::default()
        };
        assert!(GenerationRequest::new(&t, Some(&real)).profile.is_some());
    }

    #[test]
    fn fallback_reflects_text_and_body_cues() {
        let r = fallback_therapeutic_reply(30, Some(SleepBand::ThreeToFive), Some(WaterBand::None), "είμαι κουρασμένη");
        assert!(r.contains("κούραση"));
        assert!(r.contains("λίγο ύπνο"));
        assert!(r.contains("ποτήρι νερό"));
        assert_eq!(r, fallback_therapeutic_reply(30, Some(SleepBand::ThreeToFive), Some(WaterBand::None), "είμαι κουρασμένη"));
    }

    #[test]
    fn fallback_on_a_good_day_stays_short() {
        let r = fallback_therapeutic_reply(90, Some(SleepBand::SixToEight), Some(WaterBand::SevenPlus), "ήταν ωραία");
        assert!(r.starts_with("Χαίρομαι πολύ"));
        assert!(!r.contains("ύπνο"));
    }
}
