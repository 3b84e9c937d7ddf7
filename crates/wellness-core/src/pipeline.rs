//! Turn pipeline: runs every component in order for one submitted turn.
//!
//! Normal turn: user → summary → reply → exercise → emotional map → plan(s), then the
//! turn is handed to the durable log. An emergency turn appends only the emergency entry.

use crate::config::WellnessConfig;
use crate::emotional_map::{extract_emotional_tags_capped, render_emotional_map};
use crate::exercises::select_exercise;
use crate::lexicon::Normalized;
use crate::recurrence::Topic;
use crate::reply::{
    fallback_therapeutic_reply, generate_reply, GenerationRequest, ReplyGenerator, ReplyOutcome,
    ReplySource,
};
use crate::safety::{emergency_message, is_emergency_normalized};
use crate::session::{Entry, SessionState};
use crate::shared::{Turn, UserProfile};
use crate::summary::personal_reply;
use crate::traits::{TurnRecord, TurnSink};
use std::sync::Arc;
use tracing::{info, warn};

/// What happened on one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Emergency,
    Completed {
        reply_source: ReplySource,
        plans: Vec<Topic>,
    },
}

impl TurnOutcome {
    pub fn is_emergency(&self) -> bool {
        matches!(self, TurnOutcome::Emergency)
    }
}

/// Stateless across sessions; each session owns its own [`SessionState`].
pub struct CheckinPipeline {
    config: WellnessConfig,
    generator: Option<Box<dyn ReplyGenerator>>,
    turn_sink: Option<Arc<dyn TurnSink>>,
    profile: Option<UserProfile>,
}

impl CheckinPipeline {
    pub fn new(config: WellnessConfig) -> Self {
        Self {
            config,
            generator: None,
            turn_sink: None,
            profile: None,
        }
    }

    pub fn with_generator(mut self, generator: Box<dyn ReplyGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_turn_sink(mut self, sink: Arc<dyn TurnSink>) -> Self {
        self.turn_sink = Some(sink);
        self
    }

    pub fn with_profile(mut self, profile: Option<UserProfile>) -> Self {
        self.profile = profile;
        self
    }

    /// Replaces the profile used for later turns, e.g. after the user edits it.
    pub fn set_profile(&mut self, profile: Option<UserProfile>) {
        self.profile = profile;
    }

    pub fn config(&self) -> &WellnessConfig {
        &self.config
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Processes one turn to completion. Collaborator failures are logged, never returned.
    pub async fn process_turn(&self, session: &mut SessionState, turn: &Turn) -> TurnOutcome {
        let text = Normalized::new(turn.text());

        if is_emergency_normalized(&text) {
            warn!(
                target: "wellness::safety",
                session = %session.id(),
                "crisis language detected; emergency message only"
            );
            session.push(Entry::Emergency {
                markup: emergency_message(),
            });
            self.persist(&TurnRecord::emergency(turn));
            return TurnOutcome::Emergency;
        }

        let (mood, sleep, water) = (turn.mood(), turn.sleep(), turn.water());

        session.push(Entry::User {
            text: turn.text().to_string(),
        });
        session.push(Entry::Summary {
            text: personal_reply(mood, sleep, water),
        });

        let request = GenerationRequest::new(turn, self.profile.as_ref());
        let outcome = generate_reply(self.generator.as_deref(), &request).await;
        let (reply, reply_source) = match outcome {
            ReplyOutcome::Generated(text) => (text, ReplySource::Generated),
            ReplyOutcome::Unavailable => (
                fallback_therapeutic_reply(mood, sleep, water, turn.text()),
                ReplySource::Fallback,
            ),
        };
        session.push(Entry::Reply {
            text: reply,
            source: reply_source,
        });

        let exercise = select_exercise(mood, sleep, water, &text);
        session.push(Entry::Exercise {
            exercise,
            text: exercise.suggestion_text(),
        });

        let tags = extract_emotional_tags_capped(mood, sleep, water, &text, self.config.tag_cap);
        let markup = render_emotional_map(&tags);
        session.push(Entry::EmotionalMap { tags, markup });

        let threshold = self.config.recurrence_threshold;
        let mut plans = Vec::new();
        let mut emitted = Vec::new();
        for tracker in session.trackers_mut() {
            if let Some(plan) = tracker.observe(&text, sleep, threshold) {
                emitted.push((tracker.topic(), plan));
            }
        }
        for (topic, plan) in emitted {
            session.push(Entry::Plan {
                topic,
                text: plan.to_string(),
            });
            plans.push(topic);
        }

        self.persist(&TurnRecord::from_turn(turn));
        info!(
            target: "wellness::pipeline",
            session = %session.id(),
            mood,
            reply_source = ?reply_source,
            plans = plans.len(),
            "turn processed"
        );
        TurnOutcome::Completed { reply_source, plans }
    }

    fn persist(&self, record: &TurnRecord) {
        let Some(sink) = &self.turn_sink else {
            return;
        };
        if let Err(e) = sink.append(record) {
            warn!(
                target: "wellness::pipeline",
                collaborator = e.collaborator,
                error = %e.message,
                "turn log append failed"
            );
        }
    }
}
