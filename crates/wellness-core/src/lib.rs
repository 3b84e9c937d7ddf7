//! Check-in rule engine.
//!
//! A turn (mood, sleep band, water band, free text) goes through the safety filter, the
//! categorical summarizer, the reply orchestrator, the exercise selector, the emotional
//! map and the topic recurrence trackers; see [`pipeline::CheckinPipeline`].

pub mod config;
pub mod emotional_map;
pub mod error;
pub mod exercises;
pub mod lexicon;
pub mod openrouter_service;
pub mod pipeline;
pub mod recurrence;
pub mod reply;
pub mod safety;
pub mod session;
pub mod shared;
pub mod summary;
pub mod traits;

pub use config::{api_key_from_env, WellnessConfig};
pub use emotional_map::{extract_emotional_tags, render_emotional_map, EmotionalTag};
pub use error::{CheckinError, GenerationError, SinkError};
pub use exercises::{exercise_suggestion, select_exercise, Exercise};
pub use lexicon::{normalize, KeywordGroup, Normalized, LEXICON_VERSION};
pub use openrouter_service::OpenRouterGenerator;
pub use pipeline::{CheckinPipeline, TurnOutcome};
pub use recurrence::{Topic, TopicTracker, TrackerState};
pub use reply::{
    fallback_therapeutic_reply, generate_reply, GenerationRequest, ReplyGenerator, ReplyOutcome,
    ReplySource,
};
pub use safety::{emergency_message, is_emergency};
pub use session::{Entry, PhraseSource, SessionState};
pub use shared::{MoodScale, SleepBand, Turn, UserProfile, WaterBand};
pub use summary::personal_reply;
pub use traits::{PhraseSink, TurnRecord, TurnSink};
