//! Session state: the append-only entry history plus one recurrence tracker per topic.

use crate::emotional_map::EmotionalTag;
use crate::exercises::Exercise;
use crate::recurrence::{Topic, TopicTracker, TrackerState};
use crate::reply::ReplySource;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag handed to the saved-phrase archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseSource {
    Bot,
    Plan,
}

impl PhraseSource {
    pub fn as_str(self) -> &'static str {
        match self {
            PhraseSource::Bot => "bot",
            PhraseSource::Plan => "plan",
        }
    }
}

/// One rendered item of the conversation, tagged by kind for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    User { text: String },
    Summary { text: String },
    Reply { text: String, source: ReplySource },
    Exercise { exercise: Exercise, text: String },
    EmotionalMap { tags: Vec<EmotionalTag>, markup: String },
    Emergency { markup: String },
    Plan { topic: Topic, text: String },
}

impl Entry {
    pub fn kind(&self) -> &'static str {
        match self {
            Entry::User { .. } => "user",
            Entry::Summary { .. } => "summary",
            Entry::Reply { .. } => "reply",
            Entry::Exercise { .. } => "exercise",
            Entry::EmotionalMap { .. } => "emotional_map",
            Entry::Emergency { .. } => "emergency",
            Entry::Plan { .. } => "plan",
        }
    }

    /// Rendered text or markup.
    pub fn text(&self) -> &str {
        match self {
            Entry::User { text }
            | Entry::Summary { text }
            | Entry::Reply { text, .. }
            | Entry::Exercise { text, .. }
            | Entry::Plan { text, .. } => text,
            Entry::EmotionalMap { markup, .. } | Entry::Emergency { markup } => markup,
        }
    }

    /// Text the user may save as a support phrase, with its archive tag.
    pub fn archivable(&self) -> Option<(&str, PhraseSource)> {
        match self {
            Entry::Reply { text, .. } => Some((text, PhraseSource::Bot)),
            Entry::Plan { text, .. } => Some((text, PhraseSource::Plan)),
            _ => None,
        }
    }
}

/// State of one interactive session. History only grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    id: Uuid,
    entries: Vec<Entry>,
    trackers: Vec<TopicTracker>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            entries: Vec::new(),
            trackers: Topic::ALL.into_iter().map(TopicTracker::new).collect(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Trackers in registration order.
    pub(crate) fn trackers_mut(&mut self) -> impl Iterator<Item = &mut TopicTracker> {
        self.trackers.iter_mut()
    }

    pub fn tracker_state(&self, topic: Topic) -> TrackerState {
        self.trackers
            .iter()
            .find(|t| t.topic() == topic)
            .map(TopicTracker::state)
            .unwrap_or(TrackerState::Untriggered)
    }

    /// Most recent entry the user can archive.
    pub fn last_archivable(&self) -> Option<(&str, PhraseSource)> {
        self.entries.iter().rev().find_map(Entry::archivable)
    }

    /// Most recently suggested exercise.
    pub fn last_exercise(&self) -> Option<Exercise> {
        self.entries.iter().rev().find_map(|e| match e {
            Entry::Exercise { exercise, .. } => Some(*exercise),
            _ => None,
        })
    }
}
