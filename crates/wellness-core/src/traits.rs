//! Write-only collaborators the pipeline hands data to.

use crate::error::SinkError;
use crate::session::PhraseSource;
use crate::shared::Turn;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Marker written in place of mood and bands for an emergency turn.
pub const EMERGENCY_MARKER: &str = "EMERGENCY";
pub const ABSENT_BAND: &str = "-";

/// One row of the durable turn log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub timestamp: DateTime<Local>,
    pub mood: String,
    pub sleep: String,
    pub water: String,
    pub text: String,
}

impl TurnRecord {
    pub fn from_turn(turn: &Turn) -> Self {
        Self {
            timestamp: Local::now(),
            mood: turn.mood().to_string(),
            sleep: turn.sleep().map(|b| b.label()).unwrap_or(ABSENT_BAND).to_string(),
            water: turn.water().map(|b| b.label()).unwrap_or(ABSENT_BAND).to_string(),
            text: turn.text().to_string(),
        }
    }

    /// Emergency turns keep the text but not the categorical inputs.
    pub fn emergency(turn: &Turn) -> Self {
        Self {
            timestamp: Local::now(),
            mood: EMERGENCY_MARKER.to_string(),
            sleep: ABSENT_BAND.to_string(),
            water: ABSENT_BAND.to_string(),
            text: turn.text().to_string(),
        }
    }

    pub fn is_emergency(&self) -> bool {
        self.mood == EMERGENCY_MARKER
    }
}

/// Append-only store of turns. Implementations must not interleave concurrent rows.
pub trait TurnSink: Send + Sync {
    fn append(&self, record: &TurnRecord) -> Result<(), SinkError>;
}

/// Archive for support phrases the user chooses to keep.
pub trait PhraseSink: Send + Sync {
    fn save(&self, text: &str, source: PhraseSource) -> Result<(), SinkError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{SleepBand, WaterBand};

    #[test]
    fn records_use_band_labels_and_emergency_marker() {
        let turn = Turn::new(50, Some(SleepBand::SixToEight), None, "κείμενο").unwrap();
        let r = TurnRecord::from_turn(&turn);
        assert_eq!((r.mood.as_str(), r.sleep.as_str(), r.water.as_str()), ("50", "6–8", "-"));
        assert!(!r.is_emergency());

        let turn = Turn::new(10, Some(SleepBand::ZeroToTwo), Some(WaterBand::None), "κείμενο").unwrap();
        let e = TurnRecord::emergency(&turn);
        assert!(e.is_emergency());
        assert_eq!((e.sleep.as_str(), e.water.as_str()), ("-", "-"));
    }
}
