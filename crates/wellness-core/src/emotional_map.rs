//! Emotional map: a few (icon, label) tags describing the day, rendered as a small card.
//!
//! Order is fixed: one mood tag, then the text groups in scan order (anxiety, pressure,
//! fatigue, hope, loneliness), then the body-care tags for low sleep and low water.
//! Duplicates by label are dropped keeping the first, then the list is cut to the cap.
//! Whatever falls past the cap is dropped, not re-ranked.

use crate::lexicon::{Normalized, ANXIETY, FATIGUE, HOPE, LONELINESS, PRESSURE};
use crate::shared::{SleepBand, WaterBand};
use serde::{Deserialize, Serialize};

/// Default maximum number of tags per map.
pub const DEFAULT_TAG_CAP: usize = 4;

pub const LABEL_REST: &str = "Ανάγκη για ξεκούραση";
pub const LABEL_BODY_CARE: &str = "Ανάγκη για φροντίδα σώματος";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalTag {
    pub icon: String,
    pub label: String,
}

impl EmotionalTag {
    fn new(icon: &str, label: &str) -> Self {
        Self {
            icon: icon.to_string(),
            label: label.to_string(),
        }
    }
}

fn mood_tag(mood: u8) -> EmotionalTag {
    match mood {
        0..=20 => EmotionalTag::new("💙", "Θλίψη"),
        21..=40 => EmotionalTag::new("😕", "Αναστάτωση"),
        41..=60 => EmotionalTag::new("😐", "Αβεβαιότητα"),
        61..=80 => EmotionalTag::new("🙂", "Ήπια ηρεμία"),
        _ => EmotionalTag::new("😄", "Θετική διάθεση"),
    }
}

/// Tags for the turn, capped at [`DEFAULT_TAG_CAP`].
pub fn extract_emotional_tags(
    mood: u8,
    sleep: Option<SleepBand>,
    water: Option<WaterBand>,
    text: &str,
) -> Vec<EmotionalTag> {
    extract_emotional_tags_capped(mood, sleep, water, &Normalized::new(text), DEFAULT_TAG_CAP)
}

pub(crate) fn extract_emotional_tags_capped(
    mood: u8,
    sleep: Option<SleepBand>,
    water: Option<WaterBand>,
    text: &Normalized,
    cap: usize,
) -> Vec<EmotionalTag> {
    let mut tags = vec![mood_tag(mood)];

    let text_groups = [
        (&*ANXIETY, "😟", "Άγχος"),
        (&*PRESSURE, "🟠", "Πίεση"),
        (&*FATIGUE, "💤", "Κούραση"),
        (&*HOPE, "💛", "Ελπίδα"),
        (&*LONELINESS, "🤍", "Μοναξιά"),
    ];
    for (group, icon, label) in text_groups {
        if group.matches(text) {
            tags.push(EmotionalTag::new(icon, label));
        }
    }

    if sleep.is_some_and(SleepBand::is_low) {
        tags.push(EmotionalTag::new("💛", LABEL_REST));
    }
    if water.is_some_and(WaterBand::is_low) {
        tags.push(EmotionalTag::new("💧", LABEL_BODY_CARE));
    }

    let mut unique: Vec<EmotionalTag> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !unique.iter().any(|t| t.label == tag.label) {
            unique.push(tag);
        }
    }
    unique.truncate(cap);
    unique
}

/// Wraps tags as a card. Empty input yields an empty string (no card).
pub fn render_emotional_map(tags: &[EmotionalTag]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let pills = tags
        .iter()
        .map(|t| format!("<span class='emotion-pill'>{} {}</span>", t.icon, t.label))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "<div class=\"emotion-map-card\">\
         <div class=\"emotion-map-title\">🧠 Συναίσθημα ημέρας:</div>\
         <div class=\"emotion-map-tags\">{}</div>\
         </div>",
        pills
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(tags: &[EmotionalTag]) -> Vec<&str> {
        tags.iter().map(|t| t.label.as_str()).collect()
    }

    #[test]
    fn exam_anxiety_on_a_bad_day() {
        let tags = extract_emotional_tags(
            10,
            Some(SleepBand::ZeroToTwo),
            Some(WaterBand::None),
            "Έχω πολύ άγχος με τις εξετάσεις",
        );
        assert_eq!(labels(&tags), vec!["Θλίψη", "Άγχος", LABEL_REST, LABEL_BODY_CARE]);
    }

    #[test]
    fn later_groups_are_dropped_past_the_cap() {
        let tags = extract_emotional_tags(
            50,
            Some(SleepBand::ZeroToTwo),
            Some(WaterBand::None),
            "άγχος, πίεση, κούραση, ελπίδα και μοναξιά",
        );
        assert_eq!(tags.len(), DEFAULT_TAG_CAP);
        assert_eq!(labels(&tags), vec!["Αβεβαιότητα", "Άγχος", "Πίεση", "Κούραση"]);
    }

    #[test]
    fn mood_ranges_pick_exactly_one_mood_tag() {
        let cases = [
            (0, "Θλίψη"),
            (20, "Θλίψη"),
            (21, "Αναστάτωση"),
            (40, "Αναστάτωση"),
            (60, "Αβεβαιότητα"),
            (80, "Ήπια ηρεμία"),
            (81, "Θετική διάθεση"),
            (100, "Θετική διάθεση"),
        ];
        for (mood, label) in cases {
            let tags = extract_emotional_tags(mood, None, None, "τίποτα ιδιαίτερο");
            assert_eq!(labels(&tags), vec![label], "mood {}", mood);
        }
    }

    #[test]
    fn labels_are_unique_and_capped_for_any_cap() {
        let text = Normalized::new("άγχος άγχος πίεση πολλά κούραση εξάντληση");
        for cap in 0..6 {
            let tags = extract_emotional_tags_capped(
                10,
                Some(SleepBand::ThreeToFive),
                Some(WaterBand::OneToThree),
                &text,
                cap,
            );
            assert!(tags.len() <= cap);
            let seen: std::collections::HashSet<&str> = labels(&tags).into_iter().collect();
            assert_eq!(seen.len(), tags.len());
        }
    }

    #[test]
    fn render_is_empty_without_tags() {
        assert_eq!(render_emotional_map(&[]), "");
        let html = render_emotional_map(&extract_emotional_tags(90, None, None, "ελπίζω"));
        assert!(html.contains("emotion-map-card"));
        assert!(html.contains("😄 Θετική διάθεση"));
        assert!(html.contains("💛 Ελπίδα"));
    }
}
