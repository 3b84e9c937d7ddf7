//! Statistics over the turn log.

use chrono::{DateTime, Local};
use std::fmt;
use wellness_core::{SleepBand, TurnRecord, WaterBand};

/// Rows shown in the "recent" section.
pub const RECENT_ROWS: usize = 5;
/// Characters of the message shown next to each recent row.
pub const PREVIEW_CHARS: usize = 80;

#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    /// Non-emergency check-ins.
    pub checkins: usize,
    pub emergencies: usize,
    pub mood_average: Option<f64>,
    pub mood_series: Vec<(DateTime<Local>, u8)>,
    /// Every band in scale order, with its count.
    pub sleep_counts: Vec<(&'static str, usize)>,
    pub water_counts: Vec<(&'static str, usize)>,
    pub recent: Vec<TurnRecord>,
}

impl StatsReport {
    /// Emergency rows are counted but excluded from mood and band figures.
    pub fn from_records(records: &[TurnRecord]) -> Self {
        let (emergency, regular): (Vec<&TurnRecord>, Vec<&TurnRecord>) =
            records.iter().partition(|r| r.is_emergency());

        let mood_series: Vec<(DateTime<Local>, u8)> = regular
            .iter()
            .filter_map(|r| r.mood.trim().parse::<u8>().ok().map(|m| (r.timestamp, m)))
            .collect();
        let mood_average = if mood_series.is_empty() {
            None
        } else {
            let sum: u32 = mood_series.iter().map(|(_, m)| u32::from(*m)).sum();
            Some(f64::from(sum) / mood_series.len() as f64)
        };

        let sleep_counts = SleepBand::ALL
            .into_iter()
            .map(|b| {
                let n = regular.iter().filter(|r| SleepBand::parse(&r.sleep) == Some(b)).count();
                (b.label(), n)
            })
            .collect();
        let water_counts = WaterBand::ALL
            .into_iter()
            .map(|b| {
                let n = regular.iter().filter(|r| WaterBand::parse(&r.water) == Some(b)).count();
                (b.label(), n)
            })
            .collect();

        let skip = records.len().saturating_sub(RECENT_ROWS);
        Self {
            checkins: regular.len(),
            emergencies: emergency.len(),
            mood_average,
            mood_series,
            sleep_counts,
            water_counts,
            recent: records[skip..].to_vec(),
        }
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📊 Στατιστικά")?;
        writeln!(f, "Καταγραφές: {} (έκτακτες: {})", self.checkins, self.emergencies)?;
        match self.mood_average {
            Some(avg) => writeln!(f, "Μέση διάθεση: {:.1}/100", avg)?,
            None => writeln!(f, "Μέση διάθεση: -")?,
        }
        writeln!(f, "Ύπνος: {}", band_line(&self.sleep_counts))?;
        writeln!(f, "Νερό: {}", band_line(&self.water_counts))?;
        if !self.recent.is_empty() {
            writeln!(f, "Τελευταίες καταγραφές:")?;
            for r in &self.recent {
                writeln!(
                    f,
                    "  {} | διάθεση {} | ύπνος {} | νερό {} | {}",
                    r.timestamp.format("%Y-%m-%d %H:%M"),
                    r.mood,
                    r.sleep,
                    r.water,
                    preview(&r.text)
                )?;
            }
        }
        Ok(())
    }
}

/// First [`PREVIEW_CHARS`] characters, on one line.
fn preview(text: &str) -> String {
    text.chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

fn band_line(counts: &[(&str, usize)]) -> String {
    counts
        .iter()
        .map(|(label, n)| format!("{}: {}", label, n))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellness_core::Turn;

    fn record(mood: u8, sleep: Option<SleepBand>, water: Option<WaterBand>) -> TurnRecord {
        TurnRecord::from_turn(&Turn::new(mood, sleep, water, "x").unwrap())
    }

    #[test]
    fn emergencies_are_excluded_from_mood_and_bands() {
        let turn = Turn::new(10, Some(SleepBand::ZeroToTwo), None, "x").unwrap();
        let records = vec![
            record(30, Some(SleepBand::ThreeToFive), Some(WaterBand::None)),
            record(70, Some(SleepBand::SixToEight), Some(WaterBand::None)),
            TurnRecord::emergency(&turn),
        ];
        let report = StatsReport::from_records(&records);
        assert_eq!(report.checkins, 2);
        assert_eq!(report.emergencies, 1);
        assert_eq!(report.mood_average, Some(50.0));
        assert_eq!(report.sleep_counts, vec![("0–2", 0), ("3–5", 1), ("6–8", 1), ("9+", 0)]);
        assert_eq!(report.water_counts[0], ("0", 2));
        assert_eq!(report.recent.len(), 3);
    }

    #[test]
    fn recent_keeps_the_last_rows_only() {
        let records: Vec<TurnRecord> = (0..8).map(|i| record(i * 10, None, None)).collect();
        let report = StatsReport::from_records(&records);
        assert_eq!(report.recent.len(), RECENT_ROWS);
        assert_eq!(report.recent[0].mood, "30");
        assert!(report.to_string().contains("Μέση διάθεση: 35.0/100"));
    }

    #[test]
    fn recent_rows_show_a_short_message_preview() {
        let long = "α".repeat(PREVIEW_CHARS + 20);
        let records = vec![
            TurnRecord::from_turn(&Turn::new(60, None, None, "σύντομο\nμήνυμα").unwrap()),
            TurnRecord::from_turn(&Turn::new(60, None, None, long.as_str()).unwrap()),
        ];
        let out = StatsReport::from_records(&records).to_string();
        assert!(out.contains("| σύντομο μήνυμα\n"));
        assert!(out.contains(&format!("| {}\n", "α".repeat(PREVIEW_CHARS))));
        assert!(!out.contains(&"α".repeat(PREVIEW_CHARS + 1)));
    }

    #[test]
    fn empty_log_renders_without_average() {
        let report = StatsReport::from_records(&[]);
        assert_eq!(report.mood_average, None);
        assert!(report.to_string().contains("Μέση διάθεση: -"));
    }
}
