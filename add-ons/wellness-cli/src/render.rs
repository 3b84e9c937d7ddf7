//! Terminal rendering of session entries.

use wellness_core::{Entry, ReplySource};

/// Plain-text rendering of one entry. `None` for an emotional map with no tags.
pub fn render_entry(entry: &Entry) -> Option<String> {
    let out = match entry {
        Entry::User { text } => format!("🧑 {}", text),
        Entry::Summary { text } => format!("🤖 {}", text),
        Entry::Reply { text, source } => match source {
            ReplySource::Generated => format!("💬 {}", text),
            ReplySource::Fallback => format!("💬 {} (σύντομη απάντηση χωρίς σύνδεση)", text),
        },
        Entry::Exercise { exercise, text } => {
            format!("🧘 {}\n   Όταν την ολοκληρώσεις: /done {}", text, exercise.id())
        }
        Entry::EmotionalMap { tags, .. } => {
            if tags.is_empty() {
                return None;
            }
            let pills = tags
                .iter()
                .map(|t| format!("[{} {}]", t.icon, t.label))
                .collect::<Vec<_>>()
                .join(" ");
            format!("🧠 Συναίσθημα ημέρας: {}", pills)
        }
        Entry::Emergency { markup } => strip_markup(markup),
        Entry::Plan { text, .. } => format!("📝 Προτεινόμενο πλάνο\n{}", text.replace("**", "")),
    };
    Some(out)
}

/// Drops tags, turning line-level tags into line breaks and list items into bullets.
pub fn strip_markup(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let Some(end) = rest[start..].find('>') else {
            rest = &rest[start..];
            break;
        };
        let tag = rest[start + 1..start + end].trim().to_ascii_lowercase();
        if tag.starts_with("li") {
            out.push_str("\n  • ");
        } else if tag.starts_with("br") || tag.starts_with("/ul") || tag.starts_with("/div") {
            out.push('\n');
        }
        rest = &rest[start + end + 1..];
    }
    out.push_str(rest);
    out.lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellness_core::{emergency_message, EmotionalTag};

    #[test]
    fn emergency_markup_becomes_readable_text() {
        let text = strip_markup(&emergency_message());
        assert!(!text.contains('<'));
        assert!(text.contains("• 1018"));
        assert!(text.contains("δεν αντικαθιστά υπηρεσίες έκτακτης ανάγκης"));
    }

    #[test]
    fn empty_map_is_not_rendered() {
        let empty = Entry::EmotionalMap {
            tags: vec![],
            markup: String::new(),
        };
        assert_eq!(render_entry(&empty), None);
        let one = Entry::EmotionalMap {
            tags: vec![EmotionalTag {
                icon: "💤".to_string(),
                label: "Κούραση".to_string(),
            }],
            markup: String::new(),
        };
        assert_eq!(render_entry(&one).unwrap(), "🧠 Συναίσθημα ημέρας: [💤 Κούραση]");
    }
}
