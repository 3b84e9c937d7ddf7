//! Interactive terminal check-in.
//!
//! Each round asks for mood, sleep, water and a few words about the day, then prints the
//! assistant's entries. Commands at the mood prompt: `/save`, `/done [id]`, `/stats`,
//! `/history`, `/profile`, `/phrases`, `/quit`.

mod render;

use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wellness_core::{
    CheckinPipeline, MoodScale, OpenRouterGenerator, PhraseSink, PhraseSource, SessionState,
    SleepBand, Turn, UserProfile, WaterBand, WellnessConfig,
};
use wellness_store::{SavedPhrase, WellnessHistory, WellnessStores};

type Input = Lines<BufReader<Stdin>>;
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Saved phrases listed by `/phrases`.
const PHRASES_SHOWN: usize = 10;
/// Typed at a field prompt to empty the field.
const CLEAR_FIELD: &str = "-";

enum Command {
    Save,
    Done(Option<String>),
    Stats,
    History,
    Profile,
    Phrases,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.trim().splitn(2, char::is_whitespace);
    let cmd = match parts.next()? {
        "/save" => Command::Save,
        "/done" => {
            let id = parts.next().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
            Command::Done(id)
        }
        "/stats" => Command::Stats,
        "/history" => Command::History,
        "/profile" => Command::Profile,
        "/phrases" => Command::Phrases,
        "/quit" | "/q" => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}

/// Accepts 1–5 or one of the scale's emoji.
fn parse_mood(input: &str) -> Option<MoodScale> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| MoodScale::ALL.get(i).copied());
    }
    MoodScale::from_emoji(input)
}

async fn ask(lines: &mut Input, prompt: &str) -> Result<Option<String>, BoxError> {
    print!("{} ", prompt);
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?)
}

/// Empty answer keeps the field, [`CLEAR_FIELD`] empties it, anything else replaces it.
fn apply_answer(field: &mut String, answer: &str) {
    match answer.trim() {
        "" => {}
        CLEAR_FIELD => field.clear(),
        text => *field = text.to_string(),
    }
}

fn history_fields(h: &mut WellnessHistory) -> Vec<(&'static str, &mut String)> {
    vec![
        ("Από πότε νιώθεις έτσι", &mut h.since_when),
        ("Τι σε απασχολεί περισσότερο", &mut h.main_concerns),
        ("Τι θα ήθελες να αλλάξει", &mut h.desired_changes),
        ("Τι έχεις δοκιμάσει ήδη", &mut h.tried_before),
        ("Πηγές πίεσης", &mut h.stressors),
        ("Συναισθηματικά μοτίβα", &mut h.emotional_patterns),
        ("Σημειώσεις για θεραπευτή", &mut h.notes_for_therapist),
    ]
}

/// Only the fields that reach the reply generator's prompt.
fn profile_fields(p: &mut UserProfile) -> Vec<(&'static str, &mut String)> {
    vec![
        ("Ρόλος ή πλαίσιο ζωής", &mut p.context),
        ("Στόχοι", &mut p.main_goals),
        ("Δυσκολίες", &mut p.main_struggles),
    ]
}

/// Shows each field and reads a new value. `false` when input ended midway.
async fn edit_fields(
    lines: &mut Input,
    fields: Vec<(&'static str, &mut String)>,
) -> Result<bool, BoxError> {
    println!("(Enter κρατά την τιμή, {} τη σβήνει)", CLEAR_FIELD);
    for (label, field) in fields {
        let current = if field.is_empty() { CLEAR_FIELD } else { field.as_str() };
        println!("{}: {}", label, current);
        let Some(answer) = ask(lines, "→").await? else {
            return Ok(false);
        };
        apply_answer(field, &answer);
    }
    Ok(true)
}

fn phrase_source_label(source: &str) -> &'static str {
    if source == PhraseSource::Plan.as_str() {
        "πλάνο δράσης"
    } else {
        "μήνυμα bot"
    }
}

/// Most recent phrases first.
fn recent_phrases(mut phrases: Vec<SavedPhrase>) -> Vec<SavedPhrase> {
    phrases.reverse();
    phrases.truncate(PHRASES_SHOWN);
    phrases
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[wellness] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = WellnessConfig::load()?;
    let stores = WellnessStores::open(&config.storage_path)?;
    let profile = match stores.profile.load() {
        Ok(p) => Some(p),
        Err(e) => {
            tracing::warn!(
                target: "wellness::cli",
                error = %e,
                "profile unreadable; continuing without it"
            );
            None
        }
    };

    let mut pipeline = CheckinPipeline::new(config.clone())
        .with_turn_sink(stores.turn_log.clone())
        .with_profile(profile);
    if let Some(generator) = OpenRouterGenerator::from_config(&config) {
        tracing::info!(
            target: "wellness::cli",
            model = generator.model(),
            "reply generator enabled"
        );
        pipeline = pipeline.with_generator(Box::new(generator));
    }

    let mut session = SessionState::new();
    tracing::info!(
        target: "wellness::cli",
        session = %session.id(),
        storage_path = %stores.root().display(),
        generator = pipeline.has_generator(),
        "check-in session started"
    );

    println!("🧠 Καλώς ήρθες. Πώς είσαι σήμερα;");
    println!("Εντολές: /save (κράτα την τελευταία φράση), /done [άσκηση], /stats");
    println!("         /history (ιστορικό ευεξίας), /profile, /phrases, /quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let scale = MoodScale::ALL
        .iter()
        .enumerate()
        .map(|(i, m)| format!("{}={}", i + 1, m.emoji()))
        .collect::<Vec<_>>()
        .join(" ");

    loop {
        let Some(line) = ask(&mut lines, &format!("\nΔιάθεση ({}):", scale)).await? else {
            break;
        };
        if let Some(cmd) = parse_command(&line) {
            match cmd {
                Command::Quit => break,
                Command::Save => save_phrase(&stores, &session),
                Command::Done(id) => mark_done(&stores, &session, id.as_deref()),
                Command::Stats => match stores.stats() {
                    Ok(report) => {
                        print!("{}", report);
                        if let Ok(counts) = stores.exercises.counts() {
                            for (label, n) in counts {
                                println!("  {}: {}", label, n);
                            }
                        }
                    }
                    Err(e) => println!("Δεν μπόρεσα να διαβάσω τα στατιστικά: {}", e),
                },
                Command::History => {
                    if !edit_history(&stores, &mut lines).await? {
                        break;
                    }
                }
                Command::Profile => {
                    if !edit_profile(&stores, &mut pipeline, &mut lines).await? {
                        break;
                    }
                }
                Command::Phrases => list_phrases(&stores),
            }
            continue;
        }
        let Some(mood) = parse_mood(&line) else {
            println!("Διάλεξε έναν αριθμό από 1 έως 5.");
            continue;
        };

        let Some(sleep) = ask(&mut lines, "Ύπνος [0–2, 3–5, 6–8, 9+]:").await? else {
            break;
        };
        let Some(water) = ask(&mut lines, "Νερό σε ποτήρια [0, 1–3, 4–6, 7+]:").await? else {
            break;
        };

        let turn = loop {
            let Some(text) = ask(&mut lines, "Πες μου λίγα λόγια για τη μέρα σου:").await? else {
                return Ok(());
            };
            let (sleep, water) = (SleepBand::parse(&sleep), WaterBand::parse(&water));
            match Turn::new(mood.score(), sleep, water, text) {
                Ok(turn) => break turn,
                Err(_) => println!("Γράψε κάτι, έστω και μία λέξη."),
            }
        };

        let before = session.entries().len();
        pipeline.process_turn(&mut session, &turn).await;
        for entry in &session.entries()[before..] {
            if let Some(text) = render::render_entry(entry) {
                println!("\n{}", text);
            }
        }
    }

    println!("Να προσέχεις τον εαυτό σου. 💛");
    Ok(())
}

fn save_phrase(stores: &WellnessStores, session: &SessionState) {
    let Some((text, source)) = session.last_archivable() else {
        println!("Δεν υπάρχει ακόμη φράση για αποθήκευση.");
        return;
    };
    match stores.phrases.save(text, source) {
        Ok(()) => println!("💾 Αποθηκεύτηκε στις φράσεις στήριξης."),
        Err(e) => tracing::warn!(target: "wellness::cli", error = %e, "support phrase not saved"),
    }
}

async fn edit_history(stores: &WellnessStores, lines: &mut Input) -> Result<bool, BoxError> {
    let mut history = stores.history.load();
    println!("📜 Ιστορικό ευεξίας");
    if let Some(at) = history.last_updated {
        println!("Τελευταία ενημέρωση: {}", at.format("%Y-%m-%d %H:%M"));
    }
    if !edit_fields(lines, history_fields(&mut history)).await? {
        return Ok(false);
    }
    match stores.history.save(&mut history) {
        Ok(()) => println!("💾 Το ιστορικό αποθηκεύτηκε."),
        Err(e) => println!("Δεν αποθηκεύτηκε: {}", e),
    }
    Ok(true)
}

/// Saves the edited profile and hands it to the pipeline for the following turns.
async fn edit_profile(
    stores: &WellnessStores,
    pipeline: &mut CheckinPipeline,
    lines: &mut Input,
) -> Result<bool, BoxError> {
    let mut profile = match stores.profile.load() {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(
                target: "wellness::cli",
                error = %e,
                "profile unreadable; editing a blank one"
            );
            UserProfile::default()
        }
    };
    println!("👤 Προφίλ");
    if !edit_fields(lines, profile_fields(&mut profile)).await? {
        return Ok(false);
    }
    match stores.profile.save(&profile) {
        Ok(()) => println!("💾 Το προφίλ αποθηκεύτηκε."),
        Err(e) => println!("Δεν αποθηκεύτηκε: {}", e),
    }
    tracing::info!(target: "wellness::cli", blank = profile.is_blank(), "profile updated");
    pipeline.set_profile(Some(profile));
    Ok(true)
}

fn list_phrases(stores: &WellnessStores) {
    let phrases = match stores.phrases.list() {
        Ok(p) => recent_phrases(p),
        Err(e) => {
            println!("Δεν μπόρεσα να διαβάσω τις φράσεις: {}", e);
            return;
        }
    };
    if phrases.is_empty() {
        println!("Δεν έχεις αποθηκεύσει ακόμη φράσεις.");
        return;
    }
    println!("⭐ Φράσεις στήριξης");
    for phrase in phrases {
        let label = phrase_source_label(&phrase.source);
        println!("  [{} · {}] {}", phrase.timestamp, label, phrase.text);
    }
}

fn mark_done(stores: &WellnessStores, session: &SessionState, id: Option<&str>) {
    let result = match id {
        Some(id) => stores.exercises.record_id(id),
        None => match session.last_exercise() {
            Some(exercise) => stores.exercises.record(exercise).map(|()| exercise),
            None => {
                println!("Δεν έχει προταθεί ακόμη άσκηση.");
                return;
            }
        },
    };
    match result {
        Ok(exercise) => println!("✅ Μπράβο! Καταγράφηκε: {}", exercise.title()),
        Err(e) => println!("Δεν καταγράφηκε: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_accepts_numbers_and_emoji() {
        assert_eq!(parse_mood("1"), Some(MoodScale::Down));
        assert_eq!(parse_mood(" 5 "), Some(MoodScale::Great));
        assert_eq!(parse_mood("🙂"), Some(MoodScale::Okay));
        assert_eq!(parse_mood("0"), None);
        assert_eq!(parse_mood("6"), None);
        assert_eq!(parse_mood("καλά"), None);
    }

    #[test]
    fn commands_parse_with_optional_argument() {
        assert!(matches!(parse_command("/done"), Some(Command::Done(None))));
        assert!(matches!(
            parse_command("/done thought_dump"),
            Some(Command::Done(Some(ref id))) if id == "thought_dump"
        ));
        assert!(matches!(parse_command("/q"), Some(Command::Quit)));
        assert!(matches!(parse_command(" /history "), Some(Command::History)));
        assert!(matches!(parse_command("/profile"), Some(Command::Profile)));
        assert!(matches!(parse_command("/phrases"), Some(Command::Phrases)));
        assert!(parse_command("3").is_none());
    }

    #[test]
    fn answers_keep_replace_or_clear_a_field() {
        let mut field = "εξεταστική".to_string();
        apply_answer(&mut field, "  ");
        assert_eq!(field, "εξεταστική");
        apply_answer(&mut field, " δουλειά ");
        assert_eq!(field, "δουλειά");
        apply_answer(&mut field, CLEAR_FIELD);
        assert!(field.is_empty());
    }

    #[test]
    fn field_editors_write_through_to_the_records() {
        let mut history = WellnessHistory::default();
        let fields = history_fields(&mut history);
        assert_eq!(fields.len(), 7);
        for (_, field) in fields {
            apply_answer(field, "κάτι");
        }
        assert_eq!(history.notes_for_therapist, "κάτι");
        assert!(!history.is_empty());

        let mut profile = UserProfile::default();
        for (label, field) in profile_fields(&mut profile) {
            if label == "Δυσκολίες" {
                apply_answer(field, "άγχος εξετάσεων");
            }
        }
        assert_eq!(profile.main_struggles, "άγχος εξετάσεων");
        assert!(!profile.is_blank());
    }

    #[test]
    fn phrases_are_listed_newest_first_with_source_labels() {
        let phrases: Vec<SavedPhrase> = (0..12)
            .map(|i| SavedPhrase {
                timestamp: format!("2025-03-{:02}T10:00:00", i + 1),
                source: if i % 2 == 0 { "plan" } else { "bot" }.to_string(),
                text: format!("φράση {}", i),
            })
            .collect();
        let shown = recent_phrases(phrases);
        assert_eq!(shown.len(), PHRASES_SHOWN);
        assert_eq!(shown[0].text, "φράση 11");
        assert_eq!(shown[9].text, "φράση 2");
        assert_eq!(phrase_source_label(&shown[0].source), "μήνυμα bot");
        assert_eq!(phrase_source_label(&shown[1].source), "πλάνο δράσης");
    }
}
