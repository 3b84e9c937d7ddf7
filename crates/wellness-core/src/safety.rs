//! Safety filter: the highest-priority check of every turn.
//!
//! Best-effort lexical net over the crisis keyword group. A miss is a silent false
//! negative; there is no second classifier behind it.

use crate::lexicon::{Normalized, CRISIS};

/// Crisis hotlines shown in the emergency message (number, description).
pub const HOTLINES: &[(&str, &str)] = &[
    ("1018", "Γραμμή Παρέμβασης για την Αυτοκτονία (24/7)"),
    ("112", "Ευρωπαϊκός αριθμός έκτακτης ανάγκης"),
    ("10306", "Γραμμή Ψυχοκοινωνικής Υποστήριξης"),
];

/// True when the text contains crisis language.
pub fn is_emergency(text: &str) -> bool {
    is_emergency_normalized(&Normalized::new(text))
}

pub(crate) fn is_emergency_normalized(text: &Normalized) -> bool {
    CRISIS.matches(text)
}

/// Fixed, non-personalized safety message (markup).
pub fn emergency_message() -> String {
    let lines: String = HOTLINES
        .iter()
        .map(|(number, label)| format!("<li><strong>{}</strong> – {}</li>", number, label))
        .collect::<Vec<_>>()
        .join("");
    format!(
        "<div class=\"emergency-box\">\
         <strong>⚠️ Αυτό που γράφεις είναι πολύ σημαντικό.</strong><br>\
         Δεν είσαι μόνος/η και αξίζεις άμεση, ανθρώπινη βοήθεια. \
         Αυτή η εφαρμογή δεν αντικαθιστά υπηρεσίες έκτακτης ανάγκης, ψυχολόγο ή ψυχίατρο.<br>\
         Αν κινδυνεύεις τώρα, κάλεσε αμέσως:\
         <ul>{}</ul>\
         Αν μπορείς, μίλησε και σε ένα πρόσωπο που εμπιστεύεσαι αυτή τη στιγμή.\
         </div>",
        lines
    )
}
