//! OpenRouter reply generator: one OpenAI-compatible `chat/completions` call per turn.
//!
//! The HTTP client carries the timeout. No retries here; the orchestrator falls back on any error.

use crate::config::{
    api_key_from_env, WellnessConfig, DEFAULT_LLM_API_BASE, DEFAULT_LLM_MODEL,
    DEFAULT_LLM_TIMEOUT_SECS,
};
use crate::error::GenerationError;
use crate::reply::{GenerationRequest, ReplyGenerator};
use crate::shared::UserProfile;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const SYSTEM_PROMPT: &str = "Είσαι ένας ζεστός, υποστηρικτικός ψηφιακός συνοδοιπόρος \
για φοιτητές/νέους ενήλικες. Δεν κάνεις διαγνώσεις, δεν υπόσχεσαι θεραπεία, \
δεν αντικαθιστάς ψυχολόγο. Βοηθάς τον χρήστη να ονομάσει τα συναισθήματά του, \
να τα κανονικοποιήσει και να σκεφτεί πολύ μικρά, ρεαλιστικά βήματα.";

const REPLY_INSTRUCTIONS: &str = "Γράψε μία σύντομη, ζεστή, υποστηρικτική απάντηση 4–7 προτάσεων, \
σε απλά ελληνικά, χωρίς να δίνεις διαγνώσεις ή ιατρικές οδηγίες. \
Χρησιμοποίησε ψυχοεκπαιδευτικό ύφος (CBT/mindfulness), με έμφαση στην αποδοχή, \
στην οριοθέτηση και στα μικρά πρακτικά βήματα.";

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

fn or_dash(s: &str) -> &str {
    let s = s.trim();
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

fn profile_snippet(profile: &UserProfile) -> String {
    format!(
        "\n\n[Πληροφορίες προφίλ]\nΡόλος: {}\nΒασικό θέμα: {}\nΕστίαση: {}\n",
        or_dash(&profile.context),
        or_dash(&profile.main_struggles),
        or_dash(&profile.main_goals),
    )
}

/// Day-data prompt sent as the user message.
pub fn build_user_prompt(request: &GenerationRequest<'_>) -> String {
    let snippet = request.profile.map(profile_snippet).unwrap_or_default();
    format!(
        "[Στοιχεία ημέρας]\n\
         - Διάθεση (0–100): {}\n\
         - Ύπνος (ώρες κατηγορία): {}\n\
         - Νερό (ποτήρια κατηγορία): {}\n\
         - Κείμενο χρήστη: {}\n\
         {}\n{}",
        request.mood,
        request.sleep.map(|b| b.label()).unwrap_or("-"),
        request.water.map(|b| b.label()).unwrap_or("-"),
        request.text,
        snippet,
        REPLY_INSTRUCTIONS,
    )
}

pub struct OpenRouterGenerator {
    api_key: String,
    api_base: String,
    model: String,
    client: reqwest::Client,
}

impl OpenRouterGenerator {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key: api_key.trim().to_string(),
            api_base: DEFAULT_LLM_API_BASE.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            client: build_client(DEFAULT_LLM_TIMEOUT_SECS),
        }
    }

    /// Generator for the loaded config. `None` when disabled or no API key is set.
    pub fn from_config(config: &WellnessConfig) -> Option<Self> {
        if !config.llm_enabled {
            return None;
        }
        let key = api_key_from_env()?;
        Some(
            Self::new(key)
                .with_model(&config.llm_model)
                .with_api_base(&config.llm_api_base)
                .with_timeout(Duration::from_secs(config.llm_timeout_secs)),
        )
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(timeout.as_secs().max(1));
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

fn build_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[async_trait::async_trait]
impl ReplyGenerator for OpenRouterGenerator {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GenerationError> {
        if self.api_key.is_empty() {
            return Err(GenerationError::NotConfigured);
        }
        let url = format!("{}/chat/completions", self.api_base);
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_user_prompt(request),
                },
            ],
            temperature: Some(0.7),
            max_tokens: Some(600),
        };

        debug!(target: "wellness::openrouter", model = %self.model, "requesting reply");
        let res = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("X-Title", "Wellness-Checkin")
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        let raw = res.text().await?;
        if !status.is_success() {
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body: raw,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&raw).map_err(|e| GenerationError::Malformed(e.to_string()))?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();
        if text.is_empty() {
            return Err(GenerationError::Empty);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{SleepBand, Turn, WaterBand};

    #[test]
    fn user_prompt_carries_day_data() {
        let turn = Turn::new(30, Some(SleepBand::ZeroToTwo), None, "κουράστηκα").unwrap();
        let prompt = build_user_prompt(&GenerationRequest::new(&turn, None));
        assert!(prompt.contains("Διάθεση (0–100): 30"));
        assert!(prompt.contains("Ύπνος (ώρες κατηγορία): 0–2"));
        assert!(prompt.contains("Νερό (ποτήρια κατηγορία): -"));
        assert!(prompt.contains("Κείμενο χρήστη: κουράστηκα"));
        assert!(!prompt.contains("Πληροφορίες προφίλ"));
    }

    #[test]
    fn profile_snippet_only_for_non_blank_profile() {
        let turn = Turn::new(70, None, Some(WaterBand::FourToSix), "ok").unwrap();
        let profile = UserProfile {
            context: "φοιτήτρια ψυχολογίας".to_string(),
            main_goals: "ισορροπία".to_string(),
            ..Default::default()
        };
        let prompt = build_user_prompt(&GenerationRequest::new(&turn, Some(&profile)));
        assert!(prompt.contains("Ρόλος: φοιτήτρια ψυχολογίας"));
        assert!(prompt.contains("Βασικό θέμα: -"));
        assert!(prompt.contains("Εστίαση: ισορροπία"));

        let blank = UserProfile::default();
        let prompt = build_user_prompt(&GenerationRequest::new(&turn, Some(&blank)));
        assert!(!prompt.contains("Πληροφορίες προφίλ"));
    }

    #[test]
    fn disabled_config_has_no_generator() {
        let cfg = WellnessConfig {
            llm_enabled: false,
            ..Default::default()
        };
        assert!(OpenRouterGenerator::from_config(&cfg).is_none());
    }
}
