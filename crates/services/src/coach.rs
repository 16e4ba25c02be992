use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::CoachError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub const GREETING: &str = "At ease, soldier! I am your Centurion AI Coach. \
                            How can I help today? Questions about form, soreness or nutrition?";
pub const FALLBACK_REPLY: &str = "I could not come up with an answer.";
pub const ERROR_REPLY: &str = "Lost contact with headquarters (API error).";

fn system_instruction(stats: &str) -> String {
    format!(
        "You are the Centurion AI Coach, an expert in calisthenics and push-ups.\n\
         Your goal is to get the user to 100 push-ups in a single set.\n\
         The user follows the \"Centurion Push-Up Architect\" program.\n\n\
         User context:\n{stats}\n\n\
         Be motivating, strict but fair (military style). Use short, clear sentences.\n\
         For injuries give general advice only and say that you are not a doctor.\n\
         For factual questions (for example world records) use Google Search."
    )
}

#[derive(Clone, Debug)]
pub struct CoachConfig {
    pub base_url: Url,
    pub api_key: String,
    pub model: String,
}

impl CoachConfig {
    /// Read the coach settings from `CENTURION_AI_*` variables.
    ///
    /// Returns `None` without an API key or with an unusable base URL.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("CENTURION_AI_API_KEY").ok()?;
        let base_url =
            env::var("CENTURION_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let model = env::var("CENTURION_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        Self::new(&base_url, api_key, model)
    }

    #[must_use]
    pub fn new(base_url: &str, api_key: String, model: String) -> Option<Self> {
        if api_key.trim().is_empty() || model.trim().is_empty() {
            return None;
        }
        let base_url = match Url::parse(base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => url,
            Ok(url) => {
                warn!(scheme = url.scheme(), "AI base URL must be http(s), coach disabled");
                return None;
            }
            Err(err) => {
                warn!(%err, "invalid AI base URL, coach disabled");
                return None;
            }
        };
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.as_str().trim_end_matches('/'),
            self.model
        )
    }
}

/// A source the answer was grounded on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub uri: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachReply {
    pub text: String,
    pub citations: Vec<Citation>,
}

/// Something that answers coaching questions.
#[async_trait]
pub trait CoachBackend: Send + Sync {
    fn enabled(&self) -> bool;

    /// Answer `query` for a user described by `stats`.
    ///
    /// # Errors
    ///
    /// Returns `CoachError` if the backend is disabled or the request fails.
    async fn ask(&self, query: &str, stats: &str) -> Result<CoachReply, CoachError>;
}

/// Gemini `generateContent` client with search grounding.
#[derive(Clone)]
pub struct GeminiCoach {
    client: Client,
    config: Option<CoachConfig>,
}

impl GeminiCoach {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(CoachConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<CoachConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl CoachBackend for GeminiCoach {
    fn enabled(&self) -> bool {
        self.config.is_some()
    }

    async fn ask(&self, query: &str, stats: &str) -> Result<CoachReply, CoachError> {
        let config = self.config.as_ref().ok_or(CoachError::Disabled)?;

        let response = self
            .client
            .post(config.endpoint())
            .header("x-goog-api-key", &config.api_key)
            .json(&GenerateRequest::new(query, stats))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CoachError::HttpStatus(response.status()));
        }

        let body: GenerateResponse = response.json().await?;
        reply_from_response(body)
    }
}

fn reply_from_response(body: GenerateResponse) -> Result<CoachReply, CoachError> {
    let candidate = body
        .candidates
        .into_iter()
        .next()
        .ok_or(CoachError::EmptyResponse)?;

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();
    let text = text.trim();

    let citations = candidate
        .grounding_metadata
        .map(|meta| {
            meta.grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web)
                .filter_map(|web| {
                    let uri = web.uri.filter(|uri| !uri.is_empty())?;
                    let title = web
                        .title
                        .filter(|title| !title.trim().is_empty())
                        .unwrap_or_else(|| uri.clone());
                    Some(Citation { uri, title })
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(CoachReply {
        text: if text.is_empty() {
            FALLBACK_REPLY.to_owned()
        } else {
            text.to_owned()
        },
        citations,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    tools: Vec<Tool>,
}

impl GenerateRequest {
    fn new(query: &str, stats: &str) -> Self {
        Self {
            system_instruction: Content::text(None, system_instruction(stats)),
            contents: vec![Content::text(Some("user"), query.to_owned())],
            tools: vec![Tool {
                google_search: EmptyObject {},
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&'static str>, text: String) -> Self {
        Self {
            role,
            parts: vec![Part { text }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: EmptyObject,
}

#[derive(Debug, Serialize)]
struct EmptyObject {}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Coach,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachMessage {
    pub speaker: Speaker,
    pub content: String,
    pub citations: Vec<Citation>,
}

impl CoachMessage {
    fn user(content: &str) -> Self {
        Self {
            speaker: Speaker::User,
            content: content.to_owned(),
            citations: Vec::new(),
        }
    }

    fn coach(content: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self {
            speaker: Speaker::Coach,
            content: content.into(),
            citations,
        }
    }
}

/// Conversation with the coach, opened by a greeting.
///
/// Backend failures turn into a coach message; `ask` never fails.
pub struct CoachSession {
    backend: Arc<dyn CoachBackend>,
    transcript: Vec<CoachMessage>,
}

impl CoachSession {
    #[must_use]
    pub fn new(backend: Arc<dyn CoachBackend>) -> Self {
        Self {
            backend,
            transcript: vec![CoachMessage::coach(GREETING, Vec::new())],
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.backend.enabled()
    }

    #[must_use]
    pub fn transcript(&self) -> &[CoachMessage] {
        &self.transcript
    }

    /// Send a question and return the coach's answer.
    ///
    /// Blank questions are ignored and return `None`.
    pub async fn ask(&mut self, query: &str, stats: &str) -> Option<&CoachMessage> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        self.transcript.push(CoachMessage::user(query));

        let answer = match self.backend.ask(query, stats).await {
            Ok(reply) => {
                debug!(citations = reply.citations.len(), "coach answered");
                CoachMessage::coach(reply.text, reply.citations)
            }
            Err(err) => {
                warn!(%err, "coach request failed");
                CoachMessage::coach(ERROR_REPLY, Vec::new())
            }
        };
        self.transcript.push(answer);
        self.transcript.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ScriptedCoach {
        replies: Mutex<Vec<Result<CoachReply, CoachError>>>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedCoach {
        fn new(replies: Vec<Result<CoachReply, CoachError>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CoachBackend for ScriptedCoach {
        fn enabled(&self) -> bool {
            true
        }

        async fn ask(&self, query: &str, stats: &str) -> Result<CoachReply, CoachError> {
            self.seen
                .lock()
                .unwrap()
                .push((query.to_owned(), stats.to_owned()));
            self.replies.lock().unwrap().remove(0)
        }
    }

    fn reply(text: &str) -> CoachReply {
        CoachReply {
            text: text.to_owned(),
            citations: Vec::new(),
        }
    }

    #[tokio::test]
    async fn session_starts_with_greeting_and_ignores_blank_questions() {
        let backend = Arc::new(ScriptedCoach::new(Vec::new()));
        let mut session = CoachSession::new(backend.clone());

        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].content, GREETING);
        assert!(session.ask("   ", "stats").await.is_none());
        assert_eq!(session.transcript().len(), 1);
        assert!(backend.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn answers_and_failures_land_in_transcript() {
        let backend = Arc::new(ScriptedCoach::new(vec![
            Ok(reply("Keep your elbows at 45 degrees.")),
            Err(CoachError::Disabled),
        ]));
        let mut session = CoachSession::new(backend.clone());
        let stats = "Max reps: 25, Phase: 2, Week: 5";

        let answer = session.ask("Elbows?", stats).await.unwrap();
        assert_eq!(answer.speaker, Speaker::Coach);
        assert_eq!(answer.content, "Keep your elbows at 45 degrees.");

        let failure = session.ask("Again?", stats).await.unwrap();
        assert_eq!(failure.content, ERROR_REPLY);

        let speakers: Vec<_> = session.transcript().iter().map(|m| m.speaker).collect();
        assert_eq!(
            speakers,
            vec![
                Speaker::Coach,
                Speaker::User,
                Speaker::Coach,
                Speaker::User,
                Speaker::Coach
            ]
        );
        assert_eq!(
            backend.seen.lock().unwrap()[0],
            ("Elbows?".to_owned(), stats.to_owned())
        );
    }

    #[tokio::test]
    async fn disabled_gemini_coach_reports_disabled() {
        let coach = GeminiCoach::new(None);
        assert!(!coach.enabled());
        assert!(matches!(
            coach.ask("hi", "stats").await,
            Err(CoachError::Disabled)
        ));
    }

    #[test]
    fn config_validates_inputs() {
        assert!(CoachConfig::new(DEFAULT_BASE_URL, "  ".into(), DEFAULT_MODEL.into()).is_none());
        assert!(CoachConfig::new("not a url", "key".into(), DEFAULT_MODEL.into()).is_none());
        assert!(CoachConfig::new("ftp://example.com", "key".into(), DEFAULT_MODEL.into()).is_none());

        let config =
            CoachConfig::new("https://example.com/v1beta/", "key".into(), "m1".into()).unwrap();
        assert_eq!(
            config.endpoint(),
            "https://example.com/v1beta/models/m1:generateContent"
        );
    }

    #[test]
    fn request_carries_instruction_and_search_tool() {
        let value = serde_json::to_value(GenerateRequest::new("How?", "Max reps: 9")).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "How?");
        assert!(
            value["systemInstruction"]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .contains("Max reps: 9")
        );
        assert!(value["tools"][0]["google_search"].is_object());
    }

    #[test]
    fn parses_text_and_citations() {
        let raw = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "Rest "}, {"text": "two days."}]},
                "groundingMetadata": {"groundingChunks": [
                    {"web": {"uri": "https://a.example", "title": "A"}},
                    {"web": {"uri": "https://b.example"}},
                    {"web": {"title": "no uri"}},
                    {}
                ]}
            }]
        }"#;
        let body: GenerateResponse = serde_json::from_str(raw).unwrap();
        let reply = reply_from_response(body).unwrap();

        assert_eq!(reply.text, "Rest two days.");
        assert_eq!(
            reply.citations,
            vec![
                Citation {
                    uri: "https://a.example".into(),
                    title: "A".into()
                },
                Citation {
                    uri: "https://b.example".into(),
                    title: "https://b.example".into()
                },
            ]
        );
    }

    #[test]
    fn empty_text_uses_fallback_and_no_candidates_is_an_error() {
        let body: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[]}}]}"#).unwrap();
        assert_eq!(reply_from_response(body).unwrap().text, FALLBACK_REPLY);

        let body: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            reply_from_response(body),
            Err(CoachError::EmptyResponse)
        ));
    }
}
