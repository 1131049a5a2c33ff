//! Shared domain types for StudySpark
//!
//! This crate contains the serializable wire types, UI enums, and pure
//! decision logic shared by the WASM frontend (studyspark-ui). Everything
//! here is browser-free so it can be unit tested on the host.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Wire Types (frontend <-> lesson backend)
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `POST {base_url}/lesson`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonRequest {
    pub query: String,
    pub subject: Subject,
    pub language: Language,
}

impl LessonRequest {
    /// Build a request from raw form input. The query is whitespace-trimmed;
    /// an empty result is rejected before any network traffic happens.
    pub fn new(query: &str, subject: Subject, language: Language) -> Result<Self, LessonError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LessonError::EmptyQuery);
        }
        Ok(Self {
            query: query.to_string(),
            subject,
            language,
        })
    }
}

/// Body returned by the lesson backend.
///
/// A present `error` field means the request failed regardless of status,
/// mirroring how the backend reports agent errors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LessonResponse {
    #[serde(default)]
    pub lesson: String,
    #[serde(default)]
    pub meme_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Subject category offered in the subject selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    #[default]
    Math,
    Science,
    History,
    Coding,
}

impl Subject {
    pub fn label(&self) -> &'static str {
        match self {
            Subject::Math => "Math",
            Subject::Science => "Science",
            Subject::History => "History",
            Subject::Coding => "Coding",
        }
    }

    /// Value carried by the `<select>` options and the wire body.
    pub fn value(&self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::Science => "science",
            Subject::History => "history",
            Subject::Coding => "coding",
        }
    }

    pub fn from_value(value: &str) -> Self {
        match value {
            "science" => Subject::Science,
            "history" => Subject::History,
            "coding" => Subject::Coding,
            _ => Subject::Math,
        }
    }

    /// All subjects (for iteration when building the selector)
    pub fn all() -> &'static [Subject] {
        &[
            Subject::Math,
            Subject::Science,
            Subject::History,
            Subject::Coding,
        ]
    }
}

/// Explanation style requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Formal,
    Slang,
}

impl Language {
    pub fn label(&self) -> &'static str {
        match self {
            Language::Formal => "Formal",
            Language::Slang => "Slang",
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            Language::Formal => "formal",
            Language::Slang => "slang",
        }
    }

    pub fn from_value(value: &str) -> Self {
        match value {
            "slang" => Language::Slang,
            _ => Language::Formal,
        }
    }

    pub fn all() -> &'static [Language] {
        &[Language::Formal, Language::Slang]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error Taxonomy
// ─────────────────────────────────────────────────────────────────────────────

/// Fallback shown when the backend gives no usable message.
pub const GENERIC_FAILURE: &str = "Failed to generate lesson. Please try again.";

/// Everything that can go wrong with one lesson submission. All variants are
/// local to the triggering interaction; none survive it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LessonError {
    /// Rejected before any network call.
    #[error("Please enter a question!")]
    EmptyQuery,
    /// Non-2xx status, an `error` field in the body, or transport failure.
    #[error("{message}")]
    RequestFailed { message: String },
    /// The request hit the client-side deadline and was aborted.
    #[error("The request timed out. Please try again.")]
    TimedOut,
}

impl LessonError {
    /// Build a failure from whatever message the server provided, falling
    /// back to the generic text when it sent none.
    pub fn from_server(message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        LessonError::RequestFailed { message }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Theme Preference
// ─────────────────────────────────────────────────────────────────────────────

/// `localStorage` key holding the persisted theme.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Light/dark preference, persisted across sessions and applied as the
/// document's `data-theme` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Unknown or missing stored values fall back to light.
    pub fn from_str(value: &str) -> Self {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Voice Capture Phases
// ─────────────────────────────────────────────────────────────────────────────

/// Where one speech-capture session currently is. The trigger control is
/// disabled exactly while `Listening`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoicePhase {
    #[default]
    Idle,
    Listening,
}

/// Engine callbacks, reduced to the transitions they drive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEvent {
    Started,
    Result { transcript: String },
    Error { message: String },
    Ended,
}

impl VoicePhase {
    /// Apply one engine event. Result, error, and end all return to idle;
    /// only a start moves to listening.
    pub fn on_event(self, event: &VoiceEvent) -> VoicePhase {
        match event {
            VoiceEvent::Started => VoicePhase::Listening,
            VoiceEvent::Result { .. } | VoiceEvent::Error { .. } | VoiceEvent::Ended => {
                VoicePhase::Idle
            }
        }
    }

    pub fn is_listening(&self) -> bool {
        matches!(self, VoicePhase::Listening)
    }
}

/// Tone of the inline voice status line, mapped to a color class by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusTone {
    #[default]
    Neutral,
    Active,
    Error,
}

impl VoiceEvent {
    /// The inline status text shown for this event, if any. A bare end
    /// leaves the previous status in place.
    pub fn status(&self) -> Option<(String, StatusTone)> {
        match self {
            VoiceEvent::Started => {
                Some(("🎤 Listening... Speak now!".to_string(), StatusTone::Active))
            }
            VoiceEvent::Result { transcript } => {
                Some((format!("Recognized: {transcript}"), StatusTone::Neutral))
            }
            VoiceEvent::Error { message } => {
                Some((format!("Error: {message}"), StatusTone::Error))
            }
            VoiceEvent::Ended => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// API Environment
// ─────────────────────────────────────────────────────────────────────────────

/// Which backend deployment the page talks to, keyed off the page hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiEnv {
    Development,
    Production,
}

impl ApiEnv {
    /// A page served from `localhost` talks to the local backend; anything
    /// else is the deployed one.
    pub fn from_hostname(hostname: &str) -> Self {
        if hostname == "localhost" {
            ApiEnv::Development
        } else {
            ApiEnv::Production
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            ApiEnv::Development => "http://localhost:5001/api",
            ApiEnv::Production => "https://studyspark-backend.herokuapp.com/api",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lesson Formatting
// ─────────────────────────────────────────────────────────────────────────────

/// Split generated lesson text into paragraph blocks: one per non-blank
/// line, trimmed, order preserved. The text is rendered as text nodes, never
/// injected as markup.
pub fn lesson_paragraphs(lesson: &str) -> Vec<String> {
    lesson
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_trims_query() {
        let req = LessonRequest::new("  what is 5G  ", Subject::Science, Language::Formal)
            .expect("non-empty query");
        assert_eq!(req.query, "what is 5G");
    }

    #[test]
    fn empty_and_whitespace_queries_are_rejected() {
        assert_eq!(
            LessonRequest::new("", Subject::Math, Language::Formal),
            Err(LessonError::EmptyQuery)
        );
        assert_eq!(
            LessonRequest::new("   \t  ", Subject::Math, Language::Slang),
            Err(LessonError::EmptyQuery)
        );
    }

    #[test]
    fn request_body_matches_wire_contract() {
        let req = LessonRequest::new("what is 5G", Subject::Science, Language::Formal).unwrap();
        let body = serde_json::to_string(&req).unwrap();
        assert_eq!(
            body,
            r#"{"query":"what is 5G","subject":"science","language":"formal"}"#
        );
    }

    #[test]
    fn response_parses_with_and_without_meme() {
        let full: LessonResponse = serde_json::from_str(
            r#"{"lesson":"5G is...\nIt enables faster data.","meme_url":"http://x/img.png"}"#,
        )
        .unwrap();
        assert_eq!(full.meme_url.as_deref(), Some("http://x/img.png"));
        assert!(full.error.is_none());

        let bare: LessonResponse = serde_json::from_str(r#"{"lesson":"hi"}"#).unwrap();
        assert_eq!(bare.meme_url, None);
    }

    #[test]
    fn server_error_message_is_surfaced() {
        let err = LessonError::from_server(Some("rate limited".to_string()));
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn missing_server_message_falls_back_to_generic() {
        assert_eq!(LessonError::from_server(None).to_string(), GENERIC_FAILURE);
        assert_eq!(
            LessonError::from_server(Some("  ".to_string())).to_string(),
            GENERIC_FAILURE
        );
    }

    #[test]
    fn timed_out_has_a_user_facing_message() {
        assert_eq!(
            LessonError::TimedOut.to_string(),
            "The request timed out. Please try again."
        );
    }

    #[test]
    fn paragraphs_drop_blank_lines_and_keep_order() {
        let lesson = "5G is...\n\n  It enables faster data.  \n\t\n";
        assert_eq!(
            lesson_paragraphs(lesson),
            vec!["5G is...".to_string(), "It enables faster data.".to_string()]
        );
        assert!(lesson_paragraphs("").is_empty());
        assert!(lesson_paragraphs("\n \n").is_empty());
    }

    #[test]
    fn theme_toggle_is_idempotent_over_two_flips() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.toggled().toggled(), theme);
        }
        assert_eq!(Theme::from_str("dark"), Theme::Dark);
        assert_eq!(Theme::from_str("light"), Theme::Light);
        assert_eq!(Theme::from_str("garbage"), Theme::Light);
    }

    #[test]
    fn hostname_selects_backend() {
        assert_eq!(
            ApiEnv::from_hostname("localhost").base_url(),
            "http://localhost:5001/api"
        );
        assert_eq!(
            ApiEnv::from_hostname("studyspark.example.com"),
            ApiEnv::Production
        );
        // Only an exact hostname match counts as development.
        assert_eq!(
            ApiEnv::from_hostname("localhost.evil.com"),
            ApiEnv::Production
        );
    }

    #[test]
    fn voice_phases_follow_the_session_table() {
        let idle = VoicePhase::Idle;
        let listening = idle.on_event(&VoiceEvent::Started);
        assert!(listening.is_listening());

        let result = VoiceEvent::Result {
            transcript: "what is 5G".to_string(),
        };
        assert_eq!(listening.on_event(&result), VoicePhase::Idle);
        assert_eq!(
            listening.on_event(&VoiceEvent::Error {
                message: "no-speech".to_string()
            }),
            VoicePhase::Idle
        );
        assert_eq!(listening.on_event(&VoiceEvent::Ended), VoicePhase::Idle);
    }

    #[test]
    fn voice_status_lines_match_events() {
        let (text, tone) = VoiceEvent::Started.status().unwrap();
        assert_eq!(text, "🎤 Listening... Speak now!");
        assert_eq!(tone, StatusTone::Active);

        let (text, tone) = VoiceEvent::Result {
            transcript: "hello".to_string(),
        }
        .status()
        .unwrap();
        assert_eq!(text, "Recognized: hello");
        assert_eq!(tone, StatusTone::Neutral);

        let (text, tone) = VoiceEvent::Error {
            message: "audio-capture".to_string(),
        }
        .status()
        .unwrap();
        assert_eq!(text, "Error: audio-capture");
        assert_eq!(tone, StatusTone::Error);

        assert!(VoiceEvent::Ended.status().is_none());
    }

    #[test]
    fn subject_and_language_round_trip_their_control_values() {
        for subject in Subject::all() {
            assert_eq!(Subject::from_value(subject.value()), *subject);
        }
        for language in Language::all() {
            assert_eq!(Language::from_value(language.value()), *language);
        }
        // Unknown control values fall back to the defaults.
        assert_eq!(Subject::from_value("philosophy"), Subject::Math);
        assert_eq!(Language::from_value("pirate"), Language::Formal);
    }
}
