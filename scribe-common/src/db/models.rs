//! Database models

use serde::{Deserialize, Serialize};

/// Registered user, created on first login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Identity provider subject identifier
    pub id: String,
    pub email: String,
    pub admin: bool,
    pub created_at: String,
}

/// Speech recognition model available for transcription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerType {
    /// Model identifier, e.g. "en-GB"
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: bool,
}

/// Sample audio clip offered for crowdsourced transcription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    pub id: i64,
    pub model: String,
    pub path: String,
    pub url: String,
    pub score: f64,
    pub created_at: String,
}

/// Recording plus its submission count, for the admin review listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingOverview {
    pub id: i64,
    pub model: String,
    pub url: String,
    pub score: f64,
    pub created_at: String,
    pub transcription_count: i64,
}

/// One crowdsourced transcription submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    pub id: i64,
    pub recording_id: i64,
    /// None for anonymous submissions
    pub user_id: Option<String>,
    pub text: String,
    pub native_speaker: bool,
    pub offensive_language: bool,
    pub not_a_speech: bool,
    pub created_at: String,
}

/// Server-side login session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub created_at: String,
}
