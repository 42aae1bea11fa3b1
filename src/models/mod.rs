pub mod gemini;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Chapter {
    pub title: String,
    pub content: String,
}

/// Body of both worksheet analysis routes.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeRequest {
    /// Data URL or raw base64.
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageInput {
    pub data: String,
    pub mime_type: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EbookAnalysisRequest {
    pub images: Option<Vec<ImageInput>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CoverImageRequest {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub hint: Option<String>,
    pub topic: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EbookDraftRequest {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub topic: Option<String>,
    pub chapter_count: Option<u32>,
    pub include_preface: bool,
    pub preface_text: Option<String>,
    pub include_epilogue: bool,
    pub include_author_bio: bool,
}

/// A finished (or placeholder) e-book draft, as produced by the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EbookDraft {
    pub preface: String,
    pub chapters: Vec<Chapter>,
    pub epilogue: String,
    #[serde(alias = "author_bio")]
    pub author_bio: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EpubExportRequest {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    #[serde(flatten)]
    pub draft: EbookDraft,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub success: bool,
    pub keywords: Vec<String>,
    pub prompt: String,
    pub raw_response: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EbookDraftResponse {
    pub success: bool,
    #[serde(flatten)]
    pub draft: EbookDraft,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CoverImageResponse {
    #[serde(rename_all = "camelCase")]
    Generated {
        success: bool,
        image_url: String,
        mime_type: String,
    },
    #[serde(rename_all = "camelCase")]
    Fallback {
        success: bool,
        error: String,
        fallback: bool,
        suggestion: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        raw_response: Option<serde_json::Value>,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Social,
    Workshop,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarEvent {
    /// ISO date, matched literally against `YYYY-MM-DD` cell dates.
    pub date: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
}
