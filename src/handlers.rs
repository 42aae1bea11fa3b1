use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::AppState;
use crate::error::ApiError;
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};
use crate::models::{
    AnalysisResponse, AnalyzeRequest, CoverImageRequest, CoverImageResponse, EbookAnalysisRequest,
    EbookDraftRequest, EbookDraftResponse, EpubExportRequest,
};
use crate::services::ebook::{BookInfo, create_epub_from_draft};
use crate::services::extract::{
    BlockEnd, DraftShape, data_url, extract_draft, extract_keywords, extract_prompt_block,
    first_inline_image, generated_text,
};
use crate::services::prompts;
use crate::services::validator::Validate;

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

const COVER_UNSUPPORTED_SUGGESTION: &str =
    "현재 Gemini API에서 이미지 생성이 지원되지 않습니다. 그라데이션 또는 패턴 표지를 사용해주세요.";
const COVER_EMPTY_SUGGESTION: &str =
    "AI가 이미지를 생성하지 못했습니다. 다른 스타일 힌트를 시도하거나 그라데이션 표지를 사용해주세요.";

static DATA_URL_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:(image/[\w.+-]+);base64,").expect("data url pattern compiles")
});

/// Decodes and validates a JSON body; both failure modes are client errors.
fn accept<T: Validate>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    let Json(request) =
        body.map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e.body_text())))?;
    request.validate()?;
    Ok(request)
}

/// Splits a data URL into MIME type and base64 payload. Raw base64 is assumed to be JPEG.
fn split_data_url(image: &str) -> (&str, &str) {
    match DATA_URL_HEADER.captures(image) {
        Some(captures) => {
            let header = captures.get(0).map_or(0, |m| m.end());
            let mime = captures.get(1).map_or(DEFAULT_IMAGE_MIME, |m| m.as_str());
            (mime, &image[header..])
        }
        None => (DEFAULT_IMAGE_MIME, image),
    }
}

pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn health_check() -> &'static str {
    "OK"
}

#[derive(Debug, Clone, Copy)]
enum Worksheet {
    Website,
    Photoshoot,
}

impl Worksheet {
    fn prompt(self) -> String {
        match self {
            Worksheet::Website => prompts::website_prompt(),
            Worksheet::Photoshoot => prompts::photoshoot_prompt(),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Worksheet::Website => prompts::WEBSITE_PROMPT_LABEL,
            Worksheet::Photoshoot => prompts::PHOTOSHOOT_PROMPT_LABEL,
        }
    }

    // The website brief contains `---` rules of its own, so it runs to the end.
    fn block_end(self) -> BlockEnd {
        match self {
            Worksheet::Website => BlockEnd::EndOfText,
            Worksheet::Photoshoot => BlockEnd::Delimiter,
        }
    }
}

pub async fn analyze_website(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    analyze_worksheet(&state, accept(body)?, Worksheet::Website).await
}

pub async fn analyze_photoshoot(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    analyze_worksheet(&state, accept(body)?, Worksheet::Photoshoot).await
}

async fn analyze_worksheet(
    state: &AppState,
    request: AnalyzeRequest,
    worksheet: Worksheet,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let image = request.image.unwrap_or_default();
    let (mime_type, data) = split_data_url(&image);

    let generation = GenerateContentRequest::new(vec![
        Part::text(worksheet.prompt()),
        Part::inline(mime_type, data),
    ])
    .with_config(GenerationConfig {
        temperature: Some(0.7),
        max_output_tokens: Some(1500),
        ..Default::default()
    });

    let raw = state
        .gemini
        .generate_content(&state.gemini.text_model, &generation)
        .await?;
    let text = generated_text(&GenerateContentResponse::from_value(&raw));

    let keywords = extract_keywords(&text);
    if keywords.is_default() {
        tracing::warn!(?worksheet, "No keyword line in generated text, using defaults");
    }
    let prompt = extract_prompt_block(&text, worksheet.label(), worksheet.block_end());
    if prompt.is_default() {
        tracing::warn!(?worksheet, "No prompt section in generated text, returning raw text");
    }

    tracing::info!(?worksheet, chars = text.chars().count(), "Worksheet analyzed");

    Ok(Json(AnalysisResponse {
        success: true,
        keywords: keywords.into_inner(),
        prompt: prompt.into_inner(),
        raw_response: text,
    }))
}

pub async fn analyze_ebook(
    State(state): State<AppState>,
    body: Result<Json<EbookAnalysisRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = accept(body)?;

    let mut parts: Vec<Part> = request
        .images
        .unwrap_or_default()
        .into_iter()
        .map(|image| Part::inline(image.mime_type, image.data))
        .collect();
    parts.push(Part::text(prompts::ebook_worksheet_prompt()));

    let raw = state
        .gemini
        .generate_content(&state.gemini.text_model, &GenerateContentRequest::new(parts))
        .await?;

    Ok(Json(raw))
}

pub async fn generate_cover_image(
    State(state): State<AppState>,
    body: Result<Json<CoverImageRequest>, JsonRejection>,
) -> Result<Json<CoverImageResponse>, ApiError> {
    let request = accept(body)?;

    let generation = GenerateContentRequest::new(vec![Part::text(prompts::cover_brief(&request))])
        .with_config(GenerationConfig {
            response_modalities: Some(vec!["image".to_string(), "text".to_string()]),
            ..Default::default()
        });

    let raw = match state
        .gemini
        .generate_content(&state.gemini.image_model, &generation)
        .await
    {
        Ok(raw) => raw,
        Err(err)
            if err
                .upstream_message()
                .is_some_and(|m| m.contains("not supported")) =>
        {
            tracing::warn!(model = %state.gemini.image_model, "Image generation not supported, suggesting fallback cover");
            return Ok(Json(CoverImageResponse::Fallback {
                success: false,
                error: "Image generation not supported".to_string(),
                fallback: true,
                suggestion: COVER_UNSUPPORTED_SUGGESTION.to_string(),
                raw_response: None,
            }));
        }
        Err(err) => return Err(err.into()),
    };

    let response = GenerateContentResponse::from_value(&raw);
    match first_inline_image(&response) {
        Some(image) => Ok(Json(CoverImageResponse::Generated {
            success: true,
            image_url: data_url(image),
            mime_type: image.mime_type.clone(),
        })),
        None => {
            tracing::warn!("Generation API returned no image part");
            Ok(Json(CoverImageResponse::Fallback {
                success: false,
                error: "No image generated".to_string(),
                fallback: true,
                suggestion: COVER_EMPTY_SUGGESTION.to_string(),
                raw_response: Some(raw),
            }))
        }
    }
}

pub async fn generate_ebook_draft(
    State(state): State<AppState>,
    body: Result<Json<EbookDraftRequest>, JsonRejection>,
) -> Result<Json<EbookDraftResponse>, ApiError> {
    let request = accept(body)?;

    let generation = GenerateContentRequest::new(vec![Part::text(prompts::ebook_draft_prompt(&request))])
        .with_config(GenerationConfig {
            temperature: Some(0.8),
            max_output_tokens: Some(8000),
            ..Default::default()
        });

    let raw = state
        .gemini
        .generate_content(&state.gemini.text_model, &generation)
        .await?;
    let text = generated_text(&GenerateContentResponse::from_value(&raw));

    let shape = DraftShape {
        chapter_count: prompts::effective_chapter_count(request.chapter_count),
        author: request.author.as_deref().unwrap_or_default(),
        include_preface: request.include_preface,
        include_epilogue: request.include_epilogue,
        include_author_bio: request.include_author_bio,
    };
    let extracted = extract_draft(&text, &shape);
    if extracted.is_default() {
        tracing::warn!(raw = %text, "Could not parse e-book JSON, returning placeholder draft");
    }

    let mut draft = extracted.into_inner();
    if request.include_preface {
        if let Some(preface) = request.preface_text.filter(|p| !p.trim().is_empty()) {
            draft.preface = preface;
        }
    }

    tracing::info!(
        requested = shape.chapter_count,
        generated = draft.chapters.len(),
        "E-book draft generated"
    );

    Ok(Json(EbookDraftResponse {
        success: true,
        draft,
    }))
}

pub async fn export_ebook_epub(
    body: Result<Json<EpubExportRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request = accept(body)?;

    let file = tokio::task::spawn_blocking(move || {
        let info = BookInfo {
            title: request.title.as_deref().unwrap_or_default(),
            subtitle: request.subtitle.as_deref().filter(|s| !s.trim().is_empty()),
            author: request.author.as_deref().unwrap_or_default(),
        };
        create_epub_from_draft(&info, &request.draft)
    })
    .await
    .map_err(anyhow::Error::from)??;

    tracing::info!(file = %file.file_name, bytes = file.bytes.len(), "EPUB exported");

    Ok((
        [
            (CONTENT_TYPE, "application/epub+zip".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.bytes,
    )
        .into_response())
}
