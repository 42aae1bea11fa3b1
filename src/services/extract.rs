//! Best-effort readers for free-form model output.
//!
//! Nothing here fails: each extractor either finds what it is looking for or
//! hands back a fixed default, so malformed upstream text only ever degrades
//! the content of a 200 response.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::gemini::{GenerateContentResponse, InlineData};
use crate::models::{Chapter, EbookDraft};

pub const MAX_KEYWORDS: usize = 7;

pub const DEFAULT_KEYWORDS: [&str; 3] = ["창의적", "따뜻함", "전문성"];

static KEYWORD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:추출된 키워드|extracted keywords)[^:：\n]*[:：]([^\n]+)")
        .expect("keyword pattern compiles")
});

static KEYWORD_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,，、]").expect("separator pattern compiles"));

static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)```json\s*(.*?)\s*```").expect("fence pattern compiles")
});

/// Outcome of a best-effort extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted<T> {
    Found(T),
    Default(T),
}

impl<T> Extracted<T> {
    pub fn into_inner(self) -> T {
        match self {
            Extracted::Found(value) | Extracted::Default(value) => value,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Extracted::Default(_))
    }
}

/// Text of the first part of the first candidate, or `""`.
pub fn generated_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.clone())
        .unwrap_or_default()
}

/// First `image/*` inline part, scanning candidates in order.
pub fn first_inline_image(response: &GenerateContentResponse) -> Option<&InlineData> {
    response
        .candidates
        .iter()
        .filter_map(|candidate| candidate.content.as_ref())
        .flat_map(|content| content.parts.iter())
        .filter_map(|part| part.inline_data.as_ref())
        .find(|data| data.mime_type.starts_with("image/"))
}

pub fn data_url(image: &InlineData) -> String {
    format!("data:{};base64,{}", image.mime_type, image.data)
}

pub fn extract_keywords(text: &str) -> Extracted<Vec<String>> {
    let Some(captures) = KEYWORD_LINE.captures(text) else {
        return Extracted::Default(DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect());
    };

    let keywords = KEYWORD_SEPARATORS
        .split(&captures[1])
        .map(|token| token.replace(['#', '-', '*'], "").trim().to_string())
        .filter(|token| !token.is_empty())
        .take(MAX_KEYWORDS)
        .collect();

    Extracted::Found(keywords)
}

/// Where a labelled prompt section ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEnd {
    EndOfText,
    /// Stop at the next line consisting of `---`.
    Delimiter,
}

/// Everything after `label:` (up to `end`). Falls back to the whole text.
pub fn extract_prompt_block(text: &str, label: &str, end: BlockEnd) -> Extracted<String> {
    let pattern = format!(r"(?i){}[^:：\n]*[:：]", regex::escape(label));
    let found = Regex::new(&pattern).ok().and_then(|re| re.find(text));

    let Some(found) = found else {
        return Extracted::Default(text.to_string());
    };

    let mut block = &text[found.end()..];
    if end == BlockEnd::Delimiter {
        if let Some(pos) = block.find("\n---") {
            block = &block[..pos];
        }
    }
    // Drop the `**` closing `**label:**`, but only when it ends the label's line.
    let block = block
        .strip_prefix("**")
        .filter(|rest| {
            let rest = rest.trim_start_matches([' ', '\t']);
            rest.is_empty() || rest.starts_with(['\n', '\r'])
        })
        .unwrap_or(block)
        .trim();

    if block.is_empty() {
        Extracted::Default(text.to_string())
    } else {
        Extracted::Found(block.to_string())
    }
}

/// Candidate JSON texts in preference order: a ```json fence, then the
/// outermost `{ ... }` span.
fn json_candidates(text: &str) -> Vec<&str> {
    let mut candidates = Vec::new();
    if let Some(captures) = JSON_FENCE.captures(text) {
        if let Some(body) = captures.get(1) {
            candidates.push(body.as_str());
        }
    }
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            candidates.push(&text[start..=end]);
        }
    }
    candidates
}

pub fn extract_json(text: &str) -> Option<serde_json::Value> {
    json_candidates(text)
        .into_iter()
        .find_map(|candidate| serde_json::from_str(candidate).ok())
}

/// Which optional sections the caller asked for; drives the placeholder.
#[derive(Debug, Clone)]
pub struct DraftShape<'a> {
    pub chapter_count: u32,
    pub author: &'a str,
    pub include_preface: bool,
    pub include_epilogue: bool,
    pub include_author_bio: bool,
}

pub fn extract_draft(text: &str, shape: &DraftShape<'_>) -> Extracted<EbookDraft> {
    let parsed = extract_json(text).and_then(|value| serde_json::from_value::<EbookDraft>(value).ok());

    match parsed {
        Some(draft) => Extracted::Found(draft),
        None => Extracted::Default(placeholder_draft(shape)),
    }
}

pub fn placeholder_draft(shape: &DraftShape<'_>) -> EbookDraft {
    let chapters = (1..=shape.chapter_count)
        .map(|i| Chapter {
            title: format!("Chapter {}", i),
            content: format!(
                "챕터 {}의 내용입니다. AI 응답을 파싱하는 데 문제가 발생했습니다. 다시 시도해주세요.",
                i
            ),
        })
        .collect();

    EbookDraft {
        preface: if shape.include_preface {
            "이 책은 독자 여러분의 성장을 위해 작성되었습니다.".to_string()
        } else {
            String::new()
        },
        chapters,
        epilogue: if shape.include_epilogue {
            "끝까지 읽어주셔서 감사합니다.".to_string()
        } else {
            String::new()
        },
        author_bio: if shape.include_author_bio {
            format!("{}은(는) 이 책의 저자입니다.", shape.author)
        } else {
            String::new()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shape(chapter_count: u32) -> DraftShape<'static> {
        DraftShape {
            chapter_count,
            author: "홍길동",
            include_preface: false,
            include_epilogue: true,
            include_author_bio: true,
        }
    }

    #[test]
    fn keywords_from_labelled_line() {
        let text = "분석 결과\n추출된 키워드: 성실, 열정, 창의\n다음 줄";
        assert_eq!(
            extract_keywords(text),
            Extracted::Found(vec!["성실".into(), "열정".into(), "창의".into()])
        );
    }

    #[test]
    fn keywords_strip_markdown_and_mixed_separators() {
        let text = "1. **추출된 키워드** (5-7개): **성실**，#열정、 - 창의 ,, 도전";
        let keywords = extract_keywords(text).into_inner();
        assert_eq!(keywords, vec!["성실", "열정", "창의", "도전"]);
    }

    #[test]
    fn keywords_capped_at_seven() {
        let text = "Extracted keywords: a, b, c, d, e, f, g, h, i";
        let keywords = extract_keywords(text).into_inner();
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(keywords.last().map(String::as_str), Some("g"));
    }

    #[test]
    fn keywords_default_without_label() {
        let extracted = extract_keywords("no label here");
        assert!(extracted.is_default());
        assert_eq!(extracted.into_inner(), DEFAULT_KEYWORDS.to_vec());
    }

    #[test]
    fn prompt_block_runs_to_end_of_text() {
        let text = "추출된 키워드: a\n---\n**웹사이트 생성 프롬프트:**\n\n# Role\n디자이너\n---\n# 정보";
        let block = extract_prompt_block(text, "웹사이트 생성 프롬프트", BlockEnd::EndOfText);
        assert_eq!(block, Extracted::Found("# Role\n디자이너\n---\n# 정보".to_string()));
    }

    #[test]
    fn prompt_block_can_stop_at_delimiter() {
        let text = "**AI 화보 생성 프롬프트:**\n- 콘셉트: 햇살\n---\n기타 메모";
        let block = extract_prompt_block(text, "AI 화보 생성 프롬프트", BlockEnd::Delimiter);
        assert_eq!(block, Extracted::Found("- 콘셉트: 햇살".to_string()));
    }

    #[test]
    fn prompt_block_keeps_leading_bold_in_body() {
        let text = "웹사이트 생성 프롬프트: **Role** 디자이너";
        let block = extract_prompt_block(text, "웹사이트 생성 프롬프트", BlockEnd::EndOfText);
        assert_eq!(block, Extracted::Found("**Role** 디자이너".to_string()));

        let text = "**웹사이트 생성 프롬프트:** \r\n**Role** 디자이너";
        let block = extract_prompt_block(text, "웹사이트 생성 프롬프트", BlockEnd::EndOfText);
        assert_eq!(block, Extracted::Found("**Role** 디자이너".to_string()));
    }

    #[test]
    fn prompt_block_falls_back_to_whole_text() {
        let text = "모델이 형식을 따르지 않았습니다";
        let block = extract_prompt_block(text, "웹사이트 생성 프롬프트", BlockEnd::EndOfText);
        assert!(block.is_default());
        assert_eq!(block.into_inner(), text);
    }

    #[test]
    fn fenced_and_bare_json_parse_identically() {
        let body = r#"{"preface":"","chapters":[{"title":"하나","content":"본문"}],"epilogue":"끝","authorBio":"저자"}"#;
        let fenced = format!("여기 있습니다:\n```json\n{}\n```\n감사합니다", body);
        let bare = format!("여기 있습니다: {} 감사합니다", body);

        let from_fence = extract_draft(&fenced, &shape(5));
        let from_bare = extract_draft(&bare, &shape(5));
        assert!(!from_fence.is_default());
        assert_eq!(from_fence, from_bare);
        assert_eq!(extract_json(&fenced), extract_json(&bare));
        assert_eq!(from_fence.into_inner().chapters.len(), 1);
    }

    #[test]
    fn malformed_json_yields_requested_placeholder() {
        let extracted = extract_draft("```json\n{\"chapters\": [ oops\n```", &shape(4));
        assert!(extracted.is_default());

        let draft = extracted.into_inner();
        assert_eq!(draft.chapters.len(), 4);
        assert_eq!(draft.chapters[3].title, "Chapter 4");
        assert_eq!(draft.preface, "");
        assert_eq!(draft.epilogue, "끝까지 읽어주셔서 감사합니다.");
        assert_eq!(draft.author_bio, "홍길동은(는) 이 책의 저자입니다.");
    }

    #[test]
    fn placeholder_length_follows_large_requests() {
        let count = crate::services::prompts::effective_chapter_count(Some(40));
        let draft = extract_draft("not json at all", &shape(count)).into_inner();
        assert_eq!(draft.chapters.len(), 40);
        assert_eq!(draft.chapters[39].title, "Chapter 40");
    }

    #[test]
    fn generated_text_is_empty_when_absent() {
        let empty = GenerateContentResponse::from_value(&json!({}));
        assert_eq!(generated_text(&empty), "");

        let response = GenerateContentResponse::from_value(&json!({
            "candidates": [{ "content": { "parts": [{ "text": "hello" }, { "text": "ignored" }] } }]
        }));
        assert_eq!(generated_text(&response), "hello");
    }

    #[test]
    fn image_found_in_later_candidate() {
        let response = GenerateContentResponse::from_value(&json!({
            "candidates": [
                { "content": { "parts": [{ "text": "no image here" }] } },
                { "content": { "parts": [
                    { "inlineData": { "mimeType": "text/plain", "data": "bm9wZQ==" } },
                    { "inlineData": { "mimeType": "image/png", "data": "iVBORw0" } }
                ] } }
            ]
        }));
        let image = first_inline_image(&response).unwrap();
        assert_eq!(data_url(image), "data:image/png;base64,iVBORw0");
    }
}
