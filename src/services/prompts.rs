//! Fixed instruction templates sent to the generation API, one per feature.

use crate::models::{CoverImageRequest, EbookDraftRequest};

pub const DEFAULT_CHAPTER_COUNT: u32 = 5;

/// Section label the website template asks the model to emit.
pub const WEBSITE_PROMPT_LABEL: &str = "웹사이트 생성 프롬프트";
/// Section label the photoshoot template asks the model to emit.
pub const PHOTOSHOOT_PROMPT_LABEL: &str = "AI 화보 생성 프롬프트";

/// Chapter count actually requested from the model: 0 or absent means the default.
pub fn effective_chapter_count(requested: Option<u32>) -> u32 {
    match requested {
        None | Some(0) => DEFAULT_CHAPTER_COUNT,
        Some(n) => n,
    }
}

/// Career-branding worksheet (session 3) to a website-builder brief.
pub fn website_prompt() -> String {
    format!(
        r#"이 이미지는 "나만의 커리어 브랜딩 워크북 (3회차)"입니다.

## 워크지 구조 (손글씨로 작성됨)
- **표지**: 이름, 전화번호
- **STEP 1**: 가치 키워드 100개 중 체크 → 최종 3개 선택
- **STEP 2**: 살아있음을 느낀 경험 3가지
- **STEP 3**: 롤모델과 동경 이유
- **STEP 4**: 유산 편지 (나에게 남길 메시지)
- **STEP 5**: 삶의 목적(가치관) 한 줄 + 목표 3가지

---

먼저 워크지에서 아래 내용을 추출해주세요:

1. **추출된 키워드** (5-7개): 워크지에서 발견한 핵심 키워드들

그리고 이 정보를 바탕으로 **Lovable에서 웹사이트를 만들 수 있는 프롬프트**를 아래 형식으로 작성해주세요:

---
**{label}:**

# Role
당신은 **센스 있는 웹사이트 디자이너이자 만들기 도우미**입니다.
사용자가 입력한 아래 정보를 바탕으로, **러버블(Lovable)이 즉시 코드로 구현할 수 있는 구체적이고 전문적인 웹사이트 기획안**을 작성해 주세요.

---

# [입력된 사용자 정보]

## 1. 웹사이트 정체성
- **웹사이트 이름:** [표지의 이름]
- **한 줄 소개:** [STEP 5의 "삶의 목적" 한 줄]
- **주요 타겟:** [STEP 3 롤모델 동경 이유에서 유추한 타겟]
- **핵심 무드(Feeling):** 방문자가 이 사이트에서 "[STEP 1 핵심 가치 3개]" 느낌을 받아야 합니다.

## 2. 디자인 시스템
- **메인 컬러:** [STEP 1 핵심 가치 키워드 느낌에 맞는 색상 추천]
- **포인트 컬러:** [보조 컬러 추천]
- **배경 스타일:** [가치 키워드 분위기에 맞는 배경 스타일]
- **폰트/글자 느낌:** [가치 키워드 분위기에 맞는 폰트 추천]
- **전반적인 분위기:** 위 컬러와 스타일을 조합하여 "[톤앤매너]" 느낌으로 디자인해 주세요.

## 3. 핵심 콘텐츠 내용
- **메인 카피(Hero Title):** "[STEP 5 삶의 목적을 임팩트 있는 헤드라인으로]"
- **서브 카피:** "[STEP 5 목표 3가지를 요약한 문장]"
- **주요 특징/강점 3가지:** [STEP 5의 목표 1, 2, 3을 강점 카드로 변환]
- **자기소개:** [STEP 3 롤모델 동경 이유 + STEP 4 유산 편지 내용 조합]
- **경험 스토리:** [STEP 2의 경험 3가지를 스토리텔링으로]
- **마지막 행동 유도(CTA):** "[목표와 연결된 행동 유도 문구]"
- **연락처 및 링크:** [표지의 전화번호 있으면 포함]

---

# [요청 사항: 위 정보를 바탕으로 이렇게 작성해 주세요]

## 1. 페이지 구조 (Structure)
아래 섹션 순서대로 구체적인 **디자인 지시사항**과 **들어갈 텍스트**를 작성해 주세요.

**(1) 헤더 (Header)** - 로고와 메뉴 구성
**(2) 히어로 섹션 (Hero Section)** - 메인 카피와 비주얼
**(3) 특징/강점 섹션 (Features)** - 목표 3가지를 강점 카드로
**(4) 소개 및 신뢰도 (About/Proof)** - 롤모델 동경 이유 + 유산 편지 기반 자기소개
**(5) 경험 섹션 (Experience)** - 살아있음을 느낀 경험 3가지
**(6) 행동 유도 및 푸터 (CTA & Footer)** - CTA 버튼과 연락처

## 2. 인터랙션 및 디테일
- **반응형:** 모바일에서도 완벽하게 보이도록
- **모션:** 부드러운 호버 효과와 스크롤 애니메이션

## 3. 톤앤매너
- 모든 문구는 STEP 1 핵심 가치 키워드의 분위기에 맞는 말투로 통일
---

만약 손글씨가 잘 안 보이거나 비어있다면, 그 부분은 [미입력]으로 표시하고 합리적인 기본값으로 대체해주세요."#,
        label = WEBSITE_PROMPT_LABEL
    )
}

/// Image-identity worksheet (session 2) to an AI photoshoot brief.
pub fn photoshoot_prompt() -> String {
    format!(
        r#"이 이미지는 "이미지 아이덴티티 워크북 (2회차)"입니다.

## 워크지 구조 (손글씨로 작성됨)
- **표지**: 이름
- **STEP 1**: 나를 표현하는 이미지 키워드 선택
- **STEP 2**: 닮고 싶은 분위기와 스타일 (인물, 장소, 색감)
- **STEP 3**: 사람들에게 보여주고 싶은 나의 모습
- **STEP 4**: 화보 콘셉트 메모 (배경, 의상, 소품)

먼저 워크지에서 아래 내용을 추출해주세요:

1. **추출된 키워드** (5-7개): 워크지에서 발견한 핵심 이미지 키워드들

그리고 이 정보를 바탕으로 이미지 생성 AI에서 바로 사용할 수 있는 **프로필 화보 프롬프트**를 아래 형식으로 작성해주세요:

**{label}:**

- **콘셉트:** [STEP 3과 STEP 4를 조합한 한 줄 콘셉트]
- **인물 묘사:** [표정, 포즈, 시선 처리]
- **의상 및 스타일링:** [STEP 2 스타일과 STEP 4 의상 메모 기반]
- **배경 및 장소:** [STEP 4 배경 메모 기반, 없으면 키워드 분위기에 맞게]
- **조명과 색감:** [STEP 1 키워드 분위기에 맞는 조명, 색 보정]
- **카메라 설정:** [렌즈, 구도, 심도]
- **영문 프롬프트:** [위 내용을 이미지 생성 AI용 영어 프롬프트 한 문단으로]

---

만약 손글씨가 잘 안 보이거나 비어있다면, 그 부분은 [미입력]으로 표시하고 합리적인 기본값으로 대체해주세요."#,
        label = PHOTOSHOOT_PROMPT_LABEL
    )
}

/// Handwriting extraction from e-book planning worksheets.
pub fn ebook_worksheet_prompt() -> &'static str {
    r#"당신은 E-book 작가를 위한 전문 분석가입니다. 이 워크지 이미지에서 사용자가 직접 손으로 작성한 답변만 추출해주세요.

## 분석 지침:
- "*참고*", "예시", "작성 방법" 등 인쇄된 안내 문구는 무시하세요
- 오직 사용자가 필기한 내용(손글씨, 타이핑된 개인 답변)에만 집중하세요
- 빈칸에 작성된 답변, 메모, 개인적인 생각을 추출하세요

## 응답 형식 (E-book 집필용):

1. **나의 이야기 핵심**: (사용자가 작성한 내용에서 가장 중요한 메시지 한 문장)

2. **책의 소재들**:
   - 경험/에피소드: (사용자가 언급한 구체적인 경험들)
   - 가치관/신념: (사용자가 표현한 믿음이나 가치)
   - 감정/깨달음: (사용자가 느낀 감정이나 인사이트)

3. **E-book 방향 제안**:
   - 추천 장르: (자기계발, 에세이, 자서전 등)
   - 타겟 독자: (이 이야기가 공감될 독자층)
   - 서술 톤: (진솔한, 유머러스한, 성찰적인 등)

4. **원본 필기 내용**: (사용자가 작성한 내용을 있는 그대로 정리)

이미지가 흐리더라도 손글씨 내용을 최대한 해독해주세요."#
}

/// Full e-book draft, answered as a single JSON object.
pub fn ebook_draft_prompt(request: &EbookDraftRequest) -> String {
    let chapter_count = effective_chapter_count(request.chapter_count);
    let preface_text = non_empty(&request.preface_text);

    let mut book_info = vec![format!("- 제목: {}", text_or_empty(&request.title))];
    if let Some(subtitle) = non_empty(&request.subtitle) {
        book_info.push(format!("- 부제: {}", subtitle));
    }
    book_info.push(format!("- 저자: {}", text_or_empty(&request.author)));
    book_info.push(format!("- 주제/내용: {}", text_or_empty(&request.topic)));
    book_info.push(format!("- 챕터 수: {}개", chapter_count));

    let preface_hint = if request.include_preface && preface_text.is_none() {
        "서문 내용 (300-500자, 저자가 독자에게 전하는 말)"
    } else {
        ""
    };
    let epilogue_hint = if request.include_epilogue {
        "에필로그 내용 (300-500자, 마무리 글)"
    } else {
        ""
    };
    let bio_hint = if request.include_author_bio {
        "저자 소개 (100-200자)"
    } else {
        ""
    };

    let mut prompt = format!(
        r#"당신은 전문 작가입니다. 아래 정보를 바탕으로 전자책의 내용을 작성해주세요.

## 책 정보
{book_info}

## 요청 사항

아래 JSON 형식으로 정확하게 출력해주세요. 다른 텍스트 없이 JSON만 출력하세요.

{{
  "preface": "{preface_hint}",
  "chapters": [
    {{
      "title": "챕터 1 제목",
      "content": "챕터 1 본문 내용 (800-1200자)"
    }},
    {{
      "title": "챕터 2 제목",
      "content": "챕터 2 본문 내용 (800-1200자)"
    }}
    // ... {chapter_count}개의 챕터
  ],
  "epilogue": "{epilogue_hint}",
  "authorBio": "{bio_hint}"
}}

## 작성 지침
1. 각 챕터는 주제와 관련된 구체적이고 유익한 내용을 담아주세요.
2. 챕터 제목은 흥미롭고 내용을 잘 반영해야 합니다.
3. 본문은 읽기 쉽고 자연스러운 문체로 작성해주세요.
4. 한국어로 작성해주세요.
5. JSON 형식이 유효하도록 특수문자를 적절히 이스케이프해주세요.
"#,
        book_info = book_info.join("\n"),
    );

    if request.include_preface {
        if let Some(text) = preface_text {
            prompt.push_str(&format!("\n서문은 다음 내용을 기반으로 작성: \"{}\"", text));
        }
    }

    prompt
}

/// Art-direction brief for a text-free cover background.
pub fn cover_brief(request: &CoverImageRequest) -> String {
    let mut book_info = vec![format!("- Title: \"{}\"", text_or_empty(&request.title))];
    if let Some(subtitle) = non_empty(&request.subtitle) {
        book_info.push(format!("- Subtitle: \"{}\"", subtitle));
    }
    if let Some(topic) = non_empty(&request.topic) {
        book_info.push(format!("- Topic/Theme: \"{}\"", topic));
    }
    if let Some(hint) = non_empty(&request.hint) {
        book_info.push(format!("- Style Hint: \"{}\"", hint));
    }

    format!(
        r#"Create a professional e-book cover image with the following specifications:

**Book Information:**
{}

**Design Requirements:**
1. Create a vertical book cover (2:3 aspect ratio, 800x1200 pixels)
2. Professional, clean, and modern design
3. Use sophisticated color palette
4. Include subtle decorative elements that match the book's theme
5. Leave appropriate space for title and author name (but do NOT include any text in the image)
6. The design should evoke emotion and curiosity
7. High-quality, publication-ready aesthetic

**Style Guidelines:**
- Minimalist and elegant
- Korean publishing aesthetic (clean, refined)
- Suitable for both digital and print
- No text, logos, or words in the image

Generate ONLY the background/decorative design for the book cover. The title and author text will be overlaid separately."#,
        book_info.join("\n")
    )
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn text_or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}
