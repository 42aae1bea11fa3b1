//! Shared navigation header, injected into every page we serve.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

pub const STYLE_ID: &str = "header-styles";
pub const PLACEHOLDER_ID: &str = "header-placeholder";
pub const NAV_ID: &str = "navbar";

static BODY_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<body\b[^>]*>").expect("body pattern compiles"));

#[derive(Debug, Clone)]
pub struct HeaderOptions {
    pub show_start_button: bool,
    pub start_button_link: String,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            show_start_button: true,
            start_button_link: "workbook_1.html".to_string(),
        }
    }
}

pub fn header_html(options: &HeaderOptions) -> String {
    let start_button = if options.show_start_button {
        format!(
            r#"
                <a href="{}"
                    class="px-6 py-2.5 bg-text-dark text-white rounded-full text-sm font-bold hover:bg-soft-gold transition-all duration-300 shadow-lg flex items-center gap-2">
                    <i class="fa-solid fa-pen-nib"></i>
                    <span>시작하기</span>
                </a>"#,
            html_escape::encode_double_quoted_attribute(&options.start_button_link)
        )
    } else {
        String::new()
    };

    format!(
        r#"<nav class="fixed w-full z-50 header-blur transition-all duration-300" id="{nav_id}">
        <div class="w-full px-[60px] py-3 flex justify-between items-center">
            <a href="/" class="flex items-center gap-3">
                <img src="./assets/logo.svg" alt="Logo" class="w-10 h-10">
                <span class="text-2xl font-serif font-bold tracking-tight">Algrowithm</span>
            </a>

            <div class="flex items-center gap-10">
                <div class="hidden md:flex items-center gap-12 text-lg font-medium text-gray-700">
                    <a href="about.html" class="hover:text-soft-gold transition-colors">About</a>

                    <div class="dropdown">
                        <button class="hover:text-soft-gold transition-colors flex items-center gap-1">
                            실습
                            <i class="fa-solid fa-chevron-down text-[12px] ml-1"></i>
                        </button>
                        <div class="dropdown-menu">
                            <a href="workbook_1.html" class="dropdown-item"><span class="text-soft-gold font-bold mr-2">01</span> 나는 누구인가</a>
                            <a href="workbook_2.html" class="dropdown-item"><span class="text-soft-gold font-bold mr-2">02</span> 이미지 아이덴티티</a>
                            <a href="workbook_3.html" class="dropdown-item"><span class="text-soft-gold font-bold mr-2">03</span> 커리어 브랜딩</a>
                            <a href="workbook_4.html" class="dropdown-item"><span class="text-soft-gold font-bold mr-2">04</span> 내가 원하는 삶</a>
                            <div class="border-t border-gray-100 my-2"></div>
                            <a href="prompt-studio.html" class="dropdown-item"><i class="fa-solid fa-wand-magic-sparkles text-soft-gold mr-2"></i> 웹사이트 생성 프롬프트</a>
                            <a href="ebook-generator.html" class="dropdown-item"><i class="fa-solid fa-pen-fancy text-soft-gold mr-2"></i> E-book 프롬프트</a>
                            <a href="ebook-pdf-generator.html" class="dropdown-item"><i class="fa-solid fa-file-pdf text-soft-gold mr-2"></i> E-book PDF 생성</a>
                        </div>
                    </div>

                    <a href="/schedule" class="hover:text-soft-gold transition-colors">일정</a>
                </div>
{start_button}
            </div>
        </div>
    </nav>"#,
        nav_id = NAV_ID,
    )
}

pub const HEADER_STYLES: &str = r#"
    .header-blur {
        background: rgba(255, 255, 255, 0.15);
        backdrop-filter: blur(20px);
        -webkit-backdrop-filter: blur(20px);
    }
    .dropdown { position: relative; }
    .dropdown-menu {
        position: absolute;
        top: 100%;
        left: 50%;
        transform: translateX(-50%) translateY(10px);
        background: rgba(255, 255, 255, 0.98);
        backdrop-filter: blur(20px);
        border-radius: 12px;
        box-shadow: 0 10px 40px rgba(0, 0, 0, 0.1);
        opacity: 0;
        visibility: hidden;
        transition: all 0.3s ease;
        min-width: 240px;
        padding: 10px 0;
        z-index: 100;
    }
    .dropdown:hover .dropdown-menu {
        opacity: 1;
        visibility: visible;
        transform: translateX(-50%) translateY(0);
    }
    .dropdown-item {
        display: block;
        padding: 14px 24px;
        color: #1a1a1a;
        font-size: 15px;
        transition: all 0.2s ease;
    }
    .dropdown-item:hover {
        background: rgba(212, 175, 55, 0.1);
        color: #d4af37;
    }
"#;

/// Inserts the navigation header and its styles into `document`.
///
/// Safe to call repeatedly: the style block is added once, and an existing
/// header (inside the placeholder or as a bare `nav#navbar`) is replaced
/// rather than duplicated.
pub fn inject_header(document: &str, options: &HeaderOptions) -> String {
    let mut doc = document.to_string();
    let nav = header_html(options);

    if let Some(element) = find_element(&doc, "div", PLACEHOLDER_ID) {
        doc.replace_range(element.inner, &nav);
    } else if let Some(element) = find_element(&doc, "nav", NAV_ID) {
        doc.replace_range(element.outer, &nav);
    } else if let Some(body) = BODY_OPEN.find(&doc) {
        doc.insert_str(body.end(), &format!("\n{}", nav));
    } else {
        doc.insert_str(0, &format!("{}\n", nav));
    }

    if find_element(&doc, "style", STYLE_ID).is_none() {
        let style = format!("<style id=\"{}\">{}</style>\n", STYLE_ID, HEADER_STYLES);
        match find_ci(&doc, "</head>") {
            Some(pos) => doc.insert_str(pos, &style),
            None => doc.insert_str(0, &style),
        }
    }

    doc
}

struct ElementSpan {
    outer: Range<usize>,
    inner: Range<usize>,
}

/// Locates `<tag ... id="id">...</tag>`, balancing nested tags of the same name.
fn find_element(doc: &str, tag: &str, id: &str) -> Option<ElementSpan> {
    let open = Regex::new(&format!(
        r#"(?i)<{tag}\b[^>]*\bid\s*=\s*["']{id}["'][^>]*>"#,
        tag = regex::escape(tag),
        id = regex::escape(id)
    ))
    .ok()?;
    let start = open.find(doc)?;

    let tags = Regex::new(&format!(r"(?i)<(/?){}\b[^>]*>", regex::escape(tag))).ok()?;
    let mut depth = 1usize;
    for m in tags.find_iter(&doc[start.end()..]) {
        if m.as_str().starts_with("</") {
            depth -= 1;
            if depth == 0 {
                let close_start = start.end() + m.start();
                let close_end = start.end() + m.end();
                return Some(ElementSpan {
                    outer: start.start()..close_end,
                    inner: start.end()..close_start,
                });
            }
        } else {
            depth += 1;
        }
    }
    None
}

fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack.to_ascii_lowercase().find(&needle.to_ascii_lowercase())
}
