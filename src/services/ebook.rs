use anyhow::{Result, anyhow};
use epub_builder::{EpubBuilder, EpubContent, ReferenceType, ZipLibrary};

use crate::models::EbookDraft;

/// Book-level metadata for an EPUB export.
pub struct BookInfo<'a> {
    pub title: &'a str,
    pub subtitle: Option<&'a str>,
    pub author: &'a str,
}

/// A packaged EPUB and the file name it should be downloaded as.
pub struct EpubFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub fn create_epub_from_draft(info: &BookInfo<'_>, draft: &EbookDraft) -> Result<EpubFile> {
    let mut builder = EpubBuilder::new(ZipLibrary::new().map_err(epub_err)?).map_err(epub_err)?;
    builder
        .metadata("title", info.title)
        .map_err(epub_err)?
        .metadata("author", info.author)
        .map_err(epub_err)?
        .metadata("lang", "ko")
        .map_err(epub_err)?;
    if let Some(subtitle) = info.subtitle {
        builder
            .metadata("subject", subtitle)
            .map_err(epub_err)?;
    }
    builder.inline_toc();

    if !draft.preface.trim().is_empty() {
        let page = xhtml_page("서문", &draft.preface);
        builder
            .add_content(
                EpubContent::new("preface.xhtml", page.as_bytes())
                    .title("서문")
                    .reftype(ReferenceType::Preface),
            )
            .map_err(epub_err)?;
    }

    for (i, chapter) in draft.chapters.iter().enumerate() {
        let title = if chapter.title.trim().is_empty() {
            format!("Chapter {}", i + 1)
        } else {
            chapter.title.clone()
        };
        let page = xhtml_page(&title, &chapter.content);
        let mut content =
            EpubContent::new(format!("chapter_{}.xhtml", i + 1), page.as_bytes()).title(title);
        if i == 0 {
            content = content.reftype(ReferenceType::Text);
        }
        builder.add_content(content).map_err(epub_err)?;
    }

    if !draft.epilogue.trim().is_empty() {
        let page = xhtml_page("에필로그", &draft.epilogue);
        builder
            .add_content(EpubContent::new("epilogue.xhtml", page.as_bytes()).title("에필로그"))
            .map_err(epub_err)?;
    }

    if !draft.author_bio.trim().is_empty() {
        let page = xhtml_page("저자 소개", &draft.author_bio);
        builder
            .add_content(EpubContent::new("author.xhtml", page.as_bytes()).title("저자 소개"))
            .map_err(epub_err)?;
    }

    let mut bytes = Vec::new();
    builder.generate(&mut bytes).map_err(epub_err)?;

    Ok(EpubFile {
        file_name: format!("ebook-{}.epub", uuid::Uuid::new_v4()),
        bytes,
    })
}

// epub-builder reports errors through its own type; flatten them into anyhow.
fn epub_err(e: impl std::fmt::Display) -> anyhow::Error {
    anyhow!("epub generation failed: {}", e)
}

/// Minimal XHTML document; blank lines in `body` start a new paragraph.
fn xhtml_page(title: &str, body: &str) -> String {
    let body = body.replace("\r\n", "\n");
    let paragraphs: String = body
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            let escaped = html_escape::encode_text(p).replace('\n', "<br/>");
            format!("<p>{}</p>\n", escaped)
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops">
<head><title>{title}</title></head>
<body>
<h1>{title}</h1>
{paragraphs}</body>
</html>
"#,
        title = html_escape::encode_text(title),
        paragraphs = paragraphs
    )
}
