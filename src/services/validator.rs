//! Presence checks for request bodies. Only "is it there and non-empty" is
//! checked; malformed payloads are left for the generation API to reject.

use crate::error::ApiError;
use crate::models::{
    AnalyzeRequest, CoverImageRequest, EbookAnalysisRequest, EbookDraftRequest,
    EpubExportRequest,
};

pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl Validate for AnalyzeRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if present(&self.image) {
            Ok(())
        } else {
            Err(ApiError::bad_request("Image is required"))
        }
    }
}

impl Validate for EbookAnalysisRequest {
    fn validate(&self) -> Result<(), ApiError> {
        match &self.images {
            Some(images) if !images.is_empty() => Ok(()),
            _ => Err(ApiError::bad_request("images array is required")),
        }
    }
}

impl Validate for CoverImageRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if present(&self.title) {
            Ok(())
        } else {
            Err(ApiError::bad_request("title is required"))
        }
    }
}

impl Validate for EbookDraftRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if present(&self.title) && present(&self.author) && present(&self.topic) {
            Ok(())
        } else {
            Err(ApiError::bad_request("title, author, topic are required"))
        }
    }
}

impl Validate for EpubExportRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if !(present(&self.title) && present(&self.author)) {
            return Err(ApiError::bad_request("title, author are required"));
        }
        if self.draft.chapters.is_empty() {
            return Err(ApiError::bad_request("chapters array is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Chapter, ImageInput};

    fn rejected(result: Result<(), ApiError>) -> String {
        match result {
            Err(ApiError::BadRequest(message)) => message,
            other => panic!("expected a bad request, got {other:?}"),
        }
    }

    #[test]
    fn analyze_requires_image() {
        assert_eq!(
            rejected(AnalyzeRequest::default().validate()),
            "Image is required"
        );
        let request = AnalyzeRequest {
            image: Some(String::new()),
        };
        assert!(request.validate().is_err());

        let request = AnalyzeRequest {
            image: Some("data:image/png;base64,AAAA".to_string()),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn ebook_analysis_requires_non_empty_images() {
        let request = EbookAnalysisRequest {
            images: Some(Vec::new()),
        };
        assert_eq!(rejected(request.validate()), "images array is required");

        let request = EbookAnalysisRequest {
            images: Some(vec![ImageInput {
                data: "AAAA".to_string(),
                mime_type: "image/jpeg".to_string(),
            }]),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn draft_requires_title_author_topic() {
        let mut request = EbookDraftRequest {
            title: Some("t".to_string()),
            author: Some("a".to_string()),
            ..Default::default()
        };
        assert_eq!(
            rejected(request.validate()),
            "title, author, topic are required"
        );

        request.topic = Some("주제".to_string());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn cover_requires_title() {
        assert_eq!(
            rejected(CoverImageRequest::default().validate()),
            "title is required"
        );
    }

    #[test]
    fn export_requires_chapters() {
        let mut request = EpubExportRequest {
            title: Some("t".to_string()),
            author: Some("a".to_string()),
            ..Default::default()
        };
        assert_eq!(rejected(request.validate()), "chapters array is required");

        request.draft.chapters.push(Chapter::default());
        assert!(request.validate().is_ok());
    }
}
