//! Outfit pairing service boundary
//!
//! The wizard only ever talks to a [`PairingService`]. Production code uses
//! [`HttpPairingService`]; `--offline` and the tests use
//! [`OfflinePairingService`], which answers deterministically without a
//! network.
//!
//! # Wire contract
//!
//! ```text
//! POST /pair   {"age_group": "18–24", "gender": "Female", "style": "Chic", "palette": "Cool"}
//! 200          {"best_outfit": {"score": 87.5, "top": "...", "bottom": "...", "reasons": ["..."]}}
//! ```

mod dispatch;
mod http;

pub use dispatch::{PairingDispatcher, PairingMessage};
pub use http::HttpPairingService;

use crate::error::PairingError;
use serde::{Deserialize, Serialize};

/// The four answers as the service expects them, all plain text labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRequest {
    pub age_group: String,
    pub gender: String,
    pub style: String,
    pub palette: String,
}

/// A single recommended outfit.
///
/// The score is kept as the raw JSON number so it renders exactly as the
/// service sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outfit {
    pub score: serde_json::Number,
    /// Image reference for the top garment
    pub top: String,
    /// Image reference for the bottom garment
    pub bottom: String,
    #[serde(default)]
    pub reasons: Vec<String>,
}

impl Outfit {
    /// Lines for verbatim display: score, images, then one line per reason.
    pub fn display_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Score: {}", self.score),
            format!("Top: {}", self.top),
            format!("Bottom: {}", self.bottom),
        ];
        lines.extend(self.reasons.iter().map(|r| format!("• {}", r)));
        lines
    }
}

/// Successful response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct PairingResponse {
    pub best_outfit: Outfit,
}

/// Error body the service sends with non-success statuses
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
    pub fix: Option<String>,
}

impl ErrorBody {
    /// `"<error> (<fix>)"`, or `None` when the body carries no error text.
    pub fn message(&self) -> Option<String> {
        let error = self.error.as_deref()?.trim();
        if error.is_empty() {
            return None;
        }
        Some(match self.fix.as_deref() {
            Some(fix) if !fix.trim().is_empty() => format!("{} ({})", error, fix.trim()),
            _ => error.to_string(),
        })
    }
}

/// Something that turns four answers into an outfit.
pub trait PairingService: Send + Sync {
    fn submit_answers(&self, request: &PairingRequest) -> Result<Outfit, PairingError>;
}

/// Deterministic stand-in used by `--offline` and in tests.
#[derive(Debug, Clone, Default)]
pub struct OfflinePairingService;

impl PairingService for OfflinePairingService {
    fn submit_answers(&self, request: &PairingRequest) -> Result<Outfit, PairingError> {
        let palette = request.palette.to_lowercase();
        let style = request.style.to_lowercase();
        Ok(Outfit {
            score: serde_json::Number::from(80),
            top: format!("/uploads/{}_{}_top.png", palette, style),
            bottom: format!("/uploads/{}_{}_bottom.png", palette, style),
            reasons: vec![
                format!("A {} look suits the {} age group.", style, request.age_group),
                format!("{} tones keep the pairing balanced.", request.palette),
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PairingRequest {
        PairingRequest {
            age_group: "18–24".to_string(),
            gender: "Female".to_string(),
            style: "Chic".to_string(),
            palette: "Cool".to_string(),
        }
    }

    #[test]
    fn test_request_serializes_four_fields() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["age_group"], "18–24");
        assert_eq!(json["gender"], "Female");
        assert_eq!(json["style"], "Chic");
        assert_eq!(json["palette"], "Cool");
        assert_eq!(json.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_response_without_reasons_decodes() {
        let body = r#"{"best_outfit": {"score": 91, "top": "/uploads/a.png", "bottom": "/uploads/b.png"}}"#;
        let parsed: PairingResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.best_outfit.reasons.is_empty());
        assert_eq!(parsed.best_outfit.score.to_string(), "91");
    }

    #[test]
    fn test_display_lines_keep_order() {
        let outfit = Outfit {
            score: serde_json::from_str("87.5").unwrap(),
            top: "t.png".to_string(),
            bottom: "b.png".to_string(),
            reasons: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(
            outfit.display_lines(),
            vec!["Score: 87.5", "Top: t.png", "Bottom: b.png", "• first", "• second"]
        );
    }

    #[test]
    fn test_error_body_message() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"error": "Not enough clothes uploaded", "fix": "Upload a top"}"#,
        )
        .unwrap();
        assert_eq!(
            body.message().as_deref(),
            Some("Not enough clothes uploaded (Upload a top)")
        );
        assert_eq!(ErrorBody::default().message(), None);
    }

    #[test]
    fn test_offline_service_is_deterministic() {
        let service = OfflinePairingService;
        let a = service.submit_answers(&request()).unwrap();
        let b = service.submit_answers(&request()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.top, "/uploads/cool_chic_top.png");
    }
}
