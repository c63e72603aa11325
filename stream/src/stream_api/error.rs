//! Error taxonomy for the Stream API client and the HTTP status classifier.

use std::fmt;
use std::path::PathBuf;

/// Message used when the API rejects a request without saying why.
const DEFAULT_API_MESSAGE: &str = "API returned error code";

/// Coarse category of an HTTP status code returned by the Stream API.
///
/// The classification is informational only: it is attached to [`ApiError`] so that callers
/// get a hint about what went wrong, but nothing in this crate retries or backs off based on
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    /// `200`
    Success,
    /// `401`, almost always a bad API key.
    Unauthorized,
    /// `403`, which the API also returns for collections the key cannot use.
    Forbidden,
    /// `404`, a bad video, collection or library ID.
    NotFound,
    /// `500`
    ServerError,
    /// Everything else.
    Unexpected,
}

impl StatusCategory {
    /// Classifies any status code. Codes without a dedicated category map to
    /// [`StatusCategory::Unexpected`].
    pub fn from_code(status: u16) -> Self {
        match status {
            200 => Self::Success,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            500 => Self::ServerError,
            _ => Self::Unexpected,
        }
    }

    /// Human-readable description of the category.
    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "(200) Success.",
            Self::Unauthorized => "(401) Unauthorized. Check your API key.",
            Self::Forbidden => "(403) Access was denied.",
            Self::NotFound => "(404) Not found. Check your video, collection, and library ID.",
            Self::ServerError => "(500) Internal server error.",
            Self::Unexpected => "Unexpected error.",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps an HTTP status code to the label of its [`StatusCategory`].
pub fn classify(status: u16) -> &'static str {
    StatusCategory::from_code(status).label()
}

fn status_label(status: &u16) -> &'static str {
    classify(*status)
}

/// A non-2xx response from the Stream API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({})", status_label(.status))]
pub struct ApiError {
    /// The raw HTTP status code.
    pub status: u16,
    /// The error body returned by the server, or a generic message if it sent none.
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            DEFAULT_API_MESSAGE.to_string()
        } else {
            message
        };
        Self { status, message }
    }

    pub fn category(&self) -> StatusCategory {
        StatusCategory::from_code(self.status)
    }
}

/// Everything that can go wrong when talking to the Stream API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request was rejected locally, before anything was sent.
    #[error("invalid request: {0}")]
    Validation(&'static str),

    /// A local file could not be read, so nothing was sent.
    #[error("could not read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request never got a well-formed HTTP response.
    #[error("transport failure")]
    Transport(#[from] reqwest::Error),

    /// A successful response carried a body that is not valid JSON.
    #[error("response body is not valid JSON")]
    Json(#[from] serde_json::Error),

    /// A successful response carried no body where a document was expected.
    #[error("response body was empty")]
    EmptyResponse,

    /// A required field is absent from (or has the wrong type in) a response document.
    #[error("response is missing required field `{0}`")]
    MissingField(&'static str),

    /// An element of a video list is not a JSON object.
    #[error("video list entry {index} is not an object")]
    MalformedItem { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn known_codes_have_dedicated_labels() {
        assert_eq!(classify(200), "(200) Success.");
        assert_eq!(classify(401), "(401) Unauthorized. Check your API key.");
        assert_eq!(classify(403), "(403) Access was denied.");
        assert_eq!(
            classify(404),
            "(404) Not found. Check your video, collection, and library ID."
        );
        assert_eq!(classify(500), "(500) Internal server error.");
    }

    #[test]
    fn unmapped_codes_are_unexpected() {
        for status in [0, 201, 204, 400, 418, 429, 502, 503, u16::MAX] {
            assert_eq!(StatusCategory::from_code(status), StatusCategory::Unexpected);
            assert_eq!(classify(status), "Unexpected error.");
        }
    }

    #[test]
    fn api_error_message_includes_label() {
        let err = ApiError::new(404, "Video not found");
        assert_eq!(err.category(), StatusCategory::NotFound);
        assert_eq!(
            err.to_string(),
            "Video not found ((404) Not found. Check your video, collection, and library ID.)"
        );
    }

    #[test]
    fn api_error_without_body_uses_generic_message() {
        let err = ApiError::new(418, "  ");
        assert_eq!(err.message, "API returned error code");
        assert_eq!(err.to_string(), "API returned error code (Unexpected error.)");
    }
}
