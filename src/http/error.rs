use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Catalog returned {status}: {message}")]
    Status {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    code: Option<String>,
}

impl ApiError {
    /// Build a status error from a non-success response body. The catalog
    /// answers with `{ "error": ..., "code": ... }`; anything else is kept raw.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => Self::Status {
                status,
                code: parsed.code,
                message: parsed.error,
            },
            Err(_) => Self::Status {
                status,
                code: None,
                message: if body.trim().is_empty() {
                    "empty response".to_string()
                } else {
                    body.trim().to_string()
                },
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_uses_catalog_body() {
        let err = ApiError::from_response(400, r#"{"error":"Valid ID is required","code":"INVALID_ID"}"#);
        match &err {
            ApiError::Status { status, code, message } => {
                assert_eq!(*status, 400);
                assert_eq!(code.as_deref(), Some("INVALID_ID"));
                assert_eq!(message, "Valid ID is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "Catalog returned 400: Valid ID is required");
    }

    #[test]
    fn status_error_without_json_keeps_raw_text() {
        let err = ApiError::from_response(502, "Bad Gateway");
        assert!(matches!(
            err,
            ApiError::Status { status: 502, code: None, ref message } if message == "Bad Gateway"
        ));

        let err = ApiError::from_response(404, r#"{"error":"Song not found"}"#);
        assert!(err.is_not_found());
    }
}
