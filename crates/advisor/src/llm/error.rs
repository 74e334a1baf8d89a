//! LLM error types.

use thiserror::Error;

/// Turn a non-success HTTP response into an error, keeping the body as the
/// description. 429 becomes `RateLimit` with the `retry-after` header parsed.
pub async fn error_from_response(response: reqwest::Response) -> LLMError {
    let status = response.status().as_u16();
    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let message = response.text().await.unwrap_or_default();

    if status == 429 {
        LLMError::RateLimit {
            retry_after,
            message,
        }
    } else {
        LLMError::Api { status, message }
    }
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!(", retry after {secs}s"),
        None => String::new(),
    }
}

/// Errors that can occur when making LLM API calls.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP request failed
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Rate limited (429)
    #[error("rate limited (status 429{}): {message}", retry_hint(.retry_after))]
    RateLimit {
        retry_after: Option<u64>,
        message: String,
    },

    /// Response arrived but carried no usable completion
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Coarse classification of an [`LLMError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Timeout,
    Authentication,
    RateLimit,
    Api,
    MalformedResponse,
}

impl LLMError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LLMError::Request(e) if e.is_timeout() => ErrorKind::Timeout,
            LLMError::Request(e) if e.is_decode() => ErrorKind::MalformedResponse,
            LLMError::Request(_) => ErrorKind::Network,
            LLMError::Api {
                status: 401 | 403, ..
            } => ErrorKind::Authentication,
            LLMError::Api { .. } => ErrorKind::Api,
            LLMError::RateLimit { .. } => ErrorKind::RateLimit,
            LLMError::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_kinds() {
        let unauthorized = LLMError::Api {
            status: 401,
            message: "invalid api key".to_string(),
        };
        assert_eq!(unauthorized.kind(), ErrorKind::Authentication);

        let forbidden = LLMError::Api {
            status: 403,
            message: String::new(),
        };
        assert_eq!(forbidden.kind(), ErrorKind::Authentication);

        let server = LLMError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(server.kind(), ErrorKind::Api);
    }

    #[test]
    fn display_is_never_empty() {
        let errors = [
            LLMError::Api {
                status: 400,
                message: String::new(),
            },
            LLMError::RateLimit {
                retry_after: None,
                message: String::new(),
            },
            LLMError::MalformedResponse(String::new()),
        ];
        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn rate_limit_display_keeps_message() {
        let err = LLMError::RateLimit {
            retry_after: Some(20),
            message: "Rate limit reached for requests".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::RateLimit);
        assert_eq!(
            err.to_string(),
            "rate limited (status 429, retry after 20s): Rate limit reached for requests"
        );
    }

    #[test]
    fn rate_limit_display_without_retry_after() {
        let err = LLMError::RateLimit {
            retry_after: None,
            message: "You exceeded your current quota".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "rate limited (status 429): You exceeded your current quota"
        );
    }
}
