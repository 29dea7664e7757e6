pub mod mock;
pub mod openrouter;

use async_trait::async_trait;

/// Why an upstream call produced no usable analysis.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    /// No API key was loaded at startup. Nothing was sent.
    #[error("API key not configured")]
    MissingApiKey,
    /// Upstream answered with something other than 200.
    #[error("API request failed: {code} {body}")]
    Status { code: u16, body: String },
    /// 200, but the body had no usable `choices`. Carries the raw body.
    #[error("API response format abnormal: {0}")]
    Format(String),
    /// 200 with `choices`, but the first choice carried no text content.
    #[error("{0}")]
    Decode(String),
    /// The bounded wait elapsed.
    #[error("request timed out")]
    Timeout,
    /// Any other transport failure.
    #[error("{0}")]
    Network(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Network(error_chain(&e))
        }
    }
}

/// Render an error and all of its sources, outermost first, joined by `": "`.
/// reqwest's own message only names the URL; the cause is further down.
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut detail = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !detail.ends_with(&text) {
            detail.push_str(": ");
            detail.push_str(&text);
        }
        source = cause.source();
    }
    detail
}

/// The chat-completion service the gateway relays to.
/// Could be OpenRouter, or a scripted stand-in for tests.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Whether an API key is available. Calls fail with
    /// [`UpstreamError::MissingApiKey`] when this is false.
    fn is_configured(&self) -> bool;

    /// Analyze one segment. Exactly one upstream request, no retries.
    async fn analyze(&self, segment: &str) -> Result<String, UpstreamError>;

    /// Minimal reachability probe. Returns whatever HTTP status upstream sent;
    /// only transport failures are errors.
    async fn probe(&self) -> Result<u16, UpstreamError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Layer {
        msg: &'static str,
        cause: Option<Box<Layer>>,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.msg)
        }
    }

    impl std::error::Error for Layer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            self.cause.as_deref().map(|c| c as &(dyn std::error::Error + 'static))
        }
    }

    #[test]
    fn error_chain_includes_every_cause() {
        let err = Layer {
            msg: "error sending request for url (http://127.0.0.1:9/)",
            cause: Some(Box::new(Layer {
                msg: "client error (Connect)",
                cause: Some(Box::new(Layer {
                    msg: "Connection refused (os error 111)",
                    cause: None,
                })),
            })),
        };
        assert_eq!(
            error_chain(&err),
            "error sending request for url (http://127.0.0.1:9/): client error (Connect): Connection refused (os error 111)"
        );
    }

    #[test]
    fn error_chain_without_source_is_display() {
        let err = Layer {
            msg: "builder error",
            cause: None,
        };
        assert_eq!(error_chain(&err), "builder error");
    }
}
