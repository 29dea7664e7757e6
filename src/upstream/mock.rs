use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Upstream, UpstreamError};

/// A scripted upstream for tests. Returns the same canned outcome on every
/// call and counts how often it was asked.
pub struct MockUpstream {
    configured: bool,
    analysis: Result<String, UpstreamError>,
    probe: Result<u16, UpstreamError>,
    analyze_calls: AtomicUsize,
    probe_calls: AtomicUsize,
}

impl MockUpstream {
    /// Configured upstream whose analysis succeeds with `text` and whose probe sees 200.
    pub fn answering(text: &str) -> Self {
        Self {
            configured: true,
            analysis: Ok(text.to_string()),
            probe: Ok(200),
            analyze_calls: AtomicUsize::new(0),
            probe_calls: AtomicUsize::new(0),
        }
    }

    /// Configured upstream whose analysis always fails with `error`.
    pub fn failing(error: UpstreamError) -> Self {
        Self {
            analysis: Err(error),
            ..Self::answering("")
        }
    }

    /// Upstream with no API key.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            analysis: Err(UpstreamError::MissingApiKey),
            probe: Err(UpstreamError::MissingApiKey),
            ..Self::answering("")
        }
    }

    /// Replace the probe outcome.
    pub fn with_probe(mut self, probe: Result<u16, UpstreamError>) -> Self {
        self.probe = probe;
        self
    }

    pub fn analyze_calls(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }

    pub fn probe_calls(&self) -> usize {
        self.probe_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Upstream for MockUpstream {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn analyze(&self, _segment: &str) -> Result<String, UpstreamError> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        self.analysis.clone()
    }

    async fn probe(&self) -> Result<u16, UpstreamError> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        self.probe.clone()
    }
}
