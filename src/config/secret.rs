use std::fmt;

/// Bearer token for the upstream API.
///
/// Read once from the environment at startup. `Debug` never prints the value,
/// so it is safe to hold inside logged structs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Trim `raw` and wrap it. Blank input yields `None`.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Read the key from `var`. Unset, non-unicode and blank are all treated as absent.
    pub fn from_env(var: &str) -> Option<Self> {
        std::env::var(var).ok().and_then(|value| Self::new(&value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
