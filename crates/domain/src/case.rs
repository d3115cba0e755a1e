//! Exec cases sent to the REPL function.
//!
//! Each case carries a shell snippet that travels to the function as a
//! single base64url path segment of `/api/exec/{encoded}`.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;

use crate::error::{DomainError, DomainResult};

/// A named shell snippet exercised against the exec endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecCase {
    /// Human-readable case name shown in the summary.
    pub name: &'static str,
    /// Shell code executed by the REPL function.
    pub code: &'static str,
}

impl ExecCase {
    /// Creates a new exec case.
    #[must_use]
    pub const fn new(name: &'static str, code: &'static str) -> Self {
        Self { name, code }
    }

    /// Returns the snippet encoded for use as a URL path segment.
    #[must_use]
    pub fn encoded(&self) -> String {
        encode_snippet(self.code)
    }

    /// Returns the request path for this case, relative to the base URL.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/api/exec/{}", self.encoded())
    }
}

static DEFAULT_CASES: [ExecCase; 4] = [
    ExecCase::new("Simple echo", "echo 'Hello from bash REPL!'"),
    ExecCase::new("Date command", "date"),
    ExecCase::new("Environment check", "echo $USER && pwd"),
    ExecCase::new("Math calculation", "echo $((2 + 2))"),
];

/// The fixed battery of exec cases, in execution order.
#[must_use]
pub fn default_cases() -> &'static [ExecCase] {
    &DEFAULT_CASES
}

/// Encodes a shell snippet with the URL-safe base64 alphabet.
#[must_use]
pub fn encode_snippet(code: &str) -> String {
    URL_SAFE.encode(code.as_bytes())
}

/// Decodes a snippet produced by [`encode_snippet`].
///
/// # Errors
///
/// Returns [`DomainError::InvalidEncoding`] if the input is not valid
/// base64url or does not decode to UTF-8.
pub fn decode_snippet(encoded: &str) -> DomainResult<String> {
    let bytes = URL_SAFE
        .decode(encoded)
        .map_err(|e| DomainError::InvalidEncoding(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| DomainError::InvalidEncoding(e.to_string()))
}
