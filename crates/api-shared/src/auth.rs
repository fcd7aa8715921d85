/// Checks API keys against the key configured at startup.
///
/// The expected key is read once (from `API_KEY`) by the binary and handed in here, so request
/// handling never touches the process environment.
#[derive(Clone, Debug)]
pub struct ApiKeyValidator {
    expected: Option<String>,
}

impl ApiKeyValidator {
    /// An empty or whitespace-only key counts as not configured.
    pub fn new(expected: Option<String>) -> Self {
        Self {
            expected: expected.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.expected.is_some()
    }

    /// Validates the provided API key.
    ///
    /// Returns `Ok(())` if the key is valid, `unauthenticated` if it does not match and
    /// `internal` if no key was configured.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self, provided_key: &str) -> Result<(), tonic::Status> {
        let expected_key = self
            .expected
            .as_deref()
            .ok_or_else(|| tonic::Status::internal("API_KEY not configured"))?;

        if provided_key == expected_key {
            Ok(())
        } else {
            Err(tonic::Status::unauthenticated("Invalid API key"))
        }
    }
}
