//! Redirect query parameters.

/// The query parameters the provider redirect carries back.
///
/// Empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    /// Authorization code.
    pub code: Option<String>,
    /// Correlation token.
    pub state: Option<String>,
    /// Provider error code.
    pub error: Option<String>,
    /// Provider error description.
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// Parse a raw query string, with or without the leading `?`.
    ///
    /// ```rust
    /// use toolscout_connect::CallbackParams;
    ///
    /// let params = CallbackParams::from_query("?code=abc&state=x%2Fy");
    /// assert_eq!(params.code.as_deref(), Some("abc"));
    /// assert_eq!(params.state.as_deref(), Some("x/y"));
    /// ```
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    /// Build from decoded key/value pairs. The first occurrence of a key wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "code" => &mut params.code,
                "state" => &mut params.state,
                "error" => &mut params.error,
                "error_description" => &mut params.error_description,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params.normalized()
    }

    /// Build from the two required values.
    pub fn new(code: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            state: Some(state.into()),
            ..Self::default()
        }
    }

    /// Drop empty values so that `Some("")` never reaches the flow.
    pub fn normalized(self) -> Self {
        fn keep(v: Option<String>) -> Option<String> {
            v.filter(|s| !s.is_empty())
        }
        Self {
            code: keep(self.code),
            state: keep(self.state),
            error: keep(self.error),
            error_description: keep(self.error_description),
        }
    }

    /// The `(code, state)` identity that guards re-runs of the flow.
    pub fn identity(&self) -> (Option<String>, Option<String>) {
        (self.code.clone(), self.state.clone())
    }
}
