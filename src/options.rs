//! Renderer configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default limit on element nesting.
///
/// Rendering recurses once or twice per level, so the limit has to fail a tree
/// before it exhausts a 2 MiB thread stack, including in debug builds.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options controlling a [`Renderer`](crate::Renderer).
///
/// Options can be deserialized; missing fields take their default values.
///
/// ```
/// use hyperons::RenderOptions;
///
/// let options = RenderOptions::from_json(r#"{ "doctype": true }"#)?;
/// assert!(options.doctype);
/// assert_eq!(options.max_depth, hyperons::DEFAULT_MAX_DEPTH);
/// # Ok::<(), hyperons::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RenderOptions {
    /// Prefix the output with `<!DOCTYPE html>`.
    pub doctype: bool,
    /// Maximum nesting depth of the element tree. Exceeding it is a render
    /// failure that error boundaries can recover from.
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            doctype: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RenderOptions {
    /// Parses options from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON or unknown fields, and
    /// [`ConfigError::ZeroDepth`] if `maxDepth` is zero.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()
    }

    /// Checks that the options can render anything at all.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDepth`] if `max_depth` is zero.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(self)
    }

    /// Sets whether a doctype is emitted.
    #[must_use]
    pub const fn with_doctype(mut self, doctype: bool) -> Self {
        self.doctype = doctype;
        self
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        assert_eq!(RenderOptions::from_json("{}").unwrap(), RenderOptions::default());
    }

    #[test]
    fn test_camel_case_fields() {
        let options = RenderOptions::from_json(r#"{ "maxDepth": 16, "doctype": true }"#).unwrap();
        assert_eq!(options, RenderOptions::default().with_doctype(true).with_max_depth(16));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let error = RenderOptions::from_json(r#"{ "pretty": true }"#).unwrap_err();
        assert!(matches!(error, ConfigError::Json(_)));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let error = RenderOptions::from_json(r#"{ "maxDepth": 0 }"#).unwrap_err();
        assert!(matches!(error, ConfigError::ZeroDepth));
    }

    #[test]
    fn test_serialize_round_trip_names() {
        let json = serde_json::to_string(&RenderOptions::default()).unwrap();
        assert_eq!(json, r#"{"doctype":false,"maxDepth":256}"#);
    }
}
