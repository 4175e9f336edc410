//! Compilation error taxonomy
//!
//! Every failure the engine or registry can report. All variants carry the
//! offending path or parameter so callers can render actionable messages.

use thiserror::Error;

/// Error produced during compilation or registry administration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// A configuration key does not name any registered capability
    #[error("unknown capability '{path}'")]
    UnknownCapability { path: String },

    /// The installed version has no matching generator band
    #[error("capability '{path}' does not support version {version} (supported: {supported})")]
    UnsupportedVersion {
        path: String,
        version: String,
        supported: String,
    },

    /// A parameter key is not declared in the capability's schema
    #[error("capability '{capability}' has no parameter '{name}'")]
    UnknownParameter { capability: String, name: String },

    /// A required parameter was not supplied
    #[error("capability '{capability}' requires parameter '{name}'")]
    MissingParameter { capability: String, name: String },

    /// A parameter value has the wrong kind or shape
    #[error("parameter '{name}' of '{capability}' expects {expected}, got {actual}")]
    InvalidParameterShape {
        capability: String,
        name: String,
        expected: &'static str,
        actual: String,
    },

    /// An administrative path does not resolve to a registry entry
    #[error("no registry entry at '{path}'")]
    UnknownPath { path: String },

    /// A version string could not be parsed
    #[error("invalid version '{value}'")]
    InvalidVersion { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CompileError::UnknownCapability {
            path: "job.wrappers.bogus".to_string(),
        };
        assert_eq!(format!("{}", err), "unknown capability 'job.wrappers.bogus'");

        let err = CompileError::MissingParameter {
            capability: "nodejs".to_string(),
            name: "node_installation_name".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "capability 'nodejs' requires parameter 'node_installation_name'"
        );
    }

    #[test]
    fn test_shape_error_display() {
        let err = CompileError::InvalidParameterShape {
            capability: "xvfb".to_string(),
            name: "timeout".to_string(),
            expected: "integer",
            actual: "string".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "parameter 'timeout' of 'xvfb' expects integer, got string"
        );
    }
}
