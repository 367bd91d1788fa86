//! Error type for the exporter plumbing.
//!
//! The mapper never fails; these cover the edges around it: running smartctl,
//! parsing its output and rendering the exposition text.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// smartctl could not be started at all.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// smartctl ran but its output was unusable for the given device.
    #[error("unusable smartctl output for {device}: {reason}")]
    Parse { device: String, reason: String },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prometheus: {0}")]
    Prometheus(#[from] prometheus::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_device() {
        let err = Error::Parse {
            device: "/dev/sda".to_string(),
            reason: "empty output".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unusable smartctl output for /dev/sda: empty output"
        );
    }

    #[test]
    fn json_error_converts() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Json(_)));
    }
}
