//! Conversions from external infrastructure errors into domain errors.

use chainboard_domain::ChainboardError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ChainboardError);

impl From<InfraError> for ChainboardError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ChainboardError> for InfraError {
    fn from(value: ChainboardError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoChainboardError {
    fn into_chainboard(self) -> ChainboardError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ChainboardError */
/* -------------------------------------------------------------------------- */

impl IntoChainboardError for reqwest::Error {
    fn into_chainboard(self) -> ChainboardError {
        if self.is_timeout() {
            ChainboardError::Network(format!("request timed out: {self}"))
        } else if self.is_connect() {
            ChainboardError::Network(format!("connection failed: {self}"))
        } else if self.is_decode() {
            ChainboardError::Content(format!("failed to decode response body: {self}"))
        } else {
            ChainboardError::Network(self.to_string())
        }
    }
}

impl From<reqwest::Error> for InfraError {
    fn from(value: reqwest::Error) -> Self {
        Self(value.into_chainboard())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → ChainboardError */
/* -------------------------------------------------------------------------- */

impl IntoChainboardError for serde_json::Error {
    fn into_chainboard(self) -> ChainboardError {
        ChainboardError::Content(format!("invalid JSON: {self}"))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        Self(value.into_chainboard())
    }
}

/* -------------------------------------------------------------------------- */
/* toml::de::Error → ChainboardError */
/* -------------------------------------------------------------------------- */

impl IntoChainboardError for toml::de::Error {
    fn into_chainboard(self) -> ChainboardError {
        ChainboardError::Config(format!("invalid TOML: {self}"))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        Self(value.into_chainboard())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → ChainboardError */
/* -------------------------------------------------------------------------- */

impl IntoChainboardError for std::io::Error {
    fn into_chainboard(self) -> ChainboardError {
        ChainboardError::Internal(format!("I/O error: {self}"))
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        Self(value.into_chainboard())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for foreign-error conversions.
    use super::*;

    /// Validates the JSON conversion path.
    ///
    /// Assertions:
    /// - Confirms a serde_json failure converts to a `Content` error with
    ///   the cause in the message.
    #[test]
    fn test_serde_json_error_maps_to_content() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();

        let err: InfraError = parse_err.into();

        match err.0 {
            ChainboardError::Content(message) => assert!(message.contains("invalid JSON")),
            other => panic!("expected Content error, got {other:?}"),
        }
    }

    /// Validates the TOML conversion path.
    ///
    /// Assertions:
    /// - Confirms a toml failure converts to a `Config` error.
    #[test]
    fn test_toml_error_maps_to_config() {
        let parse_err = toml::from_str::<toml::Value>("=broken=").unwrap_err();

        let err: InfraError = parse_err.into();

        assert!(matches!(err.0, ChainboardError::Config(_)));
    }

    /// Validates the I/O conversion path.
    ///
    /// Assertions:
    /// - Confirms an io::Error converts to an `Internal` error.
    #[test]
    fn test_io_error_maps_to_internal() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");

        let err: InfraError = io_err.into();

        assert!(matches!(err.0, ChainboardError::Internal(_)));
    }

    /// Validates the round trip back into the domain error.
    ///
    /// Assertions:
    /// - Confirms `InfraError` unwraps to the wrapped domain error.
    #[test]
    fn test_round_trip_into_domain_error() {
        let wrapped = InfraError(ChainboardError::NotFound("gone".to_string()));

        let domain: ChainboardError = wrapped.into();

        assert!(matches!(domain, ChainboardError::NotFound(_)));
    }
}
