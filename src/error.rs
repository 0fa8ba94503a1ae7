use std::env;
use std::fmt;

pub const MISSING_ENDPOINT_MESSAGE: &str = "Please enter an origin and a destination.";
pub const TRANSPORT_FALLBACK_MESSAGE: &str = "Could not contact the server.";

#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn is_config_error(&self) -> bool {
        matches!(self.code, 1 | 2)
    }

    pub fn is_transport_error(&self) -> bool {
        self.code == 3
    }

    pub fn is_engine_error(&self) -> bool {
        self.code == 4
    }

    pub fn is_validation_error(&self) -> bool {
        self.code >= 100
    }

    pub fn is_missing_endpoint_error(&self) -> bool {
        self.code == 100
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        tracing::warn!("routing engine returned an unreadable body: {}", err);
        transport_error()
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    Error {
        code: 1,
        message: format!("environment variable error: {}", err),
    }
}

pub fn invalid_config_error(key: &str) -> Error {
    Error {
        code: 2,
        message: format!("invalid configuration value for {}", key),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    tracing::warn!("routing engine request failed: {}", err);
    transport_error()
}

pub fn transport_error() -> Error {
    Error {
        code: 3,
        message: TRANSPORT_FALLBACK_MESSAGE.into(),
    }
}

pub fn engine_error(message: String) -> Error {
    Error { code: 4, message }
}

pub fn missing_endpoint_error() -> Error {
    Error {
        code: 100,
        message: MISSING_ENDPOINT_MESSAGE.into(),
    }
}

pub fn invalid_coordinate_error() -> Error {
    Error {
        code: 101,
        message: "coordinate out of range".into(),
    }
}

#[test]
fn error_classification_test() {
    assert!(missing_endpoint_error().is_validation_error());
    assert!(missing_endpoint_error().is_missing_endpoint_error());
    assert!(invalid_coordinate_error().is_validation_error());
    assert!(!invalid_coordinate_error().is_missing_endpoint_error());

    assert!(transport_error().is_transport_error());
    assert!(!transport_error().is_validation_error());

    let err = engine_error("No route found".into());
    assert!(err.is_engine_error());
    assert_eq!(err.to_string(), "No route found");

    assert!(env_var_error(env::VarError::NotPresent).is_config_error());
    assert!(invalid_config_error("X").is_config_error());
}

#[test]
fn serde_failure_maps_to_transport_error_test() {
    let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
    let err: Error = parse.unwrap_err().into();

    assert!(err.is_transport_error());
    assert_eq!(err.message, TRANSPORT_FALLBACK_MESSAGE);
}
