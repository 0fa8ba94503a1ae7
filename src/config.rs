use std::env;
use std::time::Duration;

use crate::entities::{Coordinates, Viewport};
use crate::error::{invalid_config_error, Error};

pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_CENTER: (f64, f64) = (19.4326, -99.1332);
pub const DEFAULT_ZOOM: u8 = 12;

#[derive(Clone, Debug)]
pub struct Config {
    /// Full URL of the route endpoint, e.g. `http://127.0.0.1:5000/ruta`.
    pub routing_engine_url: String,
    pub timeout: Duration,
    /// Drop responses that belong to an older calculate than the latest one.
    pub reject_stale_responses: bool,
    pub initial_center: Coordinates,
    pub initial_zoom: u8,
}

impl Config {
    pub fn new(routing_engine_url: impl Into<String>) -> Self {
        Self {
            routing_engine_url: routing_engine_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            reject_stale_responses: false,
            initial_center: Coordinates {
                lat: DEFAULT_CENTER.0,
                lng: DEFAULT_CENTER.1,
            },
            initial_zoom: DEFAULT_ZOOM,
        }
    }

    /// Reads the process environment after loading `.env`, if there is one.
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        if let Err(err) = dotenv::dotenv() {
            tracing::debug!("no .env loaded: {}", err);
        }

        let mut config = Self::new(env::var("ROUTING_ENGINE_URL")?);

        if let Some(secs) = optional_var("ROUTING_ENGINE_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(reject) = optional_var("REJECT_STALE_RESPONSES")? {
            config.reject_stale_responses = reject;
        }

        Ok(config)
    }

    pub fn initial_viewport(&self) -> Viewport {
        Viewport::Centered {
            center: self.initial_center,
            zoom: self.initial_zoom,
        }
    }
}

fn optional_var<T: std::str::FromStr>(key: &str) -> Result<Option<T>, Error> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid_config_error(key)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[test]
fn config_defaults_test() {
    let config = Config::new("http://localhost:5000/ruta");

    assert_eq!(config.timeout, Duration::from_secs(20));
    assert!(!config.reject_stale_responses);
    assert_eq!(
        config.initial_viewport(),
        Viewport::Centered {
            center: Coordinates {
                lat: 19.4326,
                lng: -99.1332
            },
            zoom: 12
        }
    );
}

#[test]
fn config_from_env_test() {
    env::set_var("ROUTING_ENGINE_URL", "http://engine.test/ruta");
    env::set_var("ROUTING_ENGINE_TIMEOUT_SECS", "5");
    env::set_var("REJECT_STALE_RESPONSES", "true");

    let config = Config::from_env().unwrap();
    assert_eq!(config.routing_engine_url, "http://engine.test/ruta");
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert!(config.reject_stale_responses);

    env::set_var("ROUTING_ENGINE_TIMEOUT_SECS", "soon");
    let err = Config::from_env().unwrap_err();
    assert!(err.is_config_error());

    env::remove_var("ROUTING_ENGINE_TIMEOUT_SECS");
    env::remove_var("REJECT_STALE_RESPONSES");
}
