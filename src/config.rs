/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{CarError, ConfigError, Floor};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub car: CarConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct CarConfig {
    pub capacity: usize,
    pub initial_floor: Floor,
    pub top_floor: Floor,
    pub bottom_floor: Floor,
    /// Milliseconds to travel one floor.
    #[serde(default)]
    pub floor_travel_time: u64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

impl CarConfig {
    pub fn validate(&self) -> Result<(), CarError> {
        if self.bottom_floor >= self.top_floor {
            return Err(CarError::InvalidConfig(format!(
                "bottom floor {} must be below top floor {}",
                self.bottom_floor, self.top_floor
            )));
        }
        if self.capacity == 0 {
            return Err(CarError::InvalidConfig("capacity must be positive".to_string()));
        }
        if !(self.bottom_floor..=self.top_floor).contains(&self.initial_floor) {
            return Err(CarError::InvalidConfig(format!(
                "initial floor {} is outside [{}, {}]",
                self.initial_floor, self.bottom_floor, self.top_floor
            )));
        }
        Ok(())
    }

    pub fn travel_time(&self, floors: u32) -> Duration {
        Duration::from_millis(self.floor_travel_time.saturating_mul(floors as u64))
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(config_str)?)
}

/***************************************/
/*             Unit tests              */
/***************************************/
