/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub elevator: ElevatorConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub hardware: HardwareConfig,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ElevatorConfig {
    pub max_floor: u8,
    #[serde(default = "default_initial_floor")]
    pub initial_floor: u8,
}

/// Delays used by the environment simulator, all in milliseconds.
#[derive(Deserialize, Clone, Debug)]
pub struct SimulationConfig {
    pub floor_travel_time: u64,
    pub door_travel_time: u64,
    pub door_open_time: u64,
    pub tick: u64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct HardwareConfig {
    pub driver_address: String,
    pub poll_period: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_initial_floor() -> u8 {
    1
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            floor_travel_time: 1500,
            door_travel_time: 800,
            door_open_time: 3000,
            tick: 50,
        }
    }
}

impl Default for HardwareConfig {
    fn default() -> Self {
        HardwareConfig {
            driver_address: "localhost:15657".to_string(),
            poll_period: 25,
        }
    }
}

/***************************************/
/*             Public API              */
/***************************************/
impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.elevator.max_floor == 0 {
            return Err(ConfigError::Invalid(
                "max_floor must be at least 1".to_string(),
            ));
        }
        if self.elevator.initial_floor == 0 || self.elevator.initial_floor > self.elevator.max_floor
        {
            return Err(ConfigError::Invalid(format!(
                "initial_floor {} is outside [1, {}]",
                self.elevator.initial_floor, self.elevator.max_floor
            )));
        }
        Ok(())
    }
}

pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&config_str)
}

/***************************************/
/*             Unit tests              */
/***************************************/
