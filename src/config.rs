use std::{env, io::ErrorKind, time::Duration};

use anyhow::Context;
use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::{bracket::NewSeries, database::models::series::BracketInfo};

use super::util::file::{read_file, deserialize_properties_file};

#[derive(Debug, Error)]
pub enum ConfigDeserializeError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("File {file_path} could not be parsed: {parse_error}")]
    ParseError {
        file_path: String,
        parse_error: serde_yaml::Error
    }
}

const CONFIG_PATH_ENV_VARIABLE : &'static str = "BRACKET_CONFIG_PATH";
const SERIES_PATH_ENV_VARIABLE : &'static str = "BRACKET_SERIES_PATH";

pub async fn deserialize_bracket_config() -> anyhow::Result<BracketConfig> {
    let config_path = env::var(CONFIG_PATH_ENV_VARIABLE).unwrap_or("./config.properties".to_string());
    let series_path = env::var(SERIES_PATH_ENV_VARIABLE).unwrap_or("./series.yml".to_string());
    let (options, data) = tokio::try_join!(
        deserialize_bracket_options(&config_path),
        async { deserialize_bracket_data(&series_path).await.map_err(anyhow::Error::from) }
    )?;
    Ok(BracketConfig { options, data })
}

async fn deserialize_bracket_options(config_path: &str) -> anyhow::Result<BracketConfigOptions> {
    let map = deserialize_properties_file(config_path).await
        .with_context(|| format!("Could not read config file {}", config_path))?;
    let mut config = BracketConfigOptions::default();
    map.iter().for_each(|(k, v)| {
        match k.as_str() {
            "listen-port" => { if let Ok(i) = v.parse::<u16>() { config.port = i; } },
            "listen-host" => { config.host = v.to_string(); },
            "mongo-url" => { config.mongo_url = v.to_string(); },
            "mongo-database" => { config.mongo_database = v.to_string(); },
            "mongo-min-pool" => { config.min_pool_size = v.parse::<u32>().ok(); },
            "mongo-max-pool" => { config.max_pool_size = v.parse::<u32>().ok(); },
            "store-timeout-ms" => { if let Ok(ms) = v.parse::<u64>() { config.store_timeout = Duration::from_millis(ms); } },
            _ => { warn!("Unknown config key {}", k); }
        }
    });
    if config.mongo_url.is_empty() {
        return Err(anyhow::anyhow!("Missing required field 'mongo-url'"));
    };
    Ok(config)
}

/// Series listed in the seed file are created on startup when missing. A missing file means no seeds.
async fn deserialize_bracket_data(series_path: &str) -> Result<BracketConfigData, ConfigDeserializeError> {
    let content = match read_file(series_path).await {
        Ok(content) => content,
        Err(io_err) if io_err.kind() == ErrorKind::NotFound => return Ok(BracketConfigData::default()),
        Err(io_err) => return Err(io_err.into())
    };
    parse_bracket_data(series_path, &content)
}

fn parse_bracket_data(series_path: &str, content: &str) -> Result<BracketConfigData, ConfigDeserializeError> {
    let series = match serde_yaml::from_str::<Vec<SeriesSeed>>(content) {
        Ok(series) => series,
        Err(e) => return Err(ConfigDeserializeError::ParseError {
            file_path: series_path.to_string(),
            parse_error: e
        })
    };
    Ok(BracketConfigData { series })
}

pub struct BracketConfig {
    pub options: BracketConfigOptions,
    pub data: BracketConfigData
}

pub struct BracketConfigOptions {
    pub port: u16,
    pub host: String,
    pub mongo_url: String,
    pub mongo_database: String,
    pub min_pool_size: Option<u32>,
    pub max_pool_size: Option<u32>,
    pub store_timeout: Duration
}

impl Default for BracketConfigOptions {
    fn default() -> Self {
        BracketConfigOptions {
            port: 3099,
            host: String::from("0.0.0.0"),
            mongo_url: String::new(),
            mongo_database: String::from("spdb"),
            min_pool_size: Some(2),
            max_pool_size: Some(8),
            store_timeout: Duration::from_secs(5)
        }
    }
}

#[derive(Deserialize, Default)]
pub struct BracketConfigData {
    pub series: Vec<SeriesSeed>
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesSeed {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub organizer: String,
    #[serde(default)]
    pub api: String,
    #[serde(default)]
    pub game: String,
    #[serde(default)]
    pub raffle: bool,
    pub players: Vec<String>
}

impl From<SeriesSeed> for NewSeries {
    fn from(seed: SeriesSeed) -> Self {
        NewSeries {
            id: Some(seed.id),
            name: seed.name,
            bracket: BracketInfo { organizer: seed.organizer, api: seed.api, game: seed.game },
            raffle: seed.raffle,
            players: seed.players,
            scheduled: None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_seeds_parse_from_yaml() {
        let data = parse_bracket_data("series.yml", "
- id: spring-open
  name: Spring Open
  game: badminton
  players: [alice, bob, carol, dave]
").unwrap();
        assert_eq!(data.series.len(), 1);
        let seed = data.series[0].clone();
        assert_eq!(seed.organizer, "");
        assert!(!seed.raffle);

        let new_series = NewSeries::from(seed);
        assert_eq!(new_series.id.as_deref(), Some("spring-open"));
        assert_eq!(new_series.bracket.game, "badminton");
        assert_eq!(new_series.players.len(), 4);
    }

    #[test]
    fn malformed_seed_file_reports_path() {
        let err = parse_bracket_data("series.yml", "- id: [").err().unwrap();
        assert!(err.to_string().starts_with("File series.yml could not be parsed"));
    }
}
