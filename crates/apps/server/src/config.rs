use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use dashboard::RenderSettings;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub data_file: PathBuf,
    pub addr: SocketAddr,
    pub render: RenderSettings,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let defaults = RenderSettings::default();

        let data_file = get("PLANTS_DATA_FILE").unwrap_or_else(|| "steel_plants.csv".to_string());
        let addr_raw = get("PLANTS_ADDR").unwrap_or_else(|| "127.0.0.1:8501".to_string());
        let addr: SocketAddr = addr_raw
            .parse()
            .map_err(|e| format!("invalid PLANTS_ADDR {addr_raw:?}: {e}"))?;

        let render = RenderSettings {
            default_owner_count: parsed_or(
                &get,
                "PLANTS_DEFAULT_OWNERS",
                defaults.default_owner_count,
            ),
            map_style: get("PLANTS_MAP_STYLE").unwrap_or(defaults.map_style),
        };

        Ok(Self {
            data_file: PathBuf::from(data_file),
            addr,
            render,
        })
    }
}

fn parsed_or<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    get(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}
