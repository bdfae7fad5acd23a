use std::{env, fmt::Display, net::IpAddr, path::PathBuf, str::FromStr};

use shared::validation::ChoicePolicy;
use tracing::{info, warn};

use crate::storage::BackendKind;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub address: IpAddr,
    pub storage: BackendKind,
    pub data_file: PathBuf,
    pub database_url: Option<String>,
    pub choice_policy: ChoicePolicy,
    pub reset_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            address: IpAddr::from([0, 0, 0, 0]),
            storage: BackendKind::Memory,
            data_file: PathBuf::from("data.json"),
            database_url: None,
            choice_policy: ChoicePolicy::ExactlyThree,
            reset_enabled: true,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source, falling back to the
    /// defaults for missing or unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: try_load(&lookup, "PORT", defaults.port),
            address: try_load(&lookup, "ADDRESS", defaults.address),
            storage: try_load(&lookup, "STORAGE", defaults.storage),
            data_file: try_load::<String, _>(&lookup, "DATA_FILE", defaults.data_file.display().to_string()).into(),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            choice_policy: try_load(&lookup, "CHOICE_POLICY", defaults.choice_policy),
            reset_enabled: try_load::<Flag, _>(&lookup, "ENABLE_RESET", Flag(defaults.reset_enabled)).0,
        }
    }
}

fn try_load<T, D>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: D) -> T
where
    T: FromStr + From<D>,
    T::Err: Display,
    D: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return T::from(default);
    };

    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value '{raw}': {e}, using default: {default}");
        T::from(default)
    })
}

/// Boolean env flag accepting the usual spellings.
#[derive(Debug, Clone, Copy)]
struct Flag(bool);

impl Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Flag(true)),
            "0" | "false" | "no" | "off" => Ok(Flag(false)),
            other => Err(format!("'{other}' is not a boolean")),
        }
    }
}
