use std::fmt;

use crate::err::*;

pub const ENV_TOKEN: &str = "CF_TOKEN";
pub const ENV_HOSTNAME: &str = "CF_HOSTNAME";
pub const ENV_ZONE_ID: &str = "CF_ZONE-ID";

/// Credentials and sync target, read from the environment once at startup
/// and immutable afterwards.
#[derive(Clone)]
pub struct Config {
    pub api_token: String,
    pub hostname: String,
    pub zone_id: String,
}

// The api token must not reach the logs through Debug output.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &"<redacted>")
            .field("hostname", &self.hostname)
            .field("zone_id", &self.zone_id)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            api_token: require(&lookup, ENV_TOKEN)?,
            hostname: require(&lookup, ENV_HOSTNAME)?,
            zone_id: require(&lookup, ENV_ZONE_ID)?,
        })
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppErr::Config(format!(
            "required environment variable {} is not set",
            key
        ))),
    }
}
