use chrono::Duration;
use serenity::all::{ApplicationId, ChannelId, Colour, GuildId, RoleId};
use thiserror::Error;

const DEFAULT_EMBED_COLOR: &str = "FF88CC";
const DEFAULT_LISTENER_HOURS: i64 = 24;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A required key is absent or blank.
    #[error("Missing required setting: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Runtime settings for the bot, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub client_id: ApplicationId,
    /// Commands register guild-scoped when set, globally otherwise.
    pub guild_id: Option<GuildId>,
    pub request_channel_id: ChannelId,
    pub uploader_role_id: RoleId,
    pub embed_color: Colour,
    /// How long an unclaimed request keeps listening for clicks. `None` never expires.
    pub claim_listener: Option<Duration>,
    pub ping_uploaders: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let token = get("BOT_TOKEN").ok_or(ConfigError::Missing("BOT_TOKEN"))?;
        let client_id = ApplicationId::new(parse_id("CLIENT_ID", get("CLIENT_ID"))?);
        let guild_id = match get("GUILD_ID") {
            Some(raw) => Some(GuildId::new(parse_id("GUILD_ID", Some(raw))?)),
            None => None,
        };
        let request_channel_id =
            ChannelId::new(parse_id("REQUEST_CHANNEL_ID", get("REQUEST_CHANNEL_ID"))?);
        let uploader_role_id = RoleId::new(parse_id("UPLOADER_ROLE_ID", get("UPLOADER_ROLE_ID"))?);

        let embed_color = parse_color(
            get("EMBED_COLOR")
                .as_deref()
                .unwrap_or(DEFAULT_EMBED_COLOR),
        )?;

        let claim_listener = match get("CLAIM_LISTENER_HOURS") {
            Some(raw) => {
                let hours = raw.parse::<i64>().map_err(|e| ConfigError::Invalid {
                    key: "CLAIM_LISTENER_HOURS",
                    reason: e.to_string(),
                })?;
                match hours {
                    0 => None,
                    h if h < 0 => {
                        return Err(ConfigError::Invalid {
                            key: "CLAIM_LISTENER_HOURS",
                            reason: "must not be negative".to_string(),
                        });
                    }
                    h => Some(Duration::hours(h)),
                }
            }
            None => Some(Duration::hours(DEFAULT_LISTENER_HOURS)),
        };

        let ping_uploaders = match get("PING_UPLOADERS") {
            Some(raw) => parse_flag("PING_UPLOADERS", &raw)?,
            None => true,
        };

        Ok(Config {
            token,
            client_id,
            guild_id,
            request_channel_id,
            uploader_role_id,
            embed_color,
            claim_listener,
            ping_uploaders,
        })
    }
}

fn parse_id(key: &'static str, raw: Option<String>) -> Result<u64, ConfigError> {
    let raw = raw.ok_or(ConfigError::Missing(key))?;
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            key,
            reason: "id must be non-zero".to_string(),
        }),
        Ok(id) => Ok(id),
        Err(e) => Err(ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
    }
}

fn parse_color(raw: &str) -> Result<Colour, ConfigError> {
    let hex = raw.trim_start_matches('#');
    let invalid = |reason: String| ConfigError::Invalid {
        key: "EMBED_COLOR",
        reason,
    };

    if hex.len() != 6 {
        return Err(invalid(format!("expected RRGGBB, got '{}'", raw)));
    }

    u32::from_str_radix(hex, 16)
        .map(Colour::new)
        .map_err(|e| invalid(e.to_string()))
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            key,
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("BOT_TOKEN", "token"),
            ("CLIENT_ID", "1001"),
            ("REQUEST_CHANNEL_ID", "2002"),
            ("UPLOADER_ROLE_ID", "3003"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<Config, ConfigError> {
        Config::from_lookup(|key| env.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults_applied() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.client_id, ApplicationId::new(1001));
        assert_eq!(config.request_channel_id, ChannelId::new(2002));
        assert_eq!(config.uploader_role_id, RoleId::new(3003));
        assert!(config.guild_id.is_none());
        assert_eq!(config.embed_color, Colour::new(0xFF88CC));
        assert_eq!(config.claim_listener, Some(Duration::hours(24)));
        assert!(config.ping_uploaders);
    }

    #[test]
    fn test_missing_token() {
        let mut env = base_env();
        env.remove("BOT_TOKEN");
        assert_eq!(load(&env).unwrap_err(), ConfigError::Missing("BOT_TOKEN"));
    }

    #[test]
    fn test_blank_guild_is_global() {
        let mut env = base_env();
        env.insert("GUILD_ID", "  ");
        assert!(load(&env).unwrap().guild_id.is_none());

        env.insert("GUILD_ID", "42");
        assert_eq!(load(&env).unwrap().guild_id, Some(GuildId::new(42)));
    }

    #[test]
    fn test_zero_id_rejected() {
        let mut env = base_env();
        env.insert("UPLOADER_ROLE_ID", "0");
        assert!(matches!(
            load(&env),
            Err(ConfigError::Invalid {
                key: "UPLOADER_ROLE_ID",
                ..
            })
        ));
    }

    #[test]
    fn test_embed_color_formats() {
        let mut env = base_env();
        env.insert("EMBED_COLOR", "#00ff7f");
        assert_eq!(load(&env).unwrap().embed_color, Colour::new(0x00FF7F));

        env.insert("EMBED_COLOR", "pink");
        assert!(load(&env).is_err());
    }

    #[test]
    fn test_listener_hours() {
        let mut env = base_env();
        env.insert("CLAIM_LISTENER_HOURS", "0");
        assert_eq!(load(&env).unwrap().claim_listener, None);

        env.insert("CLAIM_LISTENER_HOURS", "6");
        assert_eq!(load(&env).unwrap().claim_listener, Some(Duration::hours(6)));

        env.insert("CLAIM_LISTENER_HOURS", "-1");
        assert!(load(&env).is_err());
    }

    #[test]
    fn test_ping_flag() {
        let mut env = base_env();
        env.insert("PING_UPLOADERS", "no");
        assert!(!load(&env).unwrap().ping_uploaders);

        env.insert("PING_UPLOADERS", "maybe");
        assert!(load(&env).is_err());
    }
}
