// Copyright 2026 circuits-feed contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration resolution: explicit flag, then environment, then default.

use anyhow::{Context, Result};
use circuits_feed::config::{
    DEFAULT_DELAY_MS, DEFAULT_HEAD_TIMEOUT_MS, DEFAULT_MAX_ITEMS, DEFAULT_ORIGIN,
    DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT,
};
use circuits_feed::FeedConfig;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_ORIGIN: &str = "CIRCUITS_FEED_ORIGIN";
pub const ENV_MAX_ITEMS: &str = "CIRCUITS_FEED_MAX_ITEMS";
pub const ENV_TIMEOUT_MS: &str = "CIRCUITS_FEED_TIMEOUT_MS";
pub const ENV_HEAD_TIMEOUT_MS: &str = "CIRCUITS_FEED_HEAD_TIMEOUT_MS";
pub const ENV_DELAY_MS: &str = "CIRCUITS_FEED_DELAY_MS";
pub const ENV_USER_AGENT: &str = "CIRCUITS_FEED_USER_AGENT";

/// Settings as given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct ConfigArgs {
    pub origin: Option<String>,
    pub max_items: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub head_timeout_ms: Option<u64>,
    pub delay_ms: Option<u64>,
    pub user_agent: Option<String>,
}

/// Build the run configuration from flags and the process environment.
pub fn resolve_config(args: &ConfigArgs) -> Result<FeedConfig> {
    resolve_with(args, |key| std::env::var(key).ok())
}

/// Same as [`resolve_config`] with an explicit environment lookup.
pub fn resolve_with(args: &ConfigArgs, env: impl Fn(&str) -> Option<String>) -> Result<FeedConfig> {
    let origin = args
        .origin
        .clone()
        .or_else(|| env(ENV_ORIGIN))
        .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());

    let max_items = pick(args.max_items, &env, ENV_MAX_ITEMS, DEFAULT_MAX_ITEMS)?;
    let timeout_ms = pick(args.timeout_ms, &env, ENV_TIMEOUT_MS, DEFAULT_TIMEOUT_MS)?;
    let head_timeout_ms = pick(
        args.head_timeout_ms,
        &env,
        ENV_HEAD_TIMEOUT_MS,
        DEFAULT_HEAD_TIMEOUT_MS,
    )?;
    let delay_ms = pick(args.delay_ms, &env, ENV_DELAY_MS, DEFAULT_DELAY_MS)?;
    let user_agent = args
        .user_agent
        .clone()
        .or_else(|| env(ENV_USER_AGENT))
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

    let config = FeedConfig::new(&origin)
        .with_context(|| format!("invalid origin {origin:?}"))?
        // 0 means no cap
        .with_max_items((max_items > 0).then_some(max_items))
        .with_request_timeout(Duration::from_millis(timeout_ms))
        .with_head_timeout(Duration::from_millis(head_timeout_ms))
        .with_request_delay(Duration::from_millis(delay_ms))
        .with_user_agent(user_agent);

    Ok(config)
}

fn pick<T>(
    explicit: Option<T>,
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if let Some(value) = explicit {
        return Ok(value);
    }
    match env(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key}={raw:?} is not a valid number")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = resolve_with(&ConfigArgs::default(), env_of(&[])).unwrap();
        assert_eq!(config.origin().as_str(), DEFAULT_ORIGIN);
        assert_eq!(config.max_items(), Some(50));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.head_timeout(), Duration::from_secs(20));
        assert_eq!(config.request_delay(), Duration::from_millis(200));
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_env_overrides_default() {
        let env = env_of(&[
            (ENV_ORIGIN, "https://example.com/"),
            (ENV_MAX_ITEMS, "7"),
            (ENV_DELAY_MS, " 0 "),
            (ENV_USER_AGENT, "env-agent"),
        ]);
        let config = resolve_with(&ConfigArgs::default(), env).unwrap();
        assert_eq!(config.origin().as_str(), "https://example.com/");
        assert_eq!(config.max_items(), Some(7));
        assert_eq!(config.request_delay(), Duration::ZERO);
        assert_eq!(config.user_agent(), "env-agent");
    }

    #[test]
    fn test_flag_overrides_env() {
        let args = ConfigArgs {
            origin: Some("http://localhost:8080/".to_string()),
            max_items: Some(3),
            timeout_ms: Some(1500),
            ..Default::default()
        };
        let env = env_of(&[
            (ENV_ORIGIN, "https://example.com/"),
            (ENV_MAX_ITEMS, "7"),
            (ENV_TIMEOUT_MS, "9000"),
        ]);
        let config = resolve_with(&args, env).unwrap();
        assert_eq!(config.origin_authority(), "localhost:8080");
        assert_eq!(config.max_items(), Some(3));
        assert_eq!(config.request_timeout(), Duration::from_millis(1500));
    }

    #[test]
    fn test_zero_max_items_is_unbounded() {
        let args = ConfigArgs {
            max_items: Some(0),
            ..Default::default()
        };
        let config = resolve_with(&args, env_of(&[])).unwrap();
        assert_eq!(config.max_items(), None);
    }

    #[test]
    fn test_bad_values_are_errors() {
        let err = resolve_with(&ConfigArgs::default(), env_of(&[(ENV_MAX_ITEMS, "lots")]))
            .unwrap_err();
        assert!(format!("{err:#}").contains(ENV_MAX_ITEMS));

        let args = ConfigArgs {
            origin: Some("ftp://example.com/".to_string()),
            ..Default::default()
        };
        assert!(resolve_with(&args, env_of(&[])).is_err());
    }
}
