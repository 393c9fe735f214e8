//! Service configuration.
//!
//! Read once at startup from environment variables:
//!   DTREE_BIND_ADDR          listen address (default: 0.0.0.0:8080)
//!   DTREE_MAX_BODY_BYTES     request body limit (default: 2 MiB)
//!   DTREE_DEFAULT_PAGE_SIZE  list page size when `take` is absent (default: 20)
//!   DTREE_MAX_PAGE_SIZE      largest accepted `take` (default: 50)
//!   DTREE_LOG_JSON           emit JSON logs when set to 1/true

use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use dtree_core::config::{validate_config, CoreConfig, LimitsConfig, DEFAULT_MAX_JSON_BYTES};

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub max_body_bytes: usize,
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub log_json: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_body_bytes: DEFAULT_MAX_JSON_BYTES,
            default_page_size: 20,
            max_page_size: 50,
            log_json: false,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("DTREE_BIND_ADDR") {
            cfg.bind_addr = parse_var("DTREE_BIND_ADDR", &v)?;
        }
        if let Some(v) = lookup("DTREE_MAX_BODY_BYTES") {
            cfg.max_body_bytes = parse_var("DTREE_MAX_BODY_BYTES", &v)?;
        }
        if let Some(v) = lookup("DTREE_DEFAULT_PAGE_SIZE") {
            cfg.default_page_size = parse_var("DTREE_DEFAULT_PAGE_SIZE", &v)?;
        }
        if let Some(v) = lookup("DTREE_MAX_PAGE_SIZE") {
            cfg.max_page_size = parse_var("DTREE_MAX_PAGE_SIZE", &v)?;
        }
        if let Some(v) = lookup("DTREE_LOG_JSON") {
            cfg.log_json = matches!(v.trim(), "1" | "true" | "TRUE" | "yes");
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Core limits derived from this service config.
    pub fn core(&self) -> CoreConfig {
        CoreConfig {
            limits: LimitsConfig {
                max_json_bytes: self.max_body_bytes,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_config(&self.core()).context("invalid DTREE_MAX_BODY_BYTES")?;
        if self.default_page_size > self.max_page_size {
            return Err(anyhow!(
                "DTREE_DEFAULT_PAGE_SIZE ({}) must not exceed DTREE_MAX_PAGE_SIZE ({})",
                self.default_page_size,
                self.max_page_size
            ));
        }
        Ok(())
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("invalid value for {key}: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let cfg = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.default_page_size, 20);
        assert_eq!(cfg.max_page_size, 50);
        assert!(!cfg.log_json);
    }

    #[test]
    fn overrides_apply() {
        let cfg = ApiConfig::from_lookup(lookup(&[
            ("DTREE_BIND_ADDR", "127.0.0.1:9000"),
            ("DTREE_MAX_BODY_BYTES", "1024"),
            ("DTREE_LOG_JSON", "true"),
        ]))
        .unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(cfg.max_body_bytes, 1024);
        assert!(cfg.log_json);
    }

    #[test]
    fn invalid_values_rejected() {
        let err = ApiConfig::from_lookup(lookup(&[("DTREE_BIND_ADDR", "nowhere")])).unwrap_err();
        assert!(err.to_string().contains("DTREE_BIND_ADDR"));

        let err = ApiConfig::from_lookup(lookup(&[("DTREE_MAX_BODY_BYTES", "0")])).unwrap_err();
        assert!(err.to_string().contains("DTREE_MAX_BODY_BYTES"));
        assert!(ApiConfig::from_lookup(lookup(&[("DTREE_DEFAULT_PAGE_SIZE", "80")])).is_err());
    }
}
