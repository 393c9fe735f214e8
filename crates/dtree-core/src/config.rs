//! Configuration structures for dtree-core.
//!
//! The core crate itself does not read environment variables. Callers (API,
//! CLI) build these explicitly and pass them in.

use crate::errors::{DtreeError, DtreeResult};

/// Default maximum JSON bytes accepted by parsing helpers (2 MiB).
pub const DEFAULT_MAX_JSON_BYTES: usize = 2 * 1024 * 1024;

/// Global configuration container.
#[derive(Debug, Clone, Default)]
pub struct CoreConfig {
    pub limits: LimitsConfig,
}

/// Resource limits applied before validation.
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    pub max_json_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_json_bytes: DEFAULT_MAX_JSON_BYTES,
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &CoreConfig) -> DtreeResult<()> {
    if cfg.limits.max_json_bytes == 0 {
        return Err(DtreeError::invalid_argument(
            "max_json_bytes must be greater than zero",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = CoreConfig::default();
        validate_config(&cfg).unwrap();
        assert_eq!(cfg.limits.max_json_bytes, DEFAULT_MAX_JSON_BYTES);
    }

    #[test]
    fn zero_limit_detected() {
        let mut cfg = CoreConfig::default();
        cfg.limits.max_json_bytes = 0;
        assert!(validate_config(&cfg).is_err());
    }
}
