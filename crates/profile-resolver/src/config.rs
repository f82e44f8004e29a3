use std::env;

use crate::error::{ResolverError, Result};

/// First platform release with the cross-profile document APIs
pub const DEFAULT_MIN_PLATFORM_VERSION: u32 = 30;

/// Resolver configuration parsed from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Feature flag for cross-profile tabs
    pub cross_profile_enabled: bool,
    pub min_platform_version: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cross_profile_enabled: true,
            min_platform_version: DEFAULT_MIN_PLATFORM_VERSION,
        }
    }
}

impl ResolverConfig {
    /// Parse configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let cross_profile_enabled = match lookup("CROSS_PROFILE_TABS") {
            Some(value) => parse_flag(&value)?,
            None => defaults.cross_profile_enabled,
        };

        let min_platform_version = match lookup("CROSS_PROFILE_MIN_PLATFORM") {
            Some(value) => value.trim().parse::<u32>()?,
            None => defaults.min_platform_version,
        };

        Ok(Self {
            cross_profile_enabled,
            min_platform_version,
        })
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ResolverError::Config(format!(
            "CROSS_PROFILE_TABS must be a boolean, got {:?}",
            other
        ))),
    }
}
