// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Server configuration from environment variables

use crate::zone_generator::ZoneFileGenerator;
use crate::zone_parser::{ZoneFileParser, DEFAULT_AUTO_TTL_VALUE, DEFAULT_ZONE_TTL};

/// Default HTTP port
pub const DEFAULT_API_PORT: u16 = 8080;

/// Default upper bound on uploaded zone file size (1 MiB)
pub const DEFAULT_MAX_ZONE_FILE_SIZE: usize = 1024 * 1024;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port the HTTP server listens on
    pub api_port: u16,
    /// Skip Bearer token authentication
    pub disable_auth: bool,
    /// Token required in `Authorization: Bearer <token>`, if set
    pub api_token: Option<String>,
    /// Map the TTL placeholder `1` to `auto_ttl_value` when importing
    pub auto_ttl_enabled: bool,
    /// TTL substituted for the placeholder
    pub auto_ttl_value: u32,
    /// `$TTL` used by exports that do not specify one
    pub default_ttl: u32,
    /// Maximum zone file size in bytes
    pub max_zone_file_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_port: DEFAULT_API_PORT,
            disable_auth: false,
            api_token: None,
            auto_ttl_enabled: true,
            auto_ttl_value: DEFAULT_AUTO_TTL_VALUE,
            default_ttl: DEFAULT_ZONE_TTL,
            max_zone_file_size: DEFAULT_MAX_ZONE_FILE_SIZE,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl ServerConfig {
    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `API_PORT`: HTTP port (default: 8080)
    /// - `DISABLE_AUTH`: Disable authentication (default: false)
    /// - `API_TOKEN`: Expected Bearer token (default: unset, any token accepted)
    /// - `AUTO_TTL_ENABLED`: Map TTL 1 to the auto TTL value (default: true)
    /// - `AUTO_TTL_VALUE`: Auto TTL value in seconds (default: 300)
    /// - `DEFAULT_TTL`: Export `$TTL` in seconds (default: 86400)
    /// - `MAX_ZONE_FILE_SIZE`: Maximum zone file size in bytes (default: 1048576)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_token = std::env::var("API_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Self {
            api_port: env_or("API_PORT", defaults.api_port),
            disable_auth: env_or("DISABLE_AUTH", defaults.disable_auth),
            api_token,
            auto_ttl_enabled: env_or("AUTO_TTL_ENABLED", defaults.auto_ttl_enabled),
            auto_ttl_value: env_or("AUTO_TTL_VALUE", defaults.auto_ttl_value),
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl),
            max_zone_file_size: env_or("MAX_ZONE_FILE_SIZE", defaults.max_zone_file_size),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.api_port == 0 {
            return Err("api_port must be greater than 0".to_string());
        }

        if self.max_zone_file_size == 0 {
            return Err("max_zone_file_size must be greater than 0".to_string());
        }

        if self.auto_ttl_enabled && self.auto_ttl_value <= 1 {
            return Err("auto_ttl_value must be greater than 1".to_string());
        }

        Ok(())
    }

    /// Build the zone file parser this configuration describes
    pub fn parser(&self) -> ZoneFileParser {
        if self.auto_ttl_enabled {
            ZoneFileParser::new(self.auto_ttl_value)
        } else {
            ZoneFileParser::without_auto_ttl()
        }
    }

    /// Build the zone file generator this configuration describes
    pub fn generator(&self) -> ZoneFileGenerator {
        ZoneFileGenerator::new(self.default_ttl)
    }
}
