//! # testlog Configuration
//!
//! Layered settings for test loggers, so a noisy suite can be turned up or
//! down without editing the tests.
//!
//! Hierarchy:
//! 1. Default values (`info`, no prefix, stderr, no colors, call sites on)
//! 2. `testlog.yaml` in the working directory, if present
//! 3. `TESTLOG_*` environment variables (`TESTLOG_LEVEL=debug`)
//!
//! Environment values go through figment's value parser, so a prefix that
//! looks like a list (`[sync]`) has to be quoted: `TESTLOG_PREFIX='"[sync]"'`.

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use testlog_core::Level;
use validator::Validate;

mod error;
mod validation;

pub use error::ConfigError;

pub const CONFIG_FILE: &str = "testlog.yaml";
pub const ENV_PREFIX: &str = "TESTLOG_";

/// Where rendered lines go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// `eprint!`, captured per test by libtest.
    #[default]
    Stderr,
    /// `print!` through `tracing-subscriber`'s test writer.
    Test,
}

/// Logger settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TestLogConfig {
    /// Minimum severity that is rendered.
    #[serde(default)]
    pub level: Level,

    /// Prepended, with a space, to every message.
    #[serde(default)]
    #[validate(length(max = 64))]
    #[validate(custom(function = validation::validate_prefix))]
    pub prefix: String,

    #[serde(default)]
    pub target: Target,

    /// ANSI colors in rendered lines.
    #[serde(default)]
    pub ansi: bool,

    /// Annotate lines with the call site.
    #[serde(default = "default_true")]
    pub source: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TestLogConfig {
    fn default() -> Self {
        Self {
            level: Level::default(),
            prefix: String::new(),
            target: Target::default(),
            ansi: false,
            source: true,
        }
    }
}

impl TestLogConfig {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Load from defaults, `testlog.yaml` and `TESTLOG_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let figment = Figment::from(Serialized::defaults(TestLogConfig::default()))
            .merge(Yaml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX));
        Self::extract(figment)
    }

    /// Load from an explicit file, still honoring `TESTLOG_*` overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let figment = Figment::from(Serialized::defaults(TestLogConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX));
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }
}
