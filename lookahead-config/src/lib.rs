//! Configuration loader for grammar lookahead limits.
//!
//! `defaults/lookahead.default.toml` is embedded into every build so the documented
//! defaults and [`Limits::default`] stay in sync. Applications layer user files, an
//! environment prefix and single overrides on top via [`Loader`], then hand the result to
//! [`LookaheadConfig::compile`] or take its [`Limits`] directly.
//!
//!     [walker]
//!     depth = 32     # lookahead rounds before a decision point is ambiguous
//!     visits = 32    # visits to one node per walk, must be at least 1

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use grammar_lookahead::lookahead::{Grammar, GrammarResult, Limits, LookaheadPass, NodeId};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/lookahead.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LookaheadConfig {
    pub walker: WalkerConfig,
}

/// Bounds applied to every lookahead walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WalkerConfig {
    pub depth: usize,
    pub visits: usize,
}

impl LookaheadConfig {
    pub fn limits(&self) -> Limits {
        Limits::from(self.walker)
    }

    /// Attach lookahead tables to every decision point reachable from `root`, using these
    /// limits. Returns how many tables were attached.
    pub fn compile(&self, grammar: &Grammar, root: NodeId) -> GrammarResult<usize> {
        LookaheadPass::new(grammar).with_limits(self.limits()).run(root)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.walker.visits == 0 {
            return Err(ConfigError::Message(
                "walker.visits must be at least 1, or no node can ever be stepped".to_string(),
            ));
        }
        Ok(self)
    }
}

impl From<WalkerConfig> for Limits {
    fn from(walker: WalkerConfig) -> Self {
        Limits {
            depth: walker.depth,
            visits: walker.visits,
        }
    }
}

/// Layers sources over the embedded defaults. Later sources win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), true)
    }

    /// Layer a TOML file, skipped if absent.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), false)
    }

    fn with_toml(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Read `<PREFIX>_WALKER__DEPTH` style variables.
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        let source = Environment::with_prefix(prefix)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override one key, e.g. `walker.depth` from a command line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<LookaheadConfig, ConfigError> {
        self.builder
            .build()?
            .try_deserialize::<LookaheadConfig>()?
            .validate()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<LookaheadConfig, ConfigError> {
    Loader::new().build()
}
