use {
    serde::Deserialize,
    serde_with::{DisplayFromStr, serde_as},
    tracing::Level,
};

/// Logging section of a configuration file.
///
/// ```toml
/// [logging]
/// env-filter = "warn,trade_p2p=debug"
/// stderr-threshold = "warn"
/// json = true
/// ```
#[serde_as]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct Config {
    /// Directives in the syntax of
    /// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
    pub env_filter: String,
    /// Events at this level or more severe go to stderr, the rest to stdout.
    /// Defaults to `error`.
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub stderr_threshold: Option<Level>,
    /// One JSON object per event instead of human readable lines.
    pub json: bool,
}

impl Config {
    /// Plain output for tests, everything above `error` on stdout.
    pub fn for_tests(env_filter: &str) -> Self {
        Self {
            env_filter: env_filter.to_owned(),
            stderr_threshold: Some(Level::ERROR),
            json: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env_filter: "warn,trade_p2p=info".to_owned(),
            stderr_threshold: None,
            json: false,
        }
    }
}
