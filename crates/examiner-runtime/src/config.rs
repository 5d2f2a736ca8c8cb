//! Oracle configuration.
//!
//! Model, temperature and timeout are operator settings. They are fixed when
//! the orchestrator is constructed and are never taken from a request.

use std::time::Duration;

use crate::providers::CompletionConfig;

/// Default model served by the oracle.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Low temperature keeps the output format stable.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Upper bound on completion length.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Bound on a single oracle call.
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Retry policy for oracle calls.
///
/// `max_retries = 0` (the default) means exactly one call per request.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Additional attempts after the first, for transient failures only
    pub max_retries: usize,

    /// First backoff delay
    pub min_delay: Duration,

    /// Backoff ceiling
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            min_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryConfig {
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Configuration for the evaluation orchestrator's oracle calls.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleConfig {
    /// Model identifier sent to the oracle
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum completion tokens
    pub max_tokens: u32,

    /// Bound on each oracle call
    pub timeout: Duration,

    /// Retry policy
    pub retry: RetryConfig,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_ORACLE_TIMEOUT,
            retry: RetryConfig::default(),
        }
    }
}

impl OracleConfig {
    /// Create a config for the specified model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Parse the timeout from a human-readable string such as `"30s"` or `"1m 30s"`.
    pub fn with_timeout_str(self, timeout: &str) -> Result<Self, humantime::DurationError> {
        Ok(self.with_timeout(humantime::parse_duration(timeout)?))
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// The per-call settings handed to the provider.
    pub fn completion_config(&self) -> CompletionConfig {
        CompletionConfig {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            timeout: self.timeout,
        }
    }
}
