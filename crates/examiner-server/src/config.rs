//! Server configuration from command-line flags and environment.

use std::time::Duration;

use clap::{ArgAction, Parser};
use examiner_runtime::{config::DEFAULT_MODEL, OracleConfig, RetryConfig, DEFAULT_GROQ_BASE_URL};

/// Answer examiner HTTP server.
#[derive(Debug, Clone, Parser)]
#[command(name = "examiner", version, about)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// Model requested from the scoring oracle
    #[arg(long, env = "EXAMINER_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the OpenAI-compatible oracle API
    #[arg(long, env = "EXAMINER_ORACLE_URL", default_value = DEFAULT_GROQ_BASE_URL)]
    pub oracle_url: String,

    /// Bound on each oracle call (e.g. "30s", "1m")
    #[arg(
        long,
        env = "EXAMINER_ORACLE_TIMEOUT",
        default_value = "30s",
        value_parser = humantime::parse_duration
    )]
    pub oracle_timeout: Duration,

    /// Retries for transient oracle failures (0 = single call)
    #[arg(long, env = "EXAMINER_MAX_RETRIES", default_value_t = 0)]
    pub max_retries: usize,

    /// Include the oracle's raw text in parse-failure responses
    #[arg(
        long,
        env = "EXAMINER_EXPOSE_RAW_OUTPUT",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub expose_raw_output: bool,
}

impl ServerConfig {
    /// Address to bind the HTTP server to.
    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    /// Oracle settings handed to the orchestrator.
    pub fn oracle_config(&self) -> OracleConfig {
        OracleConfig::new(self.model.clone())
            .with_timeout(self.oracle_timeout)
            .with_retry(RetryConfig::default().with_max_retries(self.max_retries))
    }
}
