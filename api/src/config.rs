//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::logging::{LogConfig, LogFormat};
use crate::predictor::CategoricalPolicy;

#[derive(Debug, Parser)]
#[command(
    name = "hotel-cancellation-api",
    version,
    about = "Serves the hotel booking cancellation predictor"
)]
pub struct Config {
    /// Path to the JSON model artifact.
    #[arg(long, env = "MODEL_PATH")]
    pub model_path: PathBuf,

    /// Address the HTTP server binds to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Treatment of unrecognised choice values.
    #[arg(
        long,
        env = "CATEGORICAL_POLICY",
        value_enum,
        default_value_t = CategoricalPolicy::Lenient
    )]
    pub categorical_policy: CategoricalPolicy,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormatArg::Pretty)]
    pub log_format: LogFormatArg,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

impl Config {
    pub fn log_config(&self) -> LogConfig {
        LogConfig::from_verbosity(self.verbose).with_format(self.log_format.into())
    }
}
