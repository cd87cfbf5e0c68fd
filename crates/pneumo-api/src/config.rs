use std::env;
use std::net::SocketAddr;

use eyre::WrapErr;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
    /// Serve through the Lambda runtime instead of a TCP listener.
    pub lambda: bool,
}

impl ApiConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any variable source.
    ///
    /// - `PNEUMO_BIND_ADDR`: listen address, default `127.0.0.1:8080`
    /// - `PNEUMO_LOG_FORMAT`: `json` (default) or `pretty`
    /// - `AWS_LAMBDA_RUNTIME_API`: set by the Lambda runtime
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let bind_addr = lookup("PNEUMO_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .wrap_err_with(|| format!("invalid PNEUMO_BIND_ADDR: {bind_addr}"))?;

        let log_format = match lookup("PNEUMO_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => eyre::bail!("invalid PNEUMO_LOG_FORMAT: {other} (expected json or pretty)"),
        };

        Ok(Self {
            bind_addr,
            log_format,
            lambda: lookup("AWS_LAMBDA_RUNTIME_API").is_some(),
        })
    }
}
