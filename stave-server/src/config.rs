//! Server configuration from command-line flags and environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::{ArgAction, Parser};
use stave_core::{ComposeConfig, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};

use crate::service::ServiceConfig;

/// Default port for the stave server.
pub const DEFAULT_PORT: u16 = 9470;

/// Command-line arguments for the `stave` binary.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "stave")]
#[command(about = "Server-side component rendering service")]
#[command(version)]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(long, env = "STAVE_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "STAVE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Maximum composition depth (1 to 256).
    #[arg(
        long,
        env = "STAVE_MAX_DEPTH",
        default_value_t = DEFAULT_MAX_DEPTH,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new()
            .range(1..=MAX_DEPTH_LIMIT as u64)
    )]
    pub max_depth: usize,

    /// Record per-component render statistics.
    #[arg(
        long,
        env = "STAVE_PERFORMANCE_MONITORING",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub performance_monitoring: bool,

    /// Render an inline error box instead of returning an error status.
    #[arg(
        long,
        env = "STAVE_FALLBACK_ON_ERROR",
        default_value_t = false,
        action = ArgAction::Set
    )]
    pub fallback_on_error: bool,

    /// Log renders slower than this many milliseconds.
    #[arg(long, env = "STAVE_SLOW_RENDER_MS", default_value_t = 1000)]
    pub slow_render_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            max_depth: DEFAULT_MAX_DEPTH,
            performance_monitoring: true,
            fallback_on_error: false,
            slow_render_ms: 1000,
        }
    }
}

impl ServerConfig {
    /// Socket address to bind.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Render service settings derived from these flags.
    #[must_use]
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            compose: ComposeConfig::default().with_max_depth(self.max_depth),
            performance_monitoring: self.performance_monitoring,
            fallback_on_error: self.fallback_on_error,
            slow_render_threshold: Duration::from_millis(self.slow_render_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_parser() {
        let parsed = ServerConfig::try_parse_from(["stave"]).expect("should parse");

        assert_eq!(parsed, ServerConfig::default());
        assert_eq!(parsed.socket_addr().to_string(), "127.0.0.1:9470");
    }

    #[test]
    fn test_flags() {
        let parsed = ServerConfig::try_parse_from([
            "stave",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--max-depth",
            "32",
            "--performance-monitoring",
            "false",
            "--fallback-on-error",
            "true",
            "--slow-render-ms",
            "250",
        ])
        .expect("should parse");

        assert_eq!(parsed.socket_addr().to_string(), "0.0.0.0:8080");
        let service = parsed.service_config();
        assert_eq!(service.compose.max_depth(), 32);
        assert!(!service.performance_monitoring);
        assert!(service.fallback_on_error);
        assert_eq!(service.slow_render_threshold, Duration::from_millis(250));
    }

    #[test]
    fn test_max_depth_range() {
        let ceiling = MAX_DEPTH_LIMIT.to_string();
        let parsed = ServerConfig::try_parse_from(["stave", "--max-depth", ceiling.as_str()])
            .expect("ceiling should parse");
        assert_eq!(parsed.service_config().compose.max_depth(), MAX_DEPTH_LIMIT);

        for depth in ["0", "257", "1000"] {
            assert!(
                ServerConfig::try_parse_from(["stave", "--max-depth", depth]).is_err(),
                "{depth} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(ServerConfig::try_parse_from(["stave", "--port", "99999"]).is_err());
    }
}
