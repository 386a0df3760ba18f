//! Configuration and CLI argument handling

use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;

use crate::verify::{Destinations, StaticCodeVerifier, VerificationFlow};

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "phone-verify")]
#[command(about = "A small HTTP server hosting a phone verification page flow")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, env = "VERIFY_PORT", default_value = "8888")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, env = "VERIFY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Directory holding the static pages
    #[arg(long, env = "VERIFY_DOC_ROOT", default_value = "doc")]
    pub doc_root: PathBuf,

    /// Where the browser goes after a correct verification code
    #[arg(long, env = "VERIFY_SUCCESS_URL", default_value = "/index.html")]
    pub success_url: String,

    /// Where the browser goes for "return to home"
    #[arg(long, env = "VERIFY_HOME_URL", default_value = "/hello.html")]
    pub home_url: String,

    /// Expected verification code
    #[arg(long, env = "VERIFY_CODE", default_value = "2580")]
    pub code: String,

    /// Resend cooldown in seconds
    #[arg(
        short,
        long,
        env = "VERIFY_COOLDOWN",
        default_value = "60",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub cooldown: u64,

    /// Seconds an idle, unwatched page session is kept
    #[arg(long, env = "VERIFY_SESSION_TTL", default_value = "600")]
    pub session_ttl: u64,

    /// Append logs to this file instead of stdout
    #[arg(long, env = "VERIFY_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments and environment
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn destinations(&self) -> Destinations {
        Destinations::new(self.success_url.clone(), self.home_url.clone())
    }

    /// Verification policy built from the configured code, cooldown and destinations
    pub fn flow(&self) -> VerificationFlow {
        VerificationFlow::new(
            self.cooldown,
            self.destinations(),
            Arc::new(StaticCodeVerifier::new(self.code.clone())),
        )
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_original_page() {
        let config = Config::try_parse_from(["phone-verify"]).unwrap();
        assert_eq!(config.port, 8888);
        assert_eq!(config.cooldown, 60);
        assert_eq!(config.code, "2580");
        assert_eq!(config.address(), "0.0.0.0:8888");
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.session_ttl(), Duration::from_secs(600));
        assert!(config.log_file.is_none());
        assert_eq!(config.flow().cooldown_seconds(), 60);
    }

    #[test]
    fn destinations_come_from_arguments() {
        let config = Config::try_parse_from([
            "phone-verify",
            "--success-url",
            "/welcome.html",
            "--home-url",
            "/start.html",
            "--log-file",
            "/tmp/phone-verify.log",
            "-v",
        ])
        .unwrap();
        let destinations = config.destinations();
        assert_eq!(destinations.success(), "/welcome.html");
        assert_eq!(destinations.home(), "/start.html");
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/phone-verify.log")));
        assert_eq!(config.flow().go_home().redirect, "/start.html");
    }

    #[test]
    fn zero_cooldown_is_rejected() {
        assert!(Config::try_parse_from(["phone-verify", "--cooldown", "0"]).is_err());
    }
}
