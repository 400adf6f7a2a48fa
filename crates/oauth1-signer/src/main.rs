//! OAuth 1.0a Signing Service - Entry Point

use std::num::NonZeroU32;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use oauth1_signer::config::{self, Config, defaults};
use oauth1_signer::server::SignerServer;

#[derive(Parser, Debug)]
#[command(name = "oauth1-signer")]
#[command(about = "OAuth 1.0a request signing service")]
#[command(version)]
struct Cli {
    /// HTTP server port
    #[arg(long, default_value_t = defaults::PORT, env = "PORT")]
    port: u16,

    /// Comma-separated target URL prefixes that may be signed
    #[arg(long, env = "ALLOWED_URL_PREFIXES")]
    allowed_url_prefixes: Option<String>,

    /// Sustained signing requests per minute per client
    #[arg(long, default_value_t = defaults::RATE_LIMIT_PER_MINUTE, env = "RATE_LIMIT_PER_MINUTE")]
    rate_limit_per_minute: NonZeroU32,

    /// Back-to-back signing requests allowed per client
    #[arg(long, default_value_t = defaults::RATE_LIMIT_BURST, env = "RATE_LIMIT_BURST")]
    rate_limit_burst: NonZeroU32,

    /// Take the client address from X-Forwarded-For (only behind a trusted proxy)
    #[arg(long, env = "TRUST_FORWARDED_FOR")]
    trust_forwarded_for: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), dotenv = dotenv_loaded, "Starting OAuth signer");

    let mut config = Config::from_env()?.with_rate_limit(cli.rate_limit_per_minute, cli.rate_limit_burst);
    if let Some(ref prefixes) = cli.allowed_url_prefixes {
        config.allowed_url_prefixes = config::parse_prefixes(prefixes)?;
    }
    config.trust_forwarded_for = cli.trust_forwarded_for;

    SignerServer::new(config).run_http(cli.port).await
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rate_limit_flags_default_and_override() {
        let cli = Cli::try_parse_from(["oauth1-signer", "--rate-limit-burst", "3"]).unwrap();
        assert_eq!(cli.rate_limit_burst.get(), 3);

        let cli = Cli::try_parse_from(["oauth1-signer", "--rate-limit-per-minute", "120"]).unwrap();
        assert_eq!(cli.rate_limit_per_minute.get(), 120);
        assert_eq!(cli.rate_limit_burst, defaults::RATE_LIMIT_BURST);
    }

    #[test]
    fn test_zero_rate_limit_rejected() {
        assert!(Cli::try_parse_from(["oauth1-signer", "--rate-limit-burst", "0"]).is_err());
    }
}
