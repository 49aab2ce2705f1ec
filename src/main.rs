use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use plainly_cli::{Session, SystemClipboard, format_result, print_progress};
use plainly_core::{
    ComplexityLevel, ConnectivityMonitor, Notifier, Simplifier, StubSimplifier, WorkflowRunner,
};
use plainly_remote::{RemoteConfig, RemoteSimplifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Canned answers, no network
    Stub,
    /// HTTP simplification service
    Remote,
}

#[derive(Parser)]
#[command(name = "plainly")]
#[command(about = "Rewrite dense text in plain English", long_about = None)]
struct Cli {
    /// Simplify this text once and exit
    #[arg(short, long)]
    text: Option<String>,

    /// Reading level: standard or child
    #[arg(short, long, default_value = "standard")]
    level: String,

    /// Which simplifier to use (defaults to PLAINLY_BACKEND, then stub)
    #[arg(short, long, value_enum)]
    backend: Option<Backend>,

    /// Endpoint of the remote simplifier (overrides PLAINLY_API_URL)
    #[arg(long)]
    url: Option<String>,

    /// Remote request timeout in seconds (overrides PLAINLY_TIMEOUT_SECS)
    #[arg(long)]
    timeout: Option<u64>,

    /// Log workflow transitions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // a subscriber may already be installed when embedded; keep the existing one
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn backend_from_env() -> Result<Backend> {
    match std::env::var("PLAINLY_BACKEND") {
        Ok(value) => Backend::from_str(&value, true)
            .map_err(|_| anyhow::anyhow!("PLAINLY_BACKEND must be 'stub' or 'remote', got '{}'", value)),
        Err(_) => Ok(Backend::Stub),
    }
}

fn build_simplifier(cli: &Cli) -> Result<Arc<dyn Simplifier>> {
    let backend = match cli.backend {
        Some(backend) => backend,
        None => backend_from_env()?,
    };

    match backend {
        Backend::Stub => {
            let mut stub = StubSimplifier::new();
            if let Ok(raw) = std::env::var("PLAINLY_STUB_DELAY_MS") {
                let millis: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("PLAINLY_STUB_DELAY_MS is not a number: '{}'", raw))?;
                stub = stub.with_delay(Duration::from_millis(millis));
            }
            let simplifier: Arc<dyn Simplifier> = Arc::new(stub);
            Ok(simplifier)
        }
        Backend::Remote => {
            let mut config = RemoteConfig::from_env()?;
            if let Some(url) = &cli.url {
                config.api_url = url.clone();
            }
            if let Some(timeout) = cli.timeout {
                config.timeout_secs = timeout;
            }
            let config = config.validated()?;
            tracing::info!(url = %config.api_url, timeout_secs = config.timeout_secs, "using remote simplifier");
            let simplifier: Arc<dyn Simplifier> = Arc::new(RemoteSimplifier::new(config)?);
            Ok(simplifier)
        }
    }
}

/// Run a single request and format whatever ended up on screen
async fn simplify_once(
    runner: &WorkflowRunner,
    text: String,
    level: ComplexityLevel,
) -> Result<String> {
    let result = runner
        .submit_with(text, level)
        .await
        .context("simplification failed")?;

    Ok(match runner.snapshot().rendered() {
        Some(rendered) => format_result(&rendered),
        None => result.simplified,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(level) = ComplexityLevel::from_str(&cli.level) else {
        bail!("unknown level '{}', expected one of: standard, child", cli.level);
    };

    let simplifier = build_simplifier(&cli)?;
    let runner = WorkflowRunner::new(simplifier)
        .with_notifier(Notifier::new())
        .with_progress_listener(Arc::new(|message: &str| print_progress(message)));

    // One-shot mode
    if let Some(text) = cli.text {
        println!("{}", simplify_once(&runner, text, level).await?);
        return Ok(());
    }

    // Interactive mode
    runner.select_level(level);
    let connectivity = ConnectivityMonitor::default();
    let mut session = Session::new(runner, connectivity, Box::new(SystemClipboard::new()));
    session.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plainly_core::{EXAMPLE_PASSAGE, Error};

    fn stub_runner() -> WorkflowRunner {
        WorkflowRunner::new(Arc::new(StubSimplifier::new().with_delay(Duration::ZERO)))
    }

    #[tokio::test]
    async fn test_simplify_once_formats_result() {
        let output = simplify_once(
            &stub_runner(),
            EXAMPLE_PASSAGE.to_string(),
            ComplexityLevel::Standard,
        )
        .await
        .unwrap();
        assert!(output.contains("Plain English Version"));
        assert!(output.contains("yearly deductible"));
    }

    #[tokio::test]
    async fn test_simplify_once_returns_error() {
        let err = simplify_once(&stub_runner(), "too short".to_string(), ComplexityLevel::Child)
            .await
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Validation { .. })));
        assert_eq!(err.to_string(), "simplification failed");
    }
}
