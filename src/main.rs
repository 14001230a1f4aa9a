use anyhow::{bail, Context};
use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};

use vless2quanx::{subconverter, Settings};

/// Convert a VLESS subscription into QuantumultX VMess and VLESS server lines
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Subscription URL, overrides `subscription_url` from the settings file
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,

    /// Output file for VMess lines
    #[arg(long, value_name = "FILE")]
    vmess_output: Option<String>,

    /// Output file for VLESS lines
    #[arg(long, value_name = "FILE")]
    vless_output: Option<String>,

    /// Upstream proxy for the fetch (e.g. http://127.0.0.1:8080), or NONE
    #[arg(long, value_name = "PROXY")]
    proxy: Option<String>,
}

fn load_settings(args: Args) -> anyhow::Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path))?,
        None => Settings::default(),
    };

    if let Some(url) = args.url {
        settings.subscription_url = url;
    }
    if let Some(path) = args.vmess_output {
        settings.vmess_output = path;
    }
    if let Some(path) = args.vless_output {
        settings.vless_output = path;
    }
    if let Some(proxy) = args.proxy {
        settings.proxy = proxy;
    }

    if settings.subscription_url.trim().is_empty() {
        bail!("No subscription URL given; pass --url or set subscription_url in the settings file");
    }

    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = load_settings(args)?;

    // RUST_LOG still takes precedence over the configured level
    env_logger::init_from_env(Env::default().default_filter_or(settings.log_level.as_str()));

    let report = match subconverter(&settings) {
        Ok(report) => report,
        Err(e) => {
            error!("Failed to fetch subscription: {}", e);
            return Err(e).context("Subscription conversion aborted");
        }
    };

    if report.vmess.is_ok() {
        info!("Import {} into QuantumultX first", settings.vmess_output);
    }
    if report.vless.is_ok() {
        info!(
            "If the VMess servers do not work, try {} instead",
            settings.vless_output
        );
    }

    if !report.is_ok() {
        warn!("Not every output file was written");
        bail!("Failed to write output files");
    }

    Ok(())
}
