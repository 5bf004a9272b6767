use anyhow::{bail, Context, Result};
use cdp_page::CdpBrowser;
use clap::Parser;
use harvest_flow::HarvestFlow;
use threadharvest_cli::cli::{Cli, Command, RunArgs};
use threadharvest_cli::config::AppConfig;
use threadharvest_cli::output;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Run(args) => run(args).await,
        Command::PrintConfig { config } => {
            let config = AppConfig::load(config.as_deref())?;
            println!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(args: RunArgs) -> Result<()> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(ws_url) = args.ws_url {
        config.browser.ws_url = Some(ws_url);
    }
    if args.headed {
        config.browser.headless = false;
    }
    if let Some(cap) = args.max_iterations {
        config.policies.load.max_iterations = cap;
    }

    let url = url::Url::parse(&args.url)
        .with_context(|| format!("invalid thread url: {}", args.url))?;

    let browser = match &config.browser.ws_url {
        Some(ws_url) => CdpBrowser::connect(ws_url)
            .await
            .context("attaching to browser")?,
        None => CdpBrowser::launch(config.browser.headless)
            .await
            .context("launching browser")?,
    };
    let page = browser.open(url.as_str()).await.context("opening thread")?;

    let flow = HarvestFlow::new(config.policies);
    let outcome = flow.run(&page).await;
    browser.close().await;

    match outcome {
        Ok(report) => {
            info!(
                records = report.records.len(),
                sorted = report.sort.switched,
                iterations = report.load.iterations,
                clicks = report.load.load_more_clicks,
                latency_ms = report.latency_ms,
                "harvest finished"
            );
            output::write(&report, args.format, args.out.as_deref())?;
            Ok(())
        }
        Err(err) => bail!("harvest failed: {err}"),
    }
}
