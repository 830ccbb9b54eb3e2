use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tally_chart::{Presenter, SnapshotChart, TerminalChart};
use tally_config::{ChartConfig, TallyConfig};
use tally_db::MessageStore;
use tracing::{debug, error, info, warn};

use crate::exit::Failure;
use crate::tail::TailLoop;

mod bootstrap;
mod cli;
mod exit;
mod logging;
mod tail;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli::Cli {} = cli::Cli::parse();

    let config = match bootstrap::load_config() {
        Ok(config) => config,
        Err(error) => return report_config_failure(&error),
    };

    let dispatch = match logging::dispatch(&config.log) {
        Ok(dispatch) => dispatch,
        Err(error) => return report_config_failure(&error),
    };
    let _log_guard = tracing::dispatcher::set_default(&dispatch);

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => failure.exit_code(),
    }
}

fn report_config_failure(error: &anyhow::Error) -> ExitCode {
    let _guard = tracing::dispatcher::set_default(&logging::fallback());
    error!(error = format!("{error:#}"), "configuration failure");
    Failure::Config.exit_code()
}

async fn run(config: &TallyConfig) -> Result<(), Failure> {
    info!(
        live_data_path = %config.live_data_path.display(),
        sqlite_path = %config.sqlite_path.display(),
        interval_secs = config.interval_secs,
        "starting tally"
    );

    if let Err(error) = bootstrap::reset_store(&config.sqlite_path) {
        error!(error = format!("{error:#}"), "failed to reset message store");
        return Err(Failure::StoreReset);
    }

    let store = MessageStore::open_local(&config.sqlite_path)
        .await
        .map_err(|error| {
            error!(%error, "failed to open message store");
            Failure::Unexpected
        })?;

    let mut presenter = presenter(&config.chart);
    let outcome = consume(config, &store, presenter.as_mut()).await;

    if let Err(error) = presenter.finish() {
        warn!(%error, "failed to finalize chart");
    }
    outcome
}

async fn consume(
    config: &TallyConfig,
    store: &MessageStore,
    presenter: &mut dyn Presenter,
) -> Result<(), Failure> {
    let mut tail = TailLoop::new(&config.live_data_path, config.interval(), store, presenter);

    let outcome = tokio::select! {
        result = tail.run() => {
            let Err(error) = result;
            error!(%error, "stopping consumer");
            Err(Failure::from(&error))
        }
        () = interrupted() => {
            warn!("interrupted");
            Ok(())
        }
    };

    let stats = tail.stats();
    info!(
        path = %tail.path().display(),
        offset = tail.cursor().offset(),
        passes = stats.passes,
        records = stats.records,
        json_failures = stats.json_failures,
        validation_failures = stats.validation_failures,
        store_failures = stats.store_failures,
        aggregate_failures = stats.aggregate_failures,
        chart_failures = stats.chart_failures,
        "consumer shutting down"
    );
    outcome
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn interrupted() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "unable to listen for interrupt");
        std::future::pending::<()>().await;
    }
}

fn presenter(chart: &ChartConfig) -> Box<dyn Presenter> {
    if chart.headless || !std::io::stdout().is_terminal() {
        debug!(height = chart.height, "rendering chart headless");
        Box::new(SnapshotChart::new(chart.height))
    } else {
        Box::new(TerminalChart::new(chart.height))
    }
}
