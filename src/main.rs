mod backends;
mod config;
mod err;
mod get_ip;
mod logging;
mod options;
mod sync;

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use crate::backends::{Backend, Cloudflare, RecordType};
use crate::config::Config;
use crate::err::Result;
use crate::get_ip::IpFamily;
use crate::options::Options;

use clap::Parser;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let opts = Options::parse();
    let log_level = opts.log_level.unwrap_or(tracing::Level::INFO);

    let _log_guard = match logging::init(Path::new(&opts.log_dir), log_level) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("ddns-sync v{} starting", env!("CARGO_PKG_VERSION"));

    // A .env in the working directory stands in for the real environment.
    let _ = dotenvy::dotenv();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("The configuration is: {:?}", config);

    let timeout = Duration::from_secs(opts.timeout);

    let backend = match Cloudflare::new(config.api_token.clone(), timeout) {
        Ok(cloudflare) => Backend::Cloudflare(cloudflare),
        Err(e) => {
            error!("cannot build the provider client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let lookup_client = match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            error!("cannot build the lookup client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Families are reconciled independently; any failure still shows up
    // in the exit status.
    let mut all_synced = true;
    for family in opts.families() {
        match sync_family(&lookup_client, &backend, &config, family).await {
            Ok(()) => {}
            Err(e) => {
                error!("{} record left unreconciled: {}", family, e);
                all_synced = false;
            }
        }
    }

    if all_synced {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn sync_family(
    lookup_client: &reqwest::Client,
    backend: &Backend,
    config: &Config,
    family: IpFamily,
) -> Result<()> {
    let addr = get_ip::get_pub_ip(lookup_client, family).await?;
    debug!("public {} address is {}", family, addr);

    let outcome = sync::sync_record(
        backend,
        &config.zone_id,
        RecordType::from(family),
        &config.hostname,
        addr,
    )
    .await?;
    debug!("{} reconciliation finished: {:?}", family, outcome);

    Ok(())
}
