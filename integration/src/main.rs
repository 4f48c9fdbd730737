//! Devnet integration tests for the Curve DAO deploy tooling.
//!
//! Assumes a local devnet node (anvil or similar) with the deployer key
//! pre-funded; the fixture graph is deployed once and every test runs
//! against a snapshot of it.

use clap::Parser;
use colored::Colorize;
use eyre::Result;
use tracing::info;

use crate::{
    constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_DEVNET_HOSTPORT, DEFAULT_DEVNET_PKEY},
    test_args::TestArgs,
    test_inventory::IntegrationTest,
};

mod abis;
mod constants;
mod test_args;
mod test_inventory;
mod tests;
mod utils;

/// CLI arguments for the integration tests
#[derive(Debug, Clone, Parser)]
struct CliArgs {
    /// Private key of the deployer account on the devnet
    #[arg(short, long, env = "PKEY", default_value = DEFAULT_DEVNET_PKEY)]
    pkey: String,

    /// RPC URL of the running devnet node
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_DEVNET_HOSTPORT)]
    rpc_url: String,

    /// Directory containing the compiled contract artifacts
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    artifacts_dir: String,

    /// Run only the tests whose names contain this string
    #[arg(short, long)]
    test: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    tracing_subscriber::fmt().pretty().init();

    let test_args = TestArgs::setup(&args.pkey, &args.rpc_url, &args.artifacts_dir).await?;

    let mut n_tests = 0;
    let mut n_failures = 0;
    for test in inventory::iter::<IntegrationTest> {
        if let Some(filter) = &args.test {
            if !test.name.contains(filter) {
                continue;
            }
        }
        n_tests += 1;
        info!("Running {}...", test.name);

        // Each test observes the freshly-deployed fixture graph
        let snapshot_id = test_args.snapshot().await?;
        let res = (test.test_fn)(test_args.clone()).await;
        test_args.revert_to(snapshot_id).await?;

        match res {
            Ok(()) => println!("{}: {}", test.name, "PASS".green()),
            Err(e) => {
                n_failures += 1;
                println!("{}: {}\n\t{e}", test.name, "FAIL".red());
            },
        }
    }

    println!("\n{n_tests} tests, {n_failures} failures");
    if n_failures > 0 {
        std::process::exit(1);
    }

    Ok(())
}
