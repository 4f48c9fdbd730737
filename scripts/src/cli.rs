//! Definitions of CLI arguments and commands for deploy scripts

use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{change_controller, deploy_testnet, distribute},
    constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_DEPLOYMENTS_PATH, DEFAULT_RPC_URL},
    errors::ScriptError,
    utils::Wallet,
};

/// Scripts for deploying & administering the Curve DAO contracts
#[derive(Parser)]
pub struct Cli {
    /// Private key of the deployer
    // TODO: Better key management
    #[arg(short, long, env = "PKEY")]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Path to a `deployments.json` file
    #[arg(short, long, default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: String,

    /// Directory containing the compiled contract artifacts
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: String,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The possible CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the CRV token & voting escrow to a testnet,
    /// transferring token control to the token manager
    DeployTestnet,
    /// Hand control of the deployed CRV token to a new controller
    ChangeController(ChangeControllerArgs),
    /// Send the distribution amount of CRV to each distribution address
    Distribute,
}

/// Arguments for the `change-controller` command
#[derive(Args)]
pub struct ChangeControllerArgs {
    /// Address of the new token controller.
    ///
    /// Defaults to the token manager address.
    #[arg(short, long)]
    pub controller: Option<String>,
}

impl Command {
    /// Run the command
    pub async fn run(
        self,
        client: Wallet,
        deployments_path: &str,
        artifacts_dir: &str,
    ) -> Result<(), ScriptError> {
        match self {
            Command::DeployTestnet => deploy_testnet(client, deployments_path, artifacts_dir).await,
            Command::ChangeController(args) => {
                change_controller(args, client, deployments_path).await
            },
            Command::Distribute => distribute(client, deployments_path).await,
        }
    }
}
