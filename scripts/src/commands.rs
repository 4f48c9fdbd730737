//! Implementations of the deploy script commands

use std::str::FromStr;

use alloy::{
    primitives::{Address, U256},
    sol_types::SolValue,
};
use tracing::info;

use crate::{
    cli::ChangeControllerArgs,
    constants::{
        DISTRIBUTION_ADDRESSES, DISTRIBUTION_AMOUNT, ESCROW_ABI_FILE, ESCROW_CONTRACT_KEY,
        ESCROW_NAME, ESCROW_SYMBOL, ESCROW_VERSION, TOKEN_ABI_FILE, TOKEN_CONTRACT_KEY,
        TOKEN_DECIMALS, TOKEN_INITIAL_SUPPLY, TOKEN_MANAGER_ADDRESS, TOKEN_NAME, TOKEN_SYMBOL,
    },
    errors::ScriptError,
    solidity::{ERC20CRV, VotingEscrow},
    types::DaoContract,
    utils::{
        deploy_contract, load_artifact, parse_addr_from_deployments_file,
        retry_while_unrecognized, send_tx, write_abi_file, write_deployed_address, Wallet,
    },
};

// ------------------
// | Deploy Testnet |
// ------------------

/// Deploy the CRV token & voting escrow, hand token control to the token
/// manager, and send the initial CRV distribution.
///
/// Each deployed address is recorded in the deployments file, and each
/// contract's ABI is written next to the working directory for downstream
/// consumers.
pub async fn deploy_testnet(
    client: Wallet,
    deployments_path: &str,
    artifacts_dir: &str,
) -> Result<(), ScriptError> {
    info!("Deploying CRV token...");
    let token_artifact = load_artifact(DaoContract::Erc20Crv, artifacts_dir)?;
    let constructor_args = (
        TOKEN_NAME,
        TOKEN_SYMBOL,
        U256::from(TOKEN_DECIMALS),
        U256::from(TOKEN_INITIAL_SUPPLY),
    )
        .abi_encode_params();
    let init_code = [token_artifact.deploy_code()?, constructor_args].concat();

    let token_address =
        retry_while_unrecognized(|| deploy_contract(&client, init_code.clone())).await?;
    info!("CRV token deployed at {token_address:#x}");

    write_abi_file(TOKEN_ABI_FILE, &token_artifact.abi)?;
    write_deployed_address(deployments_path, TOKEN_CONTRACT_KEY, token_address)?;

    info!("Deploying voting escrow...");
    let escrow_artifact = load_artifact(DaoContract::VotingEscrow, artifacts_dir)?;
    let constructor_args =
        (token_address, ESCROW_NAME, ESCROW_SYMBOL, ESCROW_VERSION).abi_encode_params();
    let init_code = [escrow_artifact.deploy_code()?, constructor_args].concat();

    let escrow_address =
        retry_while_unrecognized(|| deploy_contract(&client, init_code.clone())).await?;
    info!("Voting escrow deployed at {escrow_address:#x}");

    write_abi_file(ESCROW_ABI_FILE, &escrow_artifact.abi)?;
    write_deployed_address(deployments_path, ESCROW_CONTRACT_KEY, escrow_address)?;

    info!("Changing controller...");
    let escrow = VotingEscrow::new(escrow_address, client.clone());
    let token_manager = parse_address(TOKEN_MANAGER_ADDRESS)?;
    retry_while_unrecognized(|| send_tx(escrow.changeController(token_manager))).await?;

    distribute_from(&client, token_address).await
}

// ---------------------
// | Change Controller |
// ---------------------

/// Hand control of the deployed voting escrow to a new controller,
/// defaulting to the token manager
pub async fn change_controller(
    args: ChangeControllerArgs,
    client: Wallet,
    deployments_path: &str,
) -> Result<(), ScriptError> {
    let controller = match args.controller {
        Some(ref addr) => parse_address(addr)?,
        None => parse_address(TOKEN_MANAGER_ADDRESS)?,
    };

    let escrow_address =
        parse_addr_from_deployments_file(deployments_path, ESCROW_CONTRACT_KEY)?;
    let escrow = VotingEscrow::new(escrow_address, client);

    info!("Changing controller...");
    retry_while_unrecognized(|| send_tx(escrow.changeController(controller))).await?;
    info!("Controller of {escrow_address:#x} changed to {controller:#x}");

    Ok(())
}

// --------------
// | Distribute |
// --------------

/// Send the distribution amount of CRV to each distribution address, from
/// the token recorded in the deployments file
pub async fn distribute(client: Wallet, deployments_path: &str) -> Result<(), ScriptError> {
    let token_address = parse_addr_from_deployments_file(deployments_path, TOKEN_CONTRACT_KEY)?;
    distribute_from(&client, token_address).await
}

/// Send the distribution amount of CRV from the token at the given address
/// to each distribution address
async fn distribute_from(client: &Wallet, token_address: Address) -> Result<(), ScriptError> {
    info!("Sending coins...");
    let token = ERC20CRV::new(token_address, client.clone());
    let amount = U256::from(DISTRIBUTION_AMOUNT);

    for addr in DISTRIBUTION_ADDRESSES {
        let recipient = parse_address(addr)?;
        retry_while_unrecognized(|| send_tx(token.transfer(recipient, amount))).await?;
        info!("Transferred to {recipient:#x}");
    }

    Ok(())
}

// -----------
// | Helpers |
// -----------

/// Parse an EVM address from a hex string
fn parse_address(addr: &str) -> Result<Address, ScriptError> {
    Address::from_str(addr).map_err(|e| ScriptError::CalldataConstruction(e.to_string()))
}
