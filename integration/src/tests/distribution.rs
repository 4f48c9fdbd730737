//! Token distribution tests, mirroring the deploy sequence's final step

use std::str::FromStr;

use alloy::primitives::{Address, U256};
use eyre::{ensure, Result};
use scripts::constants::{DISTRIBUTION_ADDRESSES, DISTRIBUTION_AMOUNT};

use crate::{integration_test, test_args::TestArgs, utils::send_tx};

/// The fixed distribution amount lands at each distribution address, debited
/// from the deployer without changing the total supply
async fn test_distribution_transfers(args: TestArgs) -> Result<()> {
    let amount = U256::from(DISTRIBUTION_AMOUNT);
    let supply_before = args.token.totalSupply().call().await?;
    let deployer_before = args.token.balanceOf(args.deployer()).call().await?;

    for addr in DISTRIBUTION_ADDRESSES {
        let recipient = Address::from_str(addr)?;
        send_tx(args.token.transfer(recipient, amount)).await?;

        let balance = args.token.balanceOf(recipient).call().await?;
        ensure!(
            balance == amount,
            "distribution amount not credited to {recipient:#x}",
        );
    }

    let n_recipients = U256::from(DISTRIBUTION_ADDRESSES.len() as u64);
    let deployer_after = args.token.balanceOf(args.deployer()).call().await?;
    ensure!(
        deployer_after == deployer_before - amount * n_recipients,
        "deployer balance not debited by the distributed total",
    );
    ensure!(
        args.token.totalSupply().call().await? == supply_before,
        "transfers must not change the total supply",
    );

    Ok(())
}
integration_test!(test_distribution_transfers);
