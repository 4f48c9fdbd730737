//! Emission schedule tests against the on-chain supply

use alloy::primitives::U256;
use eyre::{ensure, Result};

use crate::{
    constants::{INFLATION_DELAY, SUPPLY_PRECISION},
    integration_test,
    test_args::TestArgs,
    utils::{approx, send_tx},
};

/// Seconds to advance into the first epoch before comparing supplies
const EPOCH_HEAD_START: u64 = 7 * 86400;

/// After the inflation delay, updating the mining parameters starts epoch 0
/// and the on-chain available supply tracks the closed-form schedule
async fn test_available_supply_tracks_schedule(args: TestArgs) -> Result<()> {
    ensure!(
        args.token.mining_epoch().call().await? == -1,
        "inflation should not have started at deployment",
    );

    // Cross the inflation delay and start the first epoch
    args.advance_time(INFLATION_DELAY + 1).await?;
    send_tx(args.token.update_mining_parameters()).await?;

    ensure!(args.token.mining_epoch().call().await? == 0, "first epoch not started");
    ensure!(args.token.rate().call().await? > U256::ZERO, "inflation rate not set");

    // A week into the epoch, the observed supply matches the closed form
    args.advance_time(EPOCH_HEAD_START).await?;
    let available = args.token.available_supply().call().await?;
    let expected = args.theoretical_supply().await?;

    ensure!(
        approx(expected as f64, available.to::<u128>() as f64, SUPPLY_PRECISION),
        "available supply {available} diverges from the schedule's {expected}",
    );

    Ok(())
}
integration_test!(test_available_supply_tracks_schedule);
