//! Voting escrow controller handoff tests

use eyre::{ensure, Result};

use crate::{integration_test, test_args::TestArgs, utils::send_tx};

/// `changeController` hands the escrow to a new controller, which alone can
/// hand it back
async fn test_change_controller(args: TestArgs) -> Result<()> {
    let deployer = args.deployer();
    let initial = args.voting_escrow.controller().call().await?;
    ensure!(initial == deployer, "escrow controller should start as the deployer");

    let new_controller = args.accounts[1];
    send_tx(args.voting_escrow.changeController(new_controller)).await?;
    ensure!(
        args.voting_escrow.controller().call().await? == new_controller,
        "controller handoff not observable",
    );

    // The deployer is no longer the controller, so the handback is sent from
    // the new controller's account
    send_tx(args.voting_escrow.changeController(deployer).from(new_controller)).await?;
    ensure!(
        args.voting_escrow.controller().call().await? == deployer,
        "controller handback not observable",
    );

    Ok(())
}
integration_test!(test_change_controller);
