//! Utilities shared by the integration tests

use alloy::{
    contract::{CallBuilder, CallDecoder},
    network::Ethereum,
    primitives::Address,
    rpc::types::TransactionReceipt,
};
use eyre::Result;
use scripts::{
    types::DaoContract,
    utils::{deploy_contract, load_artifact, Wallet},
};

use crate::constants::{INITIAL_SUPPLY, YEAR, YEAR_1_SUPPLY};

/// A contract call builder using the integration client
pub type TestCallBuilder<'a, C> = CallBuilder<&'a Wallet, C, Ethereum>;

/// Send a contract transaction and await its receipt
pub async fn send_tx<C>(tx: TestCallBuilder<'_, C>) -> Result<TransactionReceipt>
where
    C: CallDecoder,
{
    Ok(scripts::utils::send_tx(tx).await?)
}

/// Deploy one fixture contract from its artifact with the given encoded
/// constructor arguments, returning the deployed address
pub async fn deploy_fixture(
    client: &Wallet,
    contract: DaoContract,
    artifacts_dir: &str,
    constructor_args: Vec<u8>,
) -> Result<Address> {
    let artifact = load_artifact(contract, artifacts_dir)?;
    let init_code = [artifact.deploy_code()?, constructor_args].concat();
    Ok(deploy_contract(client, init_code).await?)
}

/// Relative approximate equality, `2|a - b| / (a + b) <= precision`, with two
/// zeros equal
pub fn approx(a: f64, b: f64, precision: f64) -> bool {
    if a == 0.0 && b == 0.0 {
        return true;
    }

    2.0 * (a - b).abs() / (a + b) <= precision
}

/// The closed-form CRV supply `elapsed` seconds into the given mining epoch.
///
/// Sums the geometric series over completed epochs and the current epoch's
/// linear term, in float arithmetic with each term truncated to integer wei,
/// matching how the emission schedule is derived.
pub fn theoretical_supply(epoch: i128, elapsed: u64) -> u128 {
    let q = 1.0 / 2f64.sqrt();
    let mut supply = INITIAL_SUPPLY;

    if epoch > 0 {
        let geometric = (YEAR_1_SUPPLY as f64) * (1.0 - q.powi(epoch as i32)) / (1.0 - q);
        supply += geometric as u128;
    }

    let rate = ((YEAR_1_SUPPLY / YEAR as u128) as f64 * q.powi(epoch as i32)) as u128;
    supply + rate * elapsed as u128
}

#[cfg(test)]
mod tests {
    use super::{approx, theoretical_supply};
    use crate::constants::{INITIAL_SUPPLY, YEAR, YEAR_1_SUPPLY};

    /// Before any time elapses in the zeroth epoch, the supply is exactly the
    /// initial mint
    #[test]
    fn test_supply_before_inflation() {
        assert_eq!(theoretical_supply(0, 0), INITIAL_SUPPLY);
    }

    /// Within an epoch the supply grows linearly at the epoch's whole-wei rate
    #[test]
    fn test_supply_linear_within_epoch() {
        let rate = ((YEAR_1_SUPPLY / YEAR as u128) as f64) as u128;
        let elapsed = 12_345u64;

        let grown = theoretical_supply(0, elapsed) - theoretical_supply(0, 0);
        assert_eq!(grown, rate * elapsed as u128);
    }

    /// The closed-form geometric term agrees with a hand-expanded sum of
    /// per-epoch emissions
    #[test]
    fn test_supply_geometric_term() {
        let q = 1.0 / 2f64.sqrt();
        for epoch in 1..=5i128 {
            let mut emitted = 0f64;
            for completed in 0..epoch {
                emitted += (YEAR_1_SUPPLY as f64) * q.powi(completed as i32);
            }
            let expected = INITIAL_SUPPLY + emitted as u128;

            let actual = theoretical_supply(epoch, 0);
            assert!(
                approx(actual as f64, expected as f64, 1e-12),
                "epoch {epoch}: {actual} != {expected}",
            );
        }
    }

    /// Each epoch's emission rate decays by 1/√2
    #[test]
    fn test_supply_rate_decay() {
        let rate_0 = theoretical_supply(0, 1) - theoretical_supply(0, 0);
        let rate_1 = theoretical_supply(1, 1) - theoretical_supply(1, 0);

        assert!(
            approx(rate_0 as f64, rate_1 as f64 * 2f64.sqrt(), 1e-9),
            "rates do not decay by 1/sqrt(2): {rate_0} vs {rate_1}",
        );
    }

    /// Relative-tolerance edge cases, including the two-zeros special case
    #[test]
    fn test_approx() {
        assert!(approx(0.0, 0.0, 1e-10));
        assert!(approx(1.0, 1.0, 0.0));
        assert!(approx(1e27, 1e27 + 1e15, 1e-10));

        assert!(!approx(1e27, 1.001e27, 1e-10));
        assert!(!approx(0.0, 1.0, 1e-10));
    }
}
