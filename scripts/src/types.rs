//! Types for the deploy scripts

use std::{
    fmt::{self, Display},
    path::{Path, PathBuf},
};

use crate::constants::ARTIFACT_EXTENSION;

/// The contracts in the Curve DAO set, named by their compiled artifacts
#[derive(Copy, Clone)]
pub enum DaoContract {
    /// The CRV governance & utility token
    Erc20Crv,
    /// The vote-escrowed CRV contract
    VotingEscrow,
    /// The gauge weight voting contract
    GaugeController,
    /// The CRV minter
    Minter,
    /// The pool ownership proxy
    PoolProxy,
    /// A liquidity gauge measuring LP deposits
    LiquidityGauge,
    /// A plain ERC20, used as a pool coin in testing
    Erc20,
    /// A mintable ERC20, used as a pool LP token in testing
    Erc20Lp,
    /// A mock exchange pool, used in testing
    CurvePool,
}

impl DaoContract {
    /// Path of the contract's compiled artifact within the artifacts directory
    pub fn artifact_path(&self, artifacts_dir: &str) -> PathBuf {
        Path::new(artifacts_dir)
            .join(self.to_string())
            .with_extension(ARTIFACT_EXTENSION)
    }
}

impl Display for DaoContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaoContract::Erc20Crv => write!(f, "ERC20CRV"),
            DaoContract::VotingEscrow => write!(f, "VotingEscrow"),
            DaoContract::GaugeController => write!(f, "GaugeController"),
            DaoContract::Minter => write!(f, "Minter"),
            DaoContract::PoolProxy => write!(f, "PoolProxy"),
            DaoContract::LiquidityGauge => write!(f, "LiquidityGauge"),
            DaoContract::Erc20 => write!(f, "ERC20"),
            DaoContract::Erc20Lp => write!(f, "ERC20LP"),
            DaoContract::CurvePool => write!(f, "CurvePool"),
        }
    }
}
