//! Constants used in the integration tests

/// Hostport of a local devnet node
pub const DEFAULT_DEVNET_HOSTPORT: &str = "http://127.0.0.1:8545";

/// Default private key, the first pre-funded devnet account
pub const DEFAULT_DEVNET_PKEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Default directory containing the compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Number of extra accounts funded & registered alongside the deployer
pub const N_EXTRA_ACCOUNTS: usize = 4;

/// Ether balance given to each extra account
pub const EXTRA_ACCOUNT_ETH: &str = "100";

/// Number of gauges in the multi-gauge fixture
pub const N_GAUGES: usize = 3;

/// Name of the first mock pool coin
pub const COIN_A_NAME: &str = "Coin A";

/// Ticker symbol of the first mock pool coin
pub const COIN_A_SYMBOL: &str = "USDA";

/// Name of the second mock pool coin
pub const COIN_B_NAME: &str = "Coin B";

/// Ticker symbol of the second mock pool coin
pub const COIN_B_SYMBOL: &str = "USDB";

/// Decimals of the mock coins & LP token
pub const MOCK_COIN_DECIMALS: u64 = 18;

/// Name of the mock LP token
pub const LP_TOKEN_NAME: &str = "Curve LP token";

/// Ticker symbol of the mock LP token
pub const LP_TOKEN_SYMBOL: &str = "usdCrv";

/// Initial whole-token supply of the mock LP token, minted to the deployer
pub const LP_TOKEN_INITIAL_SUPPLY: u64 = 1_000_000_000;

/// Amplification coefficient of the mock pool
pub const POOL_AMPLIFICATION: u64 = 100;

/// Fee parameter of the mock pool
pub const POOL_FEE: u64 = 4_000_000;

/// 10^18, the wei scaling factor
pub const POW_18: u128 = 10u128.pow(18);

/// Seconds in one year of the emission schedule
pub const YEAR: u64 = 365 * 86400;

/// CRV-wei emitted over the first year, rounded down to a whole-wei-per-second
/// rate
pub const YEAR_1_SUPPLY: u128 = 594_661_989 * POW_18 / (YEAR as u128) * (YEAR as u128);

/// The initial CRV supply in wei, minted to the deployer at construction
pub const INITIAL_SUPPLY: u128 = 1_000_000_000 * POW_18;

/// Seconds the token waits after deployment before inflation can begin
pub const INFLATION_DELAY: u64 = 86400;

/// Relative precision for comparing supply values
pub const SUPPLY_PRECISION: f64 = 1e-10;
