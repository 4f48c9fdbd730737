//! Constants used in the deploy scripts

/// Default RPC URL, targeting a local devnet node
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// Default path of the deployments file
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";

/// Default directory containing the compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The name of the CRV token
pub const TOKEN_NAME: &str = "Curve DAO Token";

/// The ticker symbol of the CRV token
pub const TOKEN_SYMBOL: &str = "CRV";

/// The decimals of the CRV token
pub const TOKEN_DECIMALS: u64 = 18;

/// The initial whole-token supply of the CRV token, minted to the deployer
pub const TOKEN_INITIAL_SUPPLY: u64 = 1_000_000_000;

/// The name of the voting escrow token
pub const ESCROW_NAME: &str = "Voting-escrowed CRV";

/// The ticker symbol of the voting escrow token
pub const ESCROW_SYMBOL: &str = "veCRV";

/// The version string of the voting escrow contract
pub const ESCROW_VERSION: &str = "veCRV_0.99";

/// Address of the Aragon token manager which assumes control
/// of the CRV token after deployment
pub const TOKEN_MANAGER_ADDRESS: &str = "0x941A4d37eaC4fA7d4A2Bc68a2c8eA3a760D19039";

/// Addresses receiving an initial distribution of CRV
pub const DISTRIBUTION_ADDRESSES: [&str; 2] = [
    "0x33A4622B82D4c04a53e170c638B944ce27cffce3",
    "0x6cd85bbb9147b86201d882ae1068c67286855211",
];

/// Amount of CRV (with decimals) sent to each distribution address
pub const DISTRIBUTION_AMOUNT: u128 = 1_000_000 * 10u128.pow(18);

/// File the CRV token ABI is written to after deployment
pub const TOKEN_ABI_FILE: &str = "token_crv.abi";

/// File the voting escrow ABI is written to after deployment
pub const ESCROW_ABI_FILE: &str = "voting_escrow.abi";

/// Key in the deployments file under which the CRV token address is recorded
pub const TOKEN_CONTRACT_KEY: &str = "token_contract";

/// Key in the deployments file under which the voting escrow address is
/// recorded
pub const ESCROW_CONTRACT_KEY: &str = "voting_escrow_contract";

/// Top-level key in the deployments file under which all deployed addresses
/// are nested
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// File extension of compiled contract artifacts
pub const ARTIFACT_EXTENSION: &str = "json";

/// Lowercase markers in RPC error messages indicating that the node does not
/// (yet) recognize the transacting account.
///
/// Nodes which manage accounts out-of-band report a to-be-imported account
/// with one of these phrasings, in which case the transaction is safe to
/// retry.
pub const ACCOUNT_UNRECOGNIZED_MARKERS: [&str; 3] =
    ["unknown account", "account not found", "no key for given address"];

/// Number of times to poll for a transaction receipt before giving up
pub const RECEIPT_POLL_ATTEMPTS: usize = 10;

/// Interval in milliseconds between transaction receipt polls
pub const RECEIPT_POLL_INTERVAL_MS: u64 = 100;
