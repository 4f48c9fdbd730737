//! Utilities for the deploy scripts

use std::{fs, future::Future, path::Path, str::FromStr, time::Duration};

use alloy::{
    contract::{CallBuilder, CallDecoder, Error as ContractError},
    network::{Ethereum, TransactionBuilder},
    primitives::{Address, TxHash},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::{TransactionReceipt, TransactionRequest},
    signers::local::PrivateKeySigner,
    transports::{http::reqwest::Url, TransportError},
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    constants::{DEPLOYMENTS_KEY, RECEIPT_POLL_ATTEMPTS, RECEIPT_POLL_INTERVAL_MS},
    errors::ScriptError,
    types::DaoContract,
};

/// A client that signs transactions with the deployer key
pub type Wallet = DynProvider<Ethereum>;

/// A contract call builder using the scripts' client
pub type ScriptCallBuilder<'a, C> = CallBuilder<&'a Wallet, C, Ethereum>;

// -------------
// | Artifacts |
// -------------

/// A compiled contract artifact
#[derive(Deserialize)]
pub struct ContractArtifact {
    /// The contract ABI, a JSON array of entries
    pub abi: Value,
    /// The hex-encoded deployment bytecode
    pub bytecode: String,
}

impl ContractArtifact {
    /// Hex-decode the artifact's deployment bytecode
    pub fn deploy_code(&self) -> Result<Vec<u8>, ScriptError> {
        let bytecode = self.bytecode.trim_start_matches("0x");
        hex::decode(bytecode).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))
    }
}

/// Load a contract's compiled artifact from the artifacts directory
pub fn load_artifact(
    contract: DaoContract,
    artifacts_dir: &str,
) -> Result<ContractArtifact, ScriptError> {
    let path = contract.artifact_path(artifacts_dir);
    let file_contents =
        fs::read_to_string(&path).map_err(|e| ScriptError::ReadFile(e.to_string()))?;

    let artifact: ContractArtifact = serde_json::from_str(&file_contents)
        .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    if !artifact.abi.is_array() {
        return Err(ScriptError::ArtifactParsing(format!(
            "ABI is not an array in {}",
            path.display(),
        )));
    }

    Ok(artifact)
}

/// Write a contract's ABI array to the given file
pub fn write_abi_file(path: &str, abi: &Value) -> Result<(), ScriptError> {
    let file_contents = serde_json::to_string(abi).map_err(|e| ScriptError::Serde(e.to_string()))?;
    fs::write(path, file_contents).map_err(|e| ScriptError::WriteFile(e.to_string()))
}

// -------------------------
// | Client & Transactions |
// -------------------------

/// Build a client that signs with the given private key and targets the given
/// RPC URL
pub async fn setup_client(priv_key: &str, rpc_url: &str) -> Result<Wallet, ScriptError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let url =
        Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let provider = ProviderBuilder::new()
        .wallet(signer)
        .with_simple_nonce_management()
        .connect_http(url);

    Ok(DynProvider::new(provider))
}

/// Deploy a contract from its init code (deployment bytecode with the encoded
/// constructor arguments appended), returning the deployed address
pub async fn deploy_contract(client: &Wallet, init_code: Vec<u8>) -> Result<Address, ScriptError> {
    let tx = TransactionRequest::default().with_deploy_code(init_code);
    let pending = match client.send_transaction(tx).await {
        Ok(pending) => pending,
        Err(TransportError::ErrorResp(payload)) => {
            return Err(ScriptError::from_rpc_response(payload.message.to_string()));
        },
        Err(e) => return Err(ScriptError::ContractDeployment(e.to_string())),
    };

    let tx_hash = *pending.tx_hash();
    let receipt = wait_for_receipt(client, tx_hash).await?;
    if !receipt.status() {
        return Err(ScriptError::ContractDeployment(format!(
            "deploy tx reverted: {:#x}",
            receipt.transaction_hash,
        )));
    }

    receipt.contract_address.ok_or_else(|| {
        ScriptError::ContractDeployment("no contract address in receipt".to_string())
    })
}

/// Send a contract call as a transaction and await its receipt.
///
/// RPC error responses are classified so that callers may retry the
/// account-unrecognized ones; a reverted transaction is an error.
pub async fn send_tx<C>(tx: ScriptCallBuilder<'_, C>) -> Result<TransactionReceipt, ScriptError>
where
    C: CallDecoder,
{
    let pending = match tx.send().await {
        Ok(pending) => pending,
        Err(ContractError::TransportError(TransportError::ErrorResp(payload))) => {
            return Err(ScriptError::from_rpc_response(payload.message.to_string()));
        },
        Err(e) => return Err(ScriptError::ContractInteraction(e.to_string())),
    };

    let tx_hash = *pending.tx_hash();
    let receipt = wait_for_receipt(tx.provider, tx_hash).await?;
    if !receipt.status() {
        return Err(ScriptError::ContractInteraction(format!(
            "tx reverted: {:#x}",
            receipt.transaction_hash,
        )));
    }

    Ok(receipt)
}

/// Poll for a transaction's receipt until it is found or the poll attempts
/// are exhausted
async fn wait_for_receipt(
    client: &Wallet,
    tx_hash: TxHash,
) -> Result<TransactionReceipt, ScriptError> {
    for _ in 0..RECEIPT_POLL_ATTEMPTS {
        let maybe_receipt = client
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        if let Some(receipt) = maybe_receipt {
            return Ok(receipt);
        }

        tokio::time::sleep(Duration::from_millis(RECEIPT_POLL_INTERVAL_MS)).await;
    }

    Err(ScriptError::ContractInteraction(format!(
        "no receipt found for tx: {tx_hash:#x}",
    )))
}

/// Invoke a fallible operation repeatedly until the node recognizes the
/// transacting account.
///
/// The first `Ok` is returned unchanged. Only
/// [`ScriptError::AccountUnrecognized`] errors are retried, every other error
/// propagates immediately. There is no backoff and no attempt limit; the loop
/// spins until the node imports the account.
pub async fn retry_while_unrecognized<F, Fut, T>(mut f: F) -> Result<T, ScriptError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScriptError>>,
{
    loop {
        match f().await {
            Err(e) if e.is_account_unrecognized() => continue,
            res => return res,
        }
    }
}

// --------------------
// | Deployments file |
// --------------------

/// Parse the deployments file into a JSON value, defaulting to an empty
/// object if the file does not exist yet
fn get_json_from_file(file_path: &str) -> Result<Value, ScriptError> {
    if Path::new(file_path).exists() {
        let file_contents =
            fs::read_to_string(file_path).map_err(|e| ScriptError::ReadFile(e.to_string()))?;
        serde_json::from_str(&file_contents).map_err(|e| ScriptError::Serde(e.to_string()))
    } else {
        Ok(json!({}))
    }
}

/// Record a deployed contract address in the deployments file under the given
/// key, creating the file if it does not exist
pub fn write_deployed_address(
    file_path: &str,
    key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    let mut deployments = get_json_from_file(file_path)?;
    deployments[DEPLOYMENTS_KEY][key] = json!(format!("{address:#x}"));

    let file_contents = serde_json::to_string_pretty(&deployments)
        .map_err(|e| ScriptError::Serde(e.to_string()))?;
    fs::write(file_path, file_contents).map_err(|e| ScriptError::WriteFile(e.to_string()))
}

/// Read a deployed contract address from the deployments file
pub fn parse_addr_from_deployments_file(
    file_path: &str,
    key: &str,
) -> Result<Address, ScriptError> {
    let deployments = get_json_from_file(file_path)?;
    let addr_str = deployments[DEPLOYMENTS_KEY][key]
        .as_str()
        .ok_or_else(|| {
            ScriptError::ReadFile(format!("no `{key}` address in deployments file"))
        })?;

    Address::from_str(addr_str).map_err(|e| ScriptError::ReadFile(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        str::FromStr,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use alloy::primitives::Address;
    use serde_json::{json, Value};

    use super::{
        load_artifact, parse_addr_from_deployments_file, retry_while_unrecognized,
        write_abi_file, write_deployed_address, ContractArtifact,
    };
    use crate::{
        constants::{ESCROW_CONTRACT_KEY, TOKEN_CONTRACT_KEY},
        errors::ScriptError,
        types::DaoContract,
    };

    /// A successful operation is passed through after a single invocation
    #[tokio::test]
    async fn test_retry_passes_success_through() {
        let calls = AtomicUsize::new(0);
        let res = retry_while_unrecognized(|| {
            calls.fetch_add(1, Ordering::Relaxed);
            async { Ok(42) }
        })
        .await
        .unwrap();

        assert_eq!(res, 42);
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    /// Account-unrecognized errors are retried until the operation succeeds
    #[tokio::test]
    async fn test_retry_while_account_unrecognized() {
        const FAILURES: usize = 3;

        let calls = AtomicUsize::new(0);
        let res = retry_while_unrecognized(|| {
            let attempt = calls.fetch_add(1, Ordering::Relaxed);
            async move {
                if attempt < FAILURES {
                    Err(ScriptError::AccountUnrecognized("unknown account".to_string()))
                } else {
                    Ok(attempt)
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(res, FAILURES);
        assert_eq!(calls.load(Ordering::Relaxed), FAILURES + 1);
    }

    /// Any other error propagates without a second invocation
    #[tokio::test]
    async fn test_retry_propagates_other_errors() {
        let calls = AtomicUsize::new(0);
        let res: Result<(), ScriptError> = retry_while_unrecognized(|| {
            calls.fetch_add(1, Ordering::Relaxed);
            async { Err(ScriptError::ContractInteraction("execution reverted".to_string())) }
        })
        .await;

        assert!(matches!(res, Err(ScriptError::ContractInteraction(_))));
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    /// An artifact's ABI and bytecode are extracted, stripping the `0x` prefix
    /// from the bytecode
    #[test]
    fn test_artifact_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts_dir = dir.path().to_str().unwrap();
        let artifact_json = json!({
            "abi": [{"name": "transfer", "type": "function"}],
            "bytecode": "0xdeadbeef",
        });
        fs::write(
            DaoContract::Erc20Crv.artifact_path(artifacts_dir),
            artifact_json.to_string(),
        )
        .unwrap();

        let artifact = load_artifact(DaoContract::Erc20Crv, artifacts_dir).unwrap();
        assert_eq!(artifact.abi, artifact_json["abi"]);
        assert_eq!(artifact.deploy_code().unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    /// An artifact whose ABI is not a JSON array is rejected
    #[test]
    fn test_artifact_with_malformed_abi_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts_dir = dir.path().to_str().unwrap();
        let artifact_json = json!({"abi": {}, "bytecode": "0x00"});
        fs::write(
            DaoContract::Erc20Crv.artifact_path(artifacts_dir),
            artifact_json.to_string(),
        )
        .unwrap();

        let res = load_artifact(DaoContract::Erc20Crv, artifacts_dir);
        assert!(matches!(res, Err(ScriptError::ArtifactParsing(_))));
    }

    /// Non-hex bytecode is rejected when decoding
    #[test]
    fn test_malformed_bytecode_rejected() {
        let artifact = ContractArtifact {
            abi: json!([]),
            bytecode: "0xnothex".to_string(),
        };

        assert!(matches!(
            artifact.deploy_code(),
            Err(ScriptError::ArtifactParsing(_)),
        ));
    }

    /// The ABI file holds the artifact's ABI array verbatim
    #[test]
    fn test_write_abi_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token_crv.abi");
        let abi = json!([{"name": "transfer", "type": "function"}]);

        write_abi_file(path.to_str().unwrap(), &abi).unwrap();

        let written: Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, abi);
    }

    /// The deployments file is created on first write, and addresses
    /// round-trip through it
    #[test]
    fn test_deployments_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployments.json");
        let path_str = path.to_str().unwrap();

        let token = Address::from_str("0x33A4622B82D4c04a53e170c638B944ce27cffce3").unwrap();
        let escrow = Address::from_str("0x941A4d37eaC4fA7d4A2Bc68a2c8eA3a760D19039").unwrap();

        write_deployed_address(path_str, TOKEN_CONTRACT_KEY, token).unwrap();
        write_deployed_address(path_str, ESCROW_CONTRACT_KEY, escrow).unwrap();

        assert_eq!(
            parse_addr_from_deployments_file(path_str, TOKEN_CONTRACT_KEY).unwrap(),
            token,
        );
        assert_eq!(
            parse_addr_from_deployments_file(path_str, ESCROW_CONTRACT_KEY).unwrap(),
            escrow,
        );
    }

    /// Reading an address that was never recorded errors
    #[test]
    fn test_missing_deployment_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployments.json");

        let res = parse_addr_from_deployments_file(path.to_str().unwrap(), TOKEN_CONTRACT_KEY);
        assert!(matches!(res, Err(ScriptError::ReadFile(_))));
    }
}
