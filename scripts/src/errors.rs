//! Error types for the deploy scripts

use std::{error::Error, fmt::Display};

use crate::constants::ACCOUNT_UNRECOGNIZED_MARKERS;

/// Errors that can occur during the deploy & administration scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error reading from a file
    ReadFile(String),
    /// Error writing to a file
    WriteFile(String),
    /// Error parsing a compiled contract artifact
    ArtifactParsing(String),
    /// Error constructing contract deployment calldata
    CalldataConstruction(String),
    /// The RPC node does not (yet) recognize the transacting account
    AccountUnrecognized(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error interacting with a contract
    ContractInteraction(String),
    /// Error de/serializing JSON
    Serde(String),
}

impl ScriptError {
    /// Classify an RPC error response message, separating the transient
    /// account-unrecognized responses from genuine interaction failures
    pub fn from_rpc_response(message: String) -> Self {
        if message_is_account_unrecognized(&message) {
            ScriptError::AccountUnrecognized(message)
        } else {
            ScriptError::ContractInteraction(message)
        }
    }

    /// Whether the error is an account-unrecognized RPC response
    pub fn is_account_unrecognized(&self) -> bool {
        matches!(self, ScriptError::AccountUnrecognized(_))
    }
}

/// Whether an RPC error message indicates that the node does not recognize
/// the transacting account.
///
/// Nodes phrase this differently, so we match case-insensitively against the
/// known markers.
fn message_is_account_unrecognized(message: &str) -> bool {
    let message = message.to_lowercase();
    ACCOUNT_UNRECOGNIZED_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptError::ClientInitialization(s) => {
                write!(f, "error initializing client: {}", s)
            },
            ScriptError::ReadFile(s) => write!(f, "error reading file: {}", s),
            ScriptError::WriteFile(s) => write!(f, "error writing file: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::CalldataConstruction(s) => {
                write!(f, "error constructing calldata: {}", s)
            },
            ScriptError::AccountUnrecognized(s) => {
                write!(f, "account not recognized by node: {}", s)
            },
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            },
            ScriptError::Serde(s) => write!(f, "de/serialization error: {}", s),
        }
    }
}

impl Error for ScriptError {}

#[cfg(test)]
mod tests {
    use super::ScriptError;

    /// Each known node phrasing for an unfunded or unimported account maps to
    /// [`ScriptError::AccountUnrecognized`], regardless of casing
    #[test]
    fn test_account_unrecognized_markers() {
        let messages = [
            "unknown account",
            "Account not found",
            "No key for given address or file",
        ];

        for message in messages {
            let err = ScriptError::from_rpc_response(message.to_string());
            assert!(
                err.is_account_unrecognized(),
                "message not classified as transient: {message}",
            );
        }
    }

    /// Any other RPC error maps to [`ScriptError::ContractInteraction`]
    #[test]
    fn test_other_rpc_errors_are_not_transient() {
        let err = ScriptError::from_rpc_response("execution reverted".to_string());

        assert!(!err.is_account_unrecognized());
        assert!(matches!(err, ScriptError::ContractInteraction(_)));
    }
}
