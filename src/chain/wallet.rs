//! Operator wallet: key loading and the transaction-signing identity.
//!
//! # Security
//! - The key is read from the environment or the config file, never logged
//! - Only the derived address and a signing handle are exposed

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::chain::types::{ChainError, ChainResult};

/// Environment variable that overrides the configured operator key.
pub const OPERATOR_KEY_ENV_VAR: &str = "FAUCET_OPERATOR_KEY";

/// The single signing keypair all disbursements are drawn from.
#[derive(Clone)]
pub struct OperatorWallet {
    signer: PrivateKeySigner,
}

impl OperatorWallet {
    /// Parse a hex-encoded private key (0x prefix optional).
    pub fn from_hex(private_key_hex: &str) -> ChainResult<Self> {
        let key_hex = private_key_hex
            .strip_prefix("0x")
            .unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| ChainError::Wallet(format!("invalid private key: {e}")))?;

        tracing::info!(address = %signer.address(), "operator wallet initialized");

        Ok(Self { signer })
    }

    /// Load the key from `FAUCET_OPERATOR_KEY`, falling back to the value
    /// from the config file.
    pub fn load(configured: Option<&str>) -> ChainResult<Self> {
        if let Ok(key) = std::env::var(OPERATOR_KEY_ENV_VAR) {
            return Self::from_hex(&key);
        }
        match configured {
            Some(key) => Self::from_hex(key),
            None => Err(ChainError::Wallet(format!(
                "no operator key configured: set {OPERATOR_KEY_ENV_VAR} or chain.private_key"
            ))),
        }
    }

    /// Operator address derived from the signing key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Signing handle for transaction building.
    pub fn network_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}

impl std::fmt::Debug for OperatorWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // key material stays out of Debug output
        f.debug_struct("OperatorWallet")
            .field("address", &self.address())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_wallet_from_hex() {
        let wallet = OperatorWallet::from_hex(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_wallet_with_0x_prefix() {
        let wallet = OperatorWallet::from_hex(&format!("0x{TEST_PRIVATE_KEY}")).unwrap();
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_invalid_private_key() {
        let result = OperatorWallet::from_hex("invalid_key");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid private key"));
    }

    #[test]
    fn test_debug_hides_key_material() {
        let wallet = OperatorWallet::from_hex(TEST_PRIVATE_KEY).unwrap();
        let rendered = format!("{wallet:?}");
        assert!(rendered.contains("0x"));
        assert!(!rendered.to_lowercase().contains(&TEST_PRIVATE_KEY[..16]));
    }
}
