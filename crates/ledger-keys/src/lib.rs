//! secp256k1 key pairs and the addresses derived from them.
//!
//! An address is the lowercase hex SHA-256 of the uncompressed (65 byte)
//! public key.
use ledger_core::AddressProvider;
use once_cell::sync::Lazy;
use secp256k1::{constants::SECRET_KEY_SIZE, All, PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

static SECP256K1_CONTEXT: Lazy<Secp256k1<All>> = Lazy::new(Secp256k1::new);

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("secret key must be 32 bytes, got {0}")]
    SecretKeyLength(usize),
    #[error("invalid secret key: {0}")]
    InvalidSecretKey(#[from] secp256k1::Error),
}

#[derive(Debug, Clone)]
pub struct KeyPair {
    secret_key: SecretKey,
    public_key: PublicKey,
}

impl KeyPair {
    pub fn generate() -> Self {
        let (secret_key, public_key) =
            SECP256K1_CONTEXT.generate_keypair(&mut secp256k1::rand::thread_rng());
        Self {
            secret_key,
            public_key,
        }
    }

    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != SECRET_KEY_SIZE {
            return Err(KeyError::SecretKeyLength(bytes.len()));
        }
        let secret_key = SecretKey::from_slice(bytes)?;
        let public_key = PublicKey::from_secret_key(&SECP256K1_CONTEXT, &secret_key);
        Ok(Self {
            secret_key,
            public_key,
        })
    }

    pub fn public_key_uncompressed(&self) -> [u8; 65] {
        self.public_key.serialize_uncompressed()
    }

    pub fn secret_bytes(&self) -> [u8; SECRET_KEY_SIZE] {
        self.secret_key.secret_bytes()
    }

    pub fn address(&self) -> String {
        hex::encode(Sha256::digest(self.public_key_uncompressed()))
    }
}

/// Produces a fresh key pair per call and returns its address.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyPairAddressProvider;

impl AddressProvider for KeyPairAddressProvider {
    type Error = KeyError;

    fn address(&self) -> Result<String, KeyError> {
        let address = KeyPair::generate().address();
        debug!(%address, "generated address");
        Ok(address)
    }
}
