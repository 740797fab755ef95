use std::fmt;

use alloy_consensus::TxEnvelope;
use alloy_eips::eip2718::{Decodable2718, Eip2718Result};
use alloy_primitives::Bytes;
use alloy_rpc_types_beacon::{BlsPublicKey, BlsSignature};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use ssz_derive::{Decode, Encode};

/// Batch of signed constraints as submitted by a proposer or its delegate.
pub type BatchedSignedConstraints = Vec<SignedConstraints>;

/// A proposer's binding promise that the listed transactions are included in
/// its slot's block, signed with the proposer (or delegatee) BLS key.
///
/// Signature validity is established by the caller; this type only carries
/// the wire shape.
#[derive(Debug, Clone, Serialize, Eq, PartialEq, Deserialize, Encode, Decode)]
pub struct SignedConstraints {
    pub message: ConstraintsMessage,
    pub signature: BlsSignature,
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq, Deserialize, Encode, Decode)]
pub struct ConstraintsMessage {
    pub pubkey: BlsPublicKey,
    pub slot: u64,
    /// Whether the listed transactions must occupy the top of the block.
    pub top: bool,
    pub transactions: Vec<Bytes>,
}

impl ConstraintsMessage {
    /// Returns the digest of this message.
    ///
    /// Transactions contribute through their canonical hash, so two messages
    /// whose transactions differ only in blob sidecars digest identically.
    pub fn digest(&self) -> Eip2718Result<[u8; 32]> {
        let mut hasher = Sha256::new();
        hasher.update(self.pubkey);
        hasher.update(self.slot.to_le_bytes());
        hasher.update((self.top as u8).to_le_bytes());

        for bytes in &self.transactions {
            let tx = TxEnvelope::decode_2718(&mut bytes.as_ref())?;
            hasher.update(tx.tx_hash());
        }

        Ok(hasher.finalize().into())
    }
}

impl fmt::Display for SignedConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::display_json(self, f)
    }
}

impl fmt::Display for ConstraintsMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::display_json(self, f)
    }
}
