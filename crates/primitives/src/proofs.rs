use std::fmt;

use alloy_primitives::TxHash;
use serde::{Deserialize, Serialize};

use crate::hex_bytes::HexBytes;

/// Parallel output sequences of a Merkle multiproof computation over the
/// payload's transaction list, as produced by the ssz proving backend.
#[derive(Debug, Clone, Default)]
pub struct Multiproof {
    /// Sibling hashes, in proving order.
    pub hashes: Vec<Vec<u8>>,
    /// Generalized index of each proven node, in lock-step with `hashes`.
    pub indices: Vec<u64>,
    /// The proven leaves themselves.
    pub leaves: Vec<Vec<u8>>,
}

/// Merkle multiproof that a set of transactions are leaves of the payload's
/// transaction root, keyed by their canonical hashes.
///
/// `generalized_indexes` and `merkle_hashes` come from a single multiproof
/// computation and stay in lock-step order. `transaction_hashes` corresponds
/// one-to-one, in order, with the proven leaves.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionProof {
    pub transaction_hashes: Vec<TxHash>,
    pub generalized_indexes: Vec<u64>,
    pub merkle_hashes: Vec<HexBytes>,
}

impl InclusionProof {
    /// Converts a backend multiproof into the wire shape.
    ///
    /// The backend does not know which semantic transaction hash belongs to
    /// which leaf, so `transaction_hashes` is left empty for the caller to
    /// fill from its constraints lookup. Leaves are dropped: the verifier
    /// recomputes them from the transactions it resolves by hash.
    pub fn from_multiproof(multiproof: &Multiproof) -> Self {
        Self {
            transaction_hashes: Vec::new(),
            generalized_indexes: multiproof.indices.clone(),
            merkle_hashes: multiproof
                .hashes
                .iter()
                .map(|hash| HexBytes::from(hash.as_slice()))
                .collect(),
        }
    }
}

impl fmt::Display for InclusionProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::display_json(self, f)
    }
}
