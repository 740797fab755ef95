use std::fmt;

use alloy_rpc_types_beacon::{BlsPublicKey, BlsSignature};
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};

/// Action discriminant carried by a [`Delegation`] message.
pub const DELEGATION_ACTION: u8 = 0x00;
/// Action discriminant carried by a [`Revocation`] message.
pub const REVOCATION_ACTION: u8 = 0x01;

/// Message authorizing `delegatee_pubkey` to submit constraints on behalf of
/// `validator_pubkey`. Pure data shape; authorization semantics live with
/// the caller.
#[derive(Debug, Clone, Serialize, Eq, PartialEq, Deserialize, Encode, Decode)]
pub struct Delegation {
    pub action: u8,
    pub validator_pubkey: BlsPublicKey,
    pub delegatee_pubkey: BlsPublicKey,
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq, Deserialize, Encode, Decode)]
pub struct SignedDelegation {
    pub message: Delegation,
    pub signature: BlsSignature,
}

/// Message withdrawing a delegatee's authority to submit constraints.
#[derive(Debug, Clone, Serialize, Eq, PartialEq, Deserialize, Encode, Decode)]
pub struct Revocation {
    pub action: u8,
    pub validator_pubkey: BlsPublicKey,
    pub delegatee_pubkey: BlsPublicKey,
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq, Deserialize, Encode, Decode)]
pub struct SignedRevocation {
    pub message: Revocation,
    pub signature: BlsSignature,
}

impl fmt::Display for SignedDelegation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::display_json(self, f)
    }
}

impl fmt::Display for SignedRevocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::display_json(self, f)
    }
}
