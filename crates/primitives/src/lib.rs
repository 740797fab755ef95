mod constraints;
mod delegation;
mod hex_bytes;
mod proofs;

pub use constraints::{BatchedSignedConstraints, ConstraintsMessage, SignedConstraints};
pub use delegation::{
    Delegation, Revocation, SignedDelegation, SignedRevocation, DELEGATION_ACTION,
    REVOCATION_ACTION,
};
pub use hex_bytes::{HexBytes, InvalidHexEncoding};
pub use proofs::{InclusionProof, Multiproof};

/// Renders `value` as its JSON wire form, falling back to the error text.
pub(crate) fn display_json<T: serde::Serialize>(
    value: &T,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    match serde_json::to_string(value) {
        Ok(json) => f.write_str(&json),
        Err(err) => write!(f, "{err}"),
    }
}
