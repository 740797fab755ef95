use alloy_consensus::{Signed, TxEip4844Variant, TxEnvelope};
use alloy_eips::eip2718::{Decodable2718, Eip2718Result, Encodable2718};
use alloy_primitives::{Bytes, TxHash};

/// Decodes a raw transaction, strips any blob sidecar, and returns the
/// canonical hash together with the re-encoded bytes.
///
/// Normalization is idempotent: two encodings that differ only in the
/// sidecar map to the same hash and the same bytes.
pub fn normalize_transaction(raw: &[u8]) -> Eip2718Result<(TxHash, Bytes)> {
    let envelope = strip_blob_sidecar(TxEnvelope::decode_2718(&mut &raw[..])?);
    let hash = *envelope.tx_hash();
    Ok((hash, envelope.encoded_2718().into()))
}

/// Rewrites an EIP-4844 envelope to its sidecar-less form. The transaction
/// hash does not cover the sidecar, so the signed hash is reused as is.
fn strip_blob_sidecar(envelope: TxEnvelope) -> TxEnvelope {
    match envelope {
        TxEnvelope::Eip4844(signed) => {
            let (variant, signature, hash) = signed.into_parts();
            let tx = match variant {
                TxEip4844Variant::TxEip4844WithSidecar(with_sidecar) => with_sidecar.tx,
                TxEip4844Variant::TxEip4844(tx) => tx,
            };
            TxEnvelope::Eip4844(Signed::new_unchecked(
                TxEip4844Variant::TxEip4844(tx),
                signature,
                hash,
            ))
        }
        other => other,
    }
}
