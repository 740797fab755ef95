use alloy_consensus::{
    SignableTransaction, TxEip1559, TxEip4844, TxEip4844Variant, TxEip4844WithSidecar, TxEnvelope,
};
use alloy_eips::eip4844::{Blob, BlobTransactionSidecar, Bytes48};
use alloy_primitives::{Address, Bytes, TxKind, B256, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;

pub(crate) fn test_signer() -> PrivateKeySigner {
    "0x84286521b97e7c10916857c307553e30a9defd100e893e96fc8aad42336a4ab3"
        .parse()
        .expect("valid test key")
}

pub(crate) fn signed_eip1559(signer: &PrivateKeySigner, nonce: u64) -> TxEnvelope {
    let tx = TxEip1559 {
        chain_id: 1,
        nonce,
        gas_limit: 21_000,
        max_fee_per_gas: 20_000_000_000,
        max_priority_fee_per_gas: 1_000_000_000,
        to: TxKind::Call(Address::ZERO),
        value: U256::from(100),
        access_list: Default::default(),
        input: Bytes::new(),
    };
    let signature = signer.sign_hash_sync(&tx.signature_hash()).expect("signing");
    TxEnvelope::Eip1559(tx.into_signed(signature))
}

pub(crate) fn signed_eip4844(signer: &PrivateKeySigner, with_sidecar: bool) -> TxEnvelope {
    let sidecar =
        BlobTransactionSidecar::new(vec![Blob::ZERO], vec![Bytes48::ZERO], vec![Bytes48::ZERO]);
    let tx = TxEip4844 {
        chain_id: 1,
        nonce: 0,
        gas_limit: 21_000,
        max_fee_per_gas: 20_000_000_000,
        max_priority_fee_per_gas: 1_000_000_000,
        to: Address::ZERO,
        value: U256::ZERO,
        access_list: Default::default(),
        blob_versioned_hashes: vec![B256::repeat_byte(0x01)],
        max_fee_per_blob_gas: 1,
        input: Bytes::new(),
    };
    let variant = if with_sidecar {
        TxEip4844Variant::TxEip4844WithSidecar(TxEip4844WithSidecar { tx, sidecar })
    } else {
        TxEip4844Variant::TxEip4844(tx)
    };
    let signature = signer.sign_hash_sync(&variant.signature_hash()).expect("signing");
    TxEnvelope::Eip4844(variant.into_signed(signature))
}
