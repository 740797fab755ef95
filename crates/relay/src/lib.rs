mod bid;
mod cache;
mod normalize;
#[cfg(test)]
mod test_util;

pub use bid::{
    BellatrixBuilderBid, BidCodecError, BidVersion, CapellaBuilderBid, DenebBuilderBid,
    SignedBuilderBid, VersionedSignedBuilderBid, VersionedSignedBuilderBidWithProofs,
};
pub use cache::{
    ConstraintsCache, ConstraintsCacheError, TransactionHashMap, DEFAULT_SLOT_CAPACITY,
};
pub use normalize::normalize_transaction;
