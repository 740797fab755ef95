use std::{fmt, str::FromStr};

use alloy_eips::eip4844::Bytes48;
use alloy_rpc_types_beacon::{BlsPublicKey, BlsSignature};
use ethereum_consensus::{
    bellatrix::mainnet::ExecutionPayloadHeader as BellatrixExecutionPayloadHeader,
    capella::mainnet::ExecutionPayloadHeader as CapellaExecutionPayloadHeader,
    deneb::mainnet::ExecutionPayloadHeader as DenebExecutionPayloadHeader,
    ssz::prelude::U256,
};
use pledge_primitives::InclusionProof;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// Consensus forks with a supported builder-bid shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidVersion {
    Bellatrix,
    Capella,
    Deneb,
}

impl BidVersion {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bellatrix => "bellatrix",
            Self::Capella => "capella",
            Self::Deneb => "deneb",
        }
    }
}

impl fmt::Display for BidVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BidVersion {
    type Err = BidCodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bellatrix" => Ok(Self::Bellatrix),
            "capella" => Ok(Self::Capella),
            "deneb" => Ok(Self::Deneb),
            other => Err(BidCodecError::UnsupportedVersion(other.to_owned())),
        }
    }
}

#[derive(Debug, Error)]
pub enum BidCodecError {
    #[error("unsupported bid version `{0}`")]
    UnsupportedVersion(String),

    /// The typed pass failed against the shape the discriminant implies.
    #[error("failed to decode {version} bid: {source}")]
    Decode {
        version: BidVersion,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BellatrixBuilderBid {
    pub header: BellatrixExecutionPayloadHeader,
    pub value: U256,
    pub pubkey: BlsPublicKey,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapellaBuilderBid {
    pub header: CapellaExecutionPayloadHeader,
    pub value: U256,
    pub pubkey: BlsPublicKey,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenebBuilderBid {
    pub header: DenebExecutionPayloadHeader,
    pub blob_kzg_commitments: Vec<Bytes48>,
    pub value: U256,
    pub pubkey: BlsPublicKey,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedBuilderBid<M> {
    pub message: M,
    pub signature: BlsSignature,
}

/// A builder's signed offer of a block, tagged by consensus fork. Exactly
/// one payload shape is populated.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionedSignedBuilderBid {
    Bellatrix(SignedBuilderBid<BellatrixBuilderBid>),
    Capella(SignedBuilderBid<CapellaBuilderBid>),
    Deneb(SignedBuilderBid<DenebBuilderBid>),
}

impl VersionedSignedBuilderBid {
    pub const fn version(&self) -> BidVersion {
        match self {
            Self::Bellatrix(_) => BidVersion::Bellatrix,
            Self::Capella(_) => BidVersion::Capella,
            Self::Deneb(_) => BidVersion::Deneb,
        }
    }
}

/// A versioned builder bid together with the inclusion proof for the
/// constraint transactions it claims to satisfy.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedSignedBuilderBidWithProofs {
    pub bid: VersionedSignedBuilderBid,
    pub proofs: Option<InclusionProof>,
}

#[derive(Serialize)]
struct WireEnvelope<'a, M> {
    version: BidVersion,
    data: WireData<'a, M>,
}

#[derive(Serialize)]
struct WireData<'a, M> {
    message: &'a M,
    signature: &'a BlsSignature,
    proofs: Option<&'a InclusionProof>,
}

/// First-pass view: only the discriminant and an envelope-level proof.
#[derive(Deserialize)]
struct Probe {
    version: String,
    #[serde(default)]
    proofs: Option<InclusionProof>,
}

#[derive(Deserialize)]
struct WireBody<M> {
    data: OwnedData<M>,
}

#[derive(Deserialize)]
struct OwnedData<M> {
    message: M,
    signature: BlsSignature,
    #[serde(default)]
    proofs: Option<InclusionProof>,
}

impl VersionedSignedBuilderBidWithProofs {
    /// Serializes to the wire envelope.
    ///
    /// `proofs` rides as a sibling of `message` and `signature` inside the
    /// per-version object (an explicit null when absent), so consumers that
    /// expect the plain versioned bid parse the output unchanged.
    pub fn to_json(&self) -> Result<Vec<u8>, BidCodecError> {
        match &self.bid {
            VersionedSignedBuilderBid::Bellatrix(bid) => self.encode(BidVersion::Bellatrix, bid),
            VersionedSignedBuilderBid::Capella(bid) => self.encode(BidVersion::Capella, bid),
            VersionedSignedBuilderBid::Deneb(bid) => self.encode(BidVersion::Deneb, bid),
        }
    }

    fn encode<M: Serialize>(
        &self,
        version: BidVersion,
        bid: &SignedBuilderBid<M>,
    ) -> Result<Vec<u8>, BidCodecError> {
        Ok(serde_json::to_vec(&WireEnvelope {
            version,
            data: WireData {
                message: &bid.message,
                signature: &bid.signature,
                proofs: self.proofs.as_ref(),
            },
        })?)
    }

    /// Two-pass decode.
    ///
    /// A shallow probe commits to a version first (and picks up the
    /// envelope-level proof placement some producers use); the full input is
    /// then re-parsed against the shape the discriminant implies. Once a
    /// discriminant is read there is no fallback to another version.
    pub fn from_json(input: &[u8]) -> Result<Self, BidCodecError> {
        let probe: Probe = serde_json::from_slice(input)?;
        let version: BidVersion = probe.version.parse()?;

        let (bid, nested_proofs) = match version {
            BidVersion::Bellatrix => {
                let data = parse_data::<BellatrixBuilderBid>(input, version)?;
                (
                    VersionedSignedBuilderBid::Bellatrix(SignedBuilderBid {
                        message: data.message,
                        signature: data.signature,
                    }),
                    data.proofs,
                )
            }
            BidVersion::Capella => {
                let data = parse_data::<CapellaBuilderBid>(input, version)?;
                (
                    VersionedSignedBuilderBid::Capella(SignedBuilderBid {
                        message: data.message,
                        signature: data.signature,
                    }),
                    data.proofs,
                )
            }
            BidVersion::Deneb => {
                let data = parse_data::<DenebBuilderBid>(input, version)?;
                (
                    VersionedSignedBuilderBid::Deneb(SignedBuilderBid {
                        message: data.message,
                        signature: data.signature,
                    }),
                    data.proofs,
                )
            }
        };

        // The nested placement is this encoder's own; it wins over the
        // envelope-level one when both are present.
        Ok(Self { bid, proofs: nested_proofs.or(probe.proofs) })
    }
}

fn parse_data<M: DeserializeOwned>(
    input: &[u8],
    version: BidVersion,
) -> Result<OwnedData<M>, BidCodecError> {
    let body: WireBody<M> =
        serde_json::from_slice(input).map_err(|source| BidCodecError::Decode { version, source })?;
    Ok(body.data)
}

impl fmt::Display for VersionedSignedBuilderBidWithProofs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json() {
            Ok(json) => f.write_str(&String::from_utf8_lossy(&json)),
            Err(err) => write!(f, "{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::B256;
    use pledge_primitives::Multiproof;

    use super::*;

    fn sample_proof() -> InclusionProof {
        let mut proof = InclusionProof::from_multiproof(&Multiproof {
            hashes: vec![vec![0xaa; 32], vec![0xbb; 32]],
            indices: vec![10, 11],
            leaves: vec![],
        });
        proof.transaction_hashes = vec![B256::repeat_byte(0x01), B256::repeat_byte(0x02)];
        proof
    }

    fn bellatrix_bid() -> VersionedSignedBuilderBid {
        VersionedSignedBuilderBid::Bellatrix(SignedBuilderBid {
            message: BellatrixBuilderBid {
                pubkey: BlsPublicKey::repeat_byte(0x42),
                ..Default::default()
            },
            signature: BlsSignature::repeat_byte(0x24),
        })
    }

    fn capella_bid() -> VersionedSignedBuilderBid {
        VersionedSignedBuilderBid::Capella(SignedBuilderBid {
            message: CapellaBuilderBid {
                pubkey: BlsPublicKey::repeat_byte(0x42),
                ..Default::default()
            },
            signature: BlsSignature::repeat_byte(0x24),
        })
    }

    fn deneb_bid() -> VersionedSignedBuilderBid {
        VersionedSignedBuilderBid::Deneb(SignedBuilderBid {
            message: DenebBuilderBid {
                blob_kzg_commitments: vec![Bytes48::ZERO],
                pubkey: BlsPublicKey::repeat_byte(0x42),
                ..Default::default()
            },
            signature: BlsSignature::repeat_byte(0x24),
        })
    }

    #[test]
    fn test_round_trip_per_version() -> eyre::Result<()> {
        for bid in [bellatrix_bid(), capella_bid(), deneb_bid()] {
            for proofs in [None, Some(sample_proof())] {
                let envelope =
                    VersionedSignedBuilderBidWithProofs { bid: bid.clone(), proofs };
                let decoded =
                    VersionedSignedBuilderBidWithProofs::from_json(&envelope.to_json()?)?;
                assert_eq!(decoded, envelope);
            }
        }
        Ok(())
    }

    #[test]
    fn test_wire_placement_of_proofs() -> eyre::Result<()> {
        let envelope = VersionedSignedBuilderBidWithProofs {
            bid: deneb_bid(),
            proofs: Some(sample_proof()),
        };
        let value: serde_json::Value = serde_json::from_slice(&envelope.to_json()?)?;

        assert_eq!(value["version"], "deneb");
        assert!(value["data"]["message"].is_object());
        assert!(value["data"]["signature"].is_string());
        assert!(value["data"]["proofs"].is_object());
        assert_eq!(value["data"]["proofs"]["generalized_indexes"][0], 10);
        Ok(())
    }

    #[test]
    fn test_absent_proofs_are_an_explicit_null() -> eyre::Result<()> {
        let envelope = VersionedSignedBuilderBidWithProofs { bid: capella_bid(), proofs: None };
        let value: serde_json::Value = serde_json::from_slice(&envelope.to_json()?)?;

        let data = value["data"].as_object().expect("data object");
        assert!(data.contains_key("proofs"));
        assert!(data["proofs"].is_null());
        Ok(())
    }

    #[test]
    fn test_plain_consumers_parse_the_augmented_bid() -> eyre::Result<()> {
        #[derive(Deserialize)]
        struct PlainEnvelope {
            version: String,
            data: PlainBid,
        }
        #[derive(Deserialize)]
        struct PlainBid {
            message: DenebBuilderBid,
            signature: BlsSignature,
        }

        let envelope = VersionedSignedBuilderBidWithProofs {
            bid: deneb_bid(),
            proofs: Some(sample_proof()),
        };
        let plain: PlainEnvelope = serde_json::from_slice(&envelope.to_json()?)?;
        assert_eq!(plain.version, "deneb");
        assert_eq!(plain.data.message.pubkey, BlsPublicKey::repeat_byte(0x42));
        assert_eq!(plain.data.signature, BlsSignature::repeat_byte(0x24));
        Ok(())
    }

    #[test]
    fn test_envelope_level_proofs_are_accepted() -> eyre::Result<()> {
        let message = CapellaBuilderBid::default();
        let proofs = sample_proof();
        let producer_variant = serde_json::json!({
            "version": "capella",
            "proofs": serde_json::to_value(&proofs)?,
            "data": {
                "message": serde_json::to_value(&message)?,
                "signature": BlsSignature::default(),
            },
        });

        let decoded = VersionedSignedBuilderBidWithProofs::from_json(
            &serde_json::to_vec(&producer_variant)?,
        )?;
        assert_eq!(decoded.proofs, Some(proofs));
        assert_eq!(decoded.bid.version(), BidVersion::Capella);
        Ok(())
    }

    #[test]
    fn test_unknown_version_is_rejected() -> eyre::Result<()> {
        let input = serde_json::json!({
            "version": "electra",
            "data": {
                "message": {},
                "signature": BlsSignature::default(),
            },
        });
        let err = VersionedSignedBuilderBidWithProofs::from_json(&serde_json::to_vec(&input)?)
            .unwrap_err();
        assert!(matches!(err, BidCodecError::UnsupportedVersion(v) if v == "electra"));
        Ok(())
    }

    #[test]
    fn test_typed_pass_failure_names_the_version() -> eyre::Result<()> {
        let input = serde_json::json!({
            "version": "deneb",
            "data": { "message": {} },
        });
        let err = VersionedSignedBuilderBidWithProofs::from_json(&serde_json::to_vec(&input)?)
            .unwrap_err();
        assert!(matches!(err, BidCodecError::Decode { version: BidVersion::Deneb, .. }));
        Ok(())
    }

    #[test]
    fn test_garbage_input_fails_the_probe() {
        assert!(matches!(
            VersionedSignedBuilderBidWithProofs::from_json(b"not json"),
            Err(BidCodecError::Json(_))
        ));
    }
}
