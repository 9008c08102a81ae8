use proptest::collection::vec;
use proptest::prelude::*;

use wisp_artifact::{
    codec, DecodeError, Input, KernelFeatures, Output, SlateTrailer, Transaction,
    TransactionArtifact, TxKernel,
};
use wisp_types::{ArtifactId, Commitment, KernelSignature, NetworkId};

fn commitment() -> impl Strategy<Value = Commitment> {
    prop::array::uniform32(0u8..).prop_map(Commitment::new)
}

fn signature() -> impl Strategy<Value = KernelSignature> {
    (prop::array::uniform32(0u8..), prop::array::uniform32(0u8..)).prop_map(|(a, b)| {
        let mut raw = [0u8; 64];
        raw[..32].copy_from_slice(&a);
        raw[32..].copy_from_slice(&b);
        KernelSignature(raw)
    })
}

fn features() -> impl Strategy<Value = KernelFeatures> {
    prop_oneof![
        Just(KernelFeatures::Plain),
        any::<u64>().prop_map(|lock_height| KernelFeatures::HeightLocked { lock_height }),
    ]
}

fn kernel() -> impl Strategy<Value = TxKernel> {
    (features(), any::<u64>(), commitment(), signature()).prop_map(
        |(features, fee, excess, signature)| TxKernel {
            features,
            fee,
            excess,
            signature,
        },
    )
}

fn network() -> impl Strategy<Value = NetworkId> {
    prop_oneof![
        Just(NetworkId::Main),
        Just(NetworkId::Test),
        Just(NetworkId::Dev)
    ]
}

fn artifact() -> impl Strategy<Value = TransactionArtifact> {
    (
        prop::array::uniform16(0u8..),
        network(),
        vec(commitment().prop_map(|commit| Input { commit }), 1..4),
        vec(commitment().prop_map(|commit| Output { commit }), 1..4),
        vec(kernel(), 1..3),
        prop::option::of((any::<u16>(), any::<u8>()).prop_map(
            |(slate_version, num_participants)| SlateTrailer {
                slate_version,
                num_participants,
            },
        )),
    )
        .prop_map(|(id_bytes, network, inputs, outputs, kernels, slate)| {
            TransactionArtifact {
                id: ArtifactId::new(uuid::Uuid::from_bytes(id_bytes)),
                network,
                tx: Transaction {
                    inputs,
                    outputs,
                    kernels,
                },
                slate,
            }
        })
}

proptest! {
    /// decode(encode(x)) == x for every well-formed artifact.
    #[test]
    fn encode_decode_roundtrip(a in artifact()) {
        let bytes = codec::encode(&a);
        prop_assert_eq!(codec::decode(&bytes).unwrap(), a);
    }

    /// Every strict prefix of an encoded artifact fails to decode.
    #[test]
    fn prefixes_never_decode(a in artifact(), frac in 0.0f64..1.0) {
        let bytes = codec::encode(&a);
        let cut = ((bytes.len() - 1) as f64 * frac) as usize;
        prop_assert!(codec::decode(&bytes[..cut]).is_err());
    }

    /// Unsupported versions are reported as VersionMismatch, whatever the body.
    #[test]
    fn foreign_versions_rejected(a in artifact(), version in 2u16..) {
        let mut bytes = codec::encode(&a);
        bytes[4..6].copy_from_slice(&version.to_le_bytes());
        prop_assert_eq!(
            codec::decode(&bytes),
            Err(DecodeError::VersionMismatch { found: version, supported: codec::CODEC_VERSION })
        );
    }
}
