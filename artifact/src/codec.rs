//! Versioned binary codec for transaction artifacts.
//!
//! Wire layout: a 4-byte magic, a little-endian u16 format version, then the
//! bincode-serialized [`TransactionArtifact`]. The codec is pure: it maps
//! between byte buffers and artifacts and performs no file or network I/O;
//! the caller owns reading and writing the file.
//!
//! `decode(encode(x)) == x` for every well-formed artifact `x`.

use std::io::Cursor;

use crate::error::DecodeError;
use crate::TransactionArtifact;

/// File magic, first four bytes of every artifact file.
pub const MAGIC: [u8; 4] = *b"WSPX";

/// Current artifact format version. Bumped on any wire-incompatible change;
/// decoding refuses every other version.
pub const CODEC_VERSION: u16 = 1;

/// Header size: magic + version.
const HEADER_LEN: usize = 6;

/// Serialize an artifact to its portable byte form.
pub fn encode(artifact: &TransactionArtifact) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + 256);
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&CODEC_VERSION.to_le_bytes());
    bincode::serialize_into(&mut out, artifact)
        .expect("artifact serialization into a Vec cannot fail");
    out
}

/// Deserialize an artifact from bytes.
pub fn decode(bytes: &[u8]) -> Result<TransactionArtifact, DecodeError> {
    if bytes.len() < HEADER_LEN {
        return Err(DecodeError::Truncated);
    }
    if bytes[..4] != MAGIC {
        return Err(DecodeError::Malformed("bad magic".into()));
    }
    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != CODEC_VERSION {
        return Err(DecodeError::VersionMismatch {
            found: version,
            supported: CODEC_VERSION,
        });
    }

    let body = &bytes[HEADER_LEN..];
    let mut cursor = Cursor::new(body);
    let artifact: TransactionArtifact =
        bincode::deserialize_from(&mut cursor).map_err(map_bincode_error)?;

    // A well-formed file contains exactly one artifact and nothing after it.
    if (cursor.position() as usize) != body.len() {
        return Err(DecodeError::Malformed(format!(
            "{} trailing bytes after artifact body",
            body.len() - cursor.position() as usize
        )));
    }
    Ok(artifact)
}

fn map_bincode_error(err: bincode::Error) -> DecodeError {
    match *err {
        bincode::ErrorKind::Io(ref io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
            DecodeError::Truncated
        }
        ref other => DecodeError::Malformed(other.to_string()),
    }
}
