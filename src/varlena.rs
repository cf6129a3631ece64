//! Stored-form headers for variable-length values.
//!
//! A variable-length datum on disk is a length header followed by the
//! logical bytes. Two inline layouts exist: a 1-byte header for short values
//! and a 4-byte header for everything else. Compressed and out-of-line forms
//! are owned by the storage layer; if one reaches this module it is an error,
//! never a silent wrong hash. Hashing always covers the logical bytes only,
//! so the same content hashes identically under either inline layout.
//!
//! Header discrimination, little-endian:
//! - first byte `0x01`: out-of-line pointer, not materializable here
//! - first byte odd (and not `0x01`): short form; the byte holds
//!   `total_len << 1 | 1`, total length counted header-inclusive, max 127
//! - first byte even: 4-byte header word `total_len << 2 | flags`; flag bit
//!   `0x02` marks a compressed payload

use thiserror::Error;

/// Size of the 4-byte full header.
pub const VARHDRSZ: usize = 4;
/// Size of the 1-byte short header.
pub const VARHDRSZ_SHORT: usize = 1;
/// Largest body that fits the short layout.
pub const VARLENA_SHORT_MAX: usize = 127 - VARHDRSZ_SHORT;

const OUT_OF_LINE_MARKER: u8 = 0x01;
const COMPRESSED_FLAG: u32 = 0x02;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VarlenaError {
    /// The datum is shorter than its header claims, or too short to carry a
    /// header at all.
    #[error("varlena datum shorter than its header claims")]
    Truncated,
    /// A compressed payload reached the hash layer. The storage layer must
    /// decompress to raw bytes first; hashing the compressed image would
    /// break equal-value-equal-hash.
    #[error("compressed varlena reached the hash layer; materialize it first")]
    Compressed,
    /// An out-of-line pointer reached the hash layer.
    #[error("out-of-line varlena reached the hash layer; materialize it first")]
    OutOfLine,
    /// The body does not fit the requested layout.
    #[error("varlena body of {0} bytes does not fit the layout")]
    Oversize(usize),
}

/// Extract the logical byte span of a stored varlena datum, header and
/// padding excluded. Borrows; never copies.
pub fn body(datum: &[u8]) -> Result<&[u8], VarlenaError> {
    let &first = datum.first().ok_or(VarlenaError::Truncated)?;
    if first == OUT_OF_LINE_MARKER {
        return Err(VarlenaError::OutOfLine);
    }
    if first & 0x01 == 0x01 {
        let total = (first >> 1) as usize;
        if total < VARHDRSZ_SHORT || total > datum.len() {
            return Err(VarlenaError::Truncated);
        }
        return Ok(&datum[VARHDRSZ_SHORT..total]);
    }
    if datum.len() < VARHDRSZ {
        return Err(VarlenaError::Truncated);
    }
    let word = u32::from_le_bytes([datum[0], datum[1], datum[2], datum[3]]);
    if word & COMPRESSED_FLAG != 0 {
        return Err(VarlenaError::Compressed);
    }
    let total = (word >> 2) as usize;
    if total < VARHDRSZ || total > datum.len() {
        return Err(VarlenaError::Truncated);
    }
    Ok(&datum[VARHDRSZ..total])
}

/// Encode a body under the 1-byte short layout.
pub fn encode_short(body: &[u8]) -> Result<Vec<u8>, VarlenaError> {
    if body.len() > VARLENA_SHORT_MAX {
        return Err(VarlenaError::Oversize(body.len()));
    }
    let total = body.len() + VARHDRSZ_SHORT;
    let mut out = Vec::with_capacity(total);
    out.push(((total as u8) << 1) | 1);
    out.extend_from_slice(body);
    Ok(out)
}

/// Encode a body under the 4-byte full layout.
pub fn encode_full(body: &[u8]) -> Vec<u8> {
    let total = body.len() + VARHDRSZ;
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&(((total as u32) << 2).to_le_bytes()));
    out.extend_from_slice(body);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_round_trip() {
        let long = [0xAAu8; VARLENA_SHORT_MAX];
        for body_bytes in [&b""[..], &b"a"[..], &b"hello"[..], &long[..]] {
            let datum = encode_short(body_bytes).unwrap();
            assert_eq!(body(&datum).unwrap(), body_bytes);
        }
    }

    #[test]
    fn full_round_trip() {
        for len in [0usize, 1, 126, 127, 128, 4096] {
            let payload = vec![0x5Au8; len];
            let datum = encode_full(&payload);
            assert_eq!(body(&datum).unwrap(), &payload[..]);
        }
    }

    #[test]
    fn short_layout_rejects_oversize_body() {
        let payload = vec![0u8; VARLENA_SHORT_MAX + 1];
        assert_eq!(
            encode_short(&payload),
            Err(VarlenaError::Oversize(VARLENA_SHORT_MAX + 1))
        );
    }

    #[test]
    fn trailing_slack_is_ignored() {
        // A datum read out of a page may carry trailing bytes beyond its
        // declared length; they are not part of the value.
        let mut datum = encode_full(b"abc");
        datum.extend_from_slice(b"slack");
        assert_eq!(body(&datum).unwrap(), b"abc");
    }

    #[test]
    fn compressed_is_rejected() {
        let word: u32 = ((VARHDRSZ as u32 + 3) << 2) | 0x02;
        let mut datum = word.to_le_bytes().to_vec();
        datum.extend_from_slice(b"zzz");
        assert_eq!(body(&datum), Err(VarlenaError::Compressed));
    }

    #[test]
    fn out_of_line_is_rejected() {
        let datum = [0x01u8, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(body(&datum), Err(VarlenaError::OutOfLine));
    }

    #[test]
    fn truncated_is_rejected() {
        assert_eq!(body(&[]), Err(VarlenaError::Truncated));
        // Full header claiming 100 bytes total with only the header present.
        let word: u32 = 100u32 << 2;
        assert_eq!(body(&word.to_le_bytes()), Err(VarlenaError::Truncated));
        // Short header claiming more than the buffer holds.
        let datum = [((10u8) << 1) | 1, b'a'];
        assert_eq!(body(&datum), Err(VarlenaError::Truncated));
        // Three bytes cannot hold a full header.
        assert_eq!(body(&[0x04, 0, 0]), Err(VarlenaError::Truncated));
    }
}
