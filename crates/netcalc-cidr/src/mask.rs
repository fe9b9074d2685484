//! Mask expansion and byte-wise boolean operations
//!
//! Everything here works on plain byte slices so the same code serves both
//! address families.

use netcalc_core::{NetcalcError, Result};

/// Mask bytes that are a contiguous run of leading 1-bits, indexed by the
/// number of bits set.
const CANONICAL_MASK_BYTES: [u8; 9] = [0x00, 0x80, 0xC0, 0xE0, 0xF0, 0xF8, 0xFC, 0xFE, 0xFF];

/// Widest mask accepted by [`prefix_from_mask`] (IPv6)
const MAX_MASK_BYTES: usize = 16;

/// Boolean operator for [`byte_op`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOp {
    And,
    Or,
    Xor,
}

impl BitOp {
    fn apply(self, a: u8, b: u8) -> u8 {
        match self {
            BitOp::And => a & b,
            BitOp::Or => a | b,
            BitOp::Xor => a ^ b,
        }
    }
}

/// Combine two equal-length byte sequences element by element
///
/// # Examples
///
/// ```
/// use netcalc_cidr::{byte_op, BitOp};
///
/// let network = byte_op(&[10, 152, 17, 240], &[255, 255, 252, 0], BitOp::And).unwrap();
/// assert_eq!(network, vec![10, 152, 16, 0]);
/// ```
pub fn byte_op(a: &[u8], b: &[u8], op: BitOp) -> Result<Vec<u8>> {
    if a.len() != b.len() {
        return Err(NetcalcError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    Ok(a.iter().zip(b).map(|(&x, &y)| op.apply(x, y)).collect())
}

/// Expand a prefix length into `byte_len` mask bytes
///
/// The first `prefix_len` bits are set and the rest cleared. A prefix longer
/// than `byte_len * 8` simply yields an all-ones mask; callers validate the
/// range first.
pub fn mask_from_prefix(prefix_len: u8, byte_len: usize) -> Vec<u8> {
    let prefix = usize::from(prefix_len);

    (0..byte_len)
        .map(|i| {
            if prefix >= (i + 1) * 8 {
                0xFF
            } else if prefix > i * 8 {
                // shift is 1..=7, bits pushed past the top are dropped
                0xFFu8 << ((i + 1) * 8 - prefix)
            } else {
                0x00
            }
        })
        .collect()
}

/// Recover the prefix length from mask bytes
///
/// Each byte must be one of the nine canonical values and no set bit may
/// follow a cleared one across bytes. Anything else is rejected with
/// [`NetcalcError::InvalidSubnetMask`].
///
/// # Examples
///
/// ```
/// use netcalc_cidr::prefix_from_mask;
///
/// assert_eq!(prefix_from_mask(&[255, 255, 252, 0]).unwrap(), 22);
/// assert!(prefix_from_mask(&[255, 255, 255, 85]).is_err());
/// ```
pub fn prefix_from_mask(mask: &[u8]) -> Result<u8> {
    if mask.len() > MAX_MASK_BYTES {
        return Err(NetcalcError::LengthMismatch {
            left: mask.len(),
            right: MAX_MASK_BYTES,
        });
    }

    let mut prefix: u8 = 0;
    let mut run_ended = false;

    for (i, &byte) in mask.iter().enumerate() {
        let bits = CANONICAL_MASK_BYTES
            .iter()
            .position(|&c| c == byte)
            .ok_or_else(|| invalid_mask(mask, i))?;

        if run_ended && bits != 0 {
            return Err(invalid_mask(mask, i));
        }
        if bits < 8 {
            run_ended = true;
        }

        // at most 16 * 8 = 128
        prefix += bits as u8;
    }

    Ok(prefix)
}

fn invalid_mask(mask: &[u8], index: usize) -> NetcalcError {
    let dotted = mask
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(".");

    NetcalcError::InvalidSubnetMask(format!(
        "{} (byte {} = {:#04x} breaks the leading run of ones)",
        dotted, index, mask[index]
    ))
}
