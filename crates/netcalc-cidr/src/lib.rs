//! Subnet arithmetic
//!
//! Computes subnet metadata for IPv4 and IPv6 addresses:
//! - Parse CIDR notation (e.g., "10.152.17.240/22")
//! - Expand prefix lengths into masks and back
//! - Byte-wise AND/OR/XOR over fixed-width addresses
//! - Network address and usable host range
//!
//! # Examples
//!
//! ```
//! use netcalc_cidr::SubnetCalculator;
//!
//! let info = SubnetCalculator::default().calculate("10.152.17.240/22").unwrap();
//! assert_eq!(info.network.to_string(), "10.152.16.0");
//! assert_eq!(info.mask.to_string(), "255.255.252.0");
//! assert_eq!(info.first_usable.unwrap().to_string(), "10.152.16.1");
//! assert_eq!(info.last_usable.unwrap().to_string(), "10.152.19.254");
//! ```

use netcalc_core::{Address, Family, NetcalcError, Result};
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

pub mod mask;
pub mod record;

pub use mask::{byte_op, mask_from_prefix, prefix_from_mask, BitOp};
pub use record::SubnetRecord;

/// Largest final mask byte that still leaves two host bits in that byte
const USABLE_MASK_LIMIT: u8 = 0xFC;

/// IPv6 prefix cap applied by [`CalcPolicy::strict`]
pub const STRICT_IPV6_MAX_PREFIX: u8 = 126;

/// Prefix-length policy
///
/// The default accepts the full protocol range for both families. The
/// strict policy additionally rejects IPv6 prefixes above
/// [`STRICT_IPV6_MAX_PREFIX`], i.e. subnets that could never have a usable
/// host range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalcPolicy {
    /// Largest IPv6 prefix accepted (clamped to 128)
    pub ipv6_max_prefix: u8,
}

impl CalcPolicy {
    /// Policy with the IPv6 cap at 126
    pub fn strict() -> Self {
        Self {
            ipv6_max_prefix: STRICT_IPV6_MAX_PREFIX,
        }
    }

    /// Largest prefix accepted for `family`
    pub fn max_prefix(&self, family: Family) -> u8 {
        match family {
            Family::V4 => family.bit_len(),
            Family::V6 => self.ipv6_max_prefix.min(family.bit_len()),
        }
    }

    /// Validate a prefix length for `family`
    pub fn check_prefix(&self, prefix: i64, family: Family) -> Result<u8> {
        let max = self.max_prefix(family);
        if prefix < 0 || prefix > i64::from(max) {
            return Err(NetcalcError::PrefixOutOfRange {
                prefix,
                family,
                max,
            });
        }

        Ok(prefix as u8)
    }
}

impl Default for CalcPolicy {
    fn default() -> Self {
        Self {
            ipv6_max_prefix: Family::V6.bit_len(),
        }
    }
}

/// Result of a subnet calculation
///
/// `first_usable`/`last_usable` are `None` for /31, /32, /127 and /128.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubnetInfo {
    /// Address as given, host bits included
    pub address: Address,
    /// Address with all host bits cleared
    pub network: Address,
    pub mask: Address,
    pub prefix_len: u8,
    pub first_usable: Option<Address>,
    pub last_usable: Option<Address>,
}

impl SubnetInfo {
    /// `"<network>/<prefix>"`
    pub fn network_name(&self) -> String {
        format!("{}/{}", self.network, self.prefix_len)
    }

    /// Whether the subnet has a usable host range
    pub fn has_usable_range(&self) -> bool {
        self.first_usable.is_some()
    }
}

impl fmt::Display for SubnetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)
    }
}

/// Subnet calculator bound to a [`CalcPolicy`]
///
/// Holds no mutable state; share it freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubnetCalculator {
    policy: CalcPolicy,
}

impl SubnetCalculator {
    pub fn new(policy: CalcPolicy) -> Self {
        Self { policy }
    }

    /// Split CIDR notation into an address and a validated prefix length
    ///
    /// # Examples
    ///
    /// ```
    /// use netcalc_cidr::SubnetCalculator;
    ///
    /// let (addr, prefix) = SubnetCalculator::default().parse_cidr("2001:db8::1/64").unwrap();
    /// assert_eq!(addr.to_string(), "2001:db8::1");
    /// assert_eq!(prefix, 64);
    /// ```
    pub fn parse_cidr(&self, text: &str) -> Result<(Address, u8)> {
        let text = text.trim();
        let (ip_str, prefix_str) = text.split_once('/').ok_or_else(|| {
            NetcalcError::InvalidNotation(format!("{} (expected ip/prefix)", text))
        })?;

        if prefix_str.contains('/') {
            return Err(NetcalcError::InvalidNotation(format!(
                "{} (more than one '/')",
                text
            )));
        }

        let address: Address = ip_str.parse()?;

        let prefix: i64 = prefix_str
            .trim()
            .parse()
            .map_err(|_| NetcalcError::InvalidPrefixLength(prefix_str.to_string()))?;

        let prefix_len = self.policy.check_prefix(prefix, address.family())?;

        Ok((address, prefix_len))
    }

    /// Parse CIDR notation and compute the subnet
    pub fn calculate(&self, text: &str) -> Result<SubnetInfo> {
        let (address, prefix_len) = self.parse_cidr(text)?;
        compute(address, prefix_len)
    }

    /// Compute the subnet for an address and an explicit mask
    ///
    /// The mask is canonicalized into a prefix length, then the call
    /// delegates to [`compute`].
    pub fn calculate_with_mask(&self, address: Address, mask: Address) -> Result<SubnetInfo> {
        if address.family() != mask.family() {
            return Err(NetcalcError::LengthMismatch {
                left: address.len(),
                right: mask.len(),
            });
        }

        let prefix = prefix_from_mask(mask.as_bytes())?;
        let prefix_len = self
            .policy
            .check_prefix(i64::from(prefix), address.family())?;

        compute(address, prefix_len)
    }

    /// Like [`Self::calculate_with_mask`], parsing both operands from text
    ///
    /// Mask text that is not an IP literal is an invalid subnet mask.
    pub fn calculate_pair(&self, address: &str, mask: &str) -> Result<SubnetInfo> {
        let address: Address = address.parse()?;
        let mask: Address = mask
            .parse()
            .map_err(|_| NetcalcError::InvalidSubnetMask(mask.trim().to_string()))?;

        self.calculate_with_mask(address, mask)
    }
}

/// Parse CIDR notation under the default policy
pub fn parse_cidr(text: &str) -> Result<(Address, u8)> {
    SubnetCalculator::default().parse_cidr(text)
}

/// Compute network address, mask and usable host range
///
/// Fails with [`NetcalcError::PrefixOutOfRange`] when `prefix_len` exceeds
/// the address's bit length.
///
/// # Examples
///
/// ```
/// use netcalc_cidr::compute;
///
/// let info = compute("192.168.1.5".parse().unwrap(), 31).unwrap();
/// assert_eq!(info.network.to_string(), "192.168.1.4");
/// assert!(info.first_usable.is_none());
/// assert!(info.last_usable.is_none());
/// ```
pub fn compute(address: Address, prefix_len: u8) -> Result<SubnetInfo> {
    let family = address.family();
    if prefix_len > family.bit_len() {
        return Err(NetcalcError::PrefixOutOfRange {
            prefix: i64::from(prefix_len),
            family,
            max: family.bit_len(),
        });
    }

    trace!(%address, prefix_len, "computing subnet");

    let mask = mask_from_prefix(prefix_len, address.len());
    let network = byte_op(address.as_bytes(), &mask, BitOp::And)?;

    let (first_usable, last_usable) = match usable_range(&network, &mask)? {
        Some((first, last)) => (
            Some(Address::from_bytes(family, &first)?),
            Some(Address::from_bytes(family, &last)?),
        ),
        None => {
            debug!(%address, prefix_len, "no usable host range");
            (None, None)
        }
    };

    Ok(SubnetInfo {
        address,
        network: Address::from_bytes(family, &network)?,
        mask: Address::from_bytes(family, &mask)?,
        prefix_len,
        first_usable,
        last_usable,
    })
}

/// First and last usable host bytes, or `None` when fewer than two host
/// bits remain.
///
/// Only the last byte is adjusted. With the final mask byte at most 0xFC,
/// that byte keeps at least two host bits, so the network's last byte is at
/// most 0xFC and the broadcast's at least 0x03: neither step can carry or
/// borrow into the next byte.
fn usable_range(network: &[u8], mask: &[u8]) -> Result<Option<(Vec<u8>, Vec<u8>)>> {
    match mask.last() {
        Some(&last) if last <= USABLE_MASK_LIMIT => {}
        _ => return Ok(None),
    }

    let host_mask = byte_op(mask, &vec![0xFF; mask.len()], BitOp::Xor)?;
    let broadcast = byte_op(network, &host_mask, BitOp::Or)?;

    let mut first = network.to_vec();
    let mut last = broadcast;
    if let Some(b) = first.last_mut() {
        *b += 1;
    }
    if let Some(b) = last.last_mut() {
        *b -= 1;
    }

    Ok(Some((first, last)))
}
