//! Fixed-width address bytes
//!
//! An [`Address`] is the ordered byte sequence behind an IPv4 (4 bytes) or
//! IPv6 (16 bytes) literal, most-significant byte first. Comparison is
//! byte-wise, so ordering within a family matches numeric order.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::{NetcalcError, Result};

/// Address family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Number of bytes in an address of this family
    pub const fn byte_len(self) -> usize {
        match self {
            Family::V4 => 4,
            Family::V6 => 16,
        }
    }

    /// Number of bits in an address of this family (the maximum prefix length)
    pub const fn bit_len(self) -> u8 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::V4 => write!(f, "IPv4"),
            Family::V6 => write!(f, "IPv6"),
        }
    }
}

/// IPv4 or IPv6 address as raw bytes
///
/// # Examples
///
/// ```
/// use netcalc_core::{Address, Family};
///
/// let v6: Address = "2001:db8::1".parse().unwrap();
/// assert_eq!(v6.family(), Family::V6);
/// assert_eq!(v6.len(), 16);
/// assert_eq!(v6.to_string(), "2001:db8::1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Address {
    V4([u8; 4]),
    V6([u8; 16]),
}

impl Address {
    /// Build an address of `family` from a byte slice
    ///
    /// Fails with [`NetcalcError::LengthMismatch`] when the slice is not
    /// exactly `family.byte_len()` bytes long.
    pub fn from_bytes(family: Family, bytes: &[u8]) -> Result<Self> {
        let mismatch = || NetcalcError::LengthMismatch {
            left: bytes.len(),
            right: family.byte_len(),
        };

        match family {
            Family::V4 => bytes.try_into().map(Address::V4).map_err(|_| mismatch()),
            Family::V6 => bytes.try_into().map(Address::V6).map_err(|_| mismatch()),
        }
    }

    /// Address family
    pub fn family(&self) -> Family {
        match self {
            Address::V4(_) => Family::V4,
            Address::V6(_) => Family::V6,
        }
    }

    /// Raw bytes, most-significant first
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Address::V4(b) => b,
            Address::V6(b) => b,
        }
    }

    /// Number of bytes (4 or 16)
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.family().byte_len()
    }

    /// Number of bits (32 or 128)
    pub fn bit_len(&self) -> u8 {
        self.family().bit_len()
    }
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => v4.into(),
            IpAddr::V6(v6) => v6.into(),
        }
    }
}

impl From<Ipv4Addr> for Address {
    fn from(ip: Ipv4Addr) -> Self {
        Address::V4(ip.octets())
    }
}

impl From<Ipv6Addr> for Address {
    fn from(ip: Ipv6Addr) -> Self {
        Address::V6(ip.octets())
    }
}

impl From<Address> for IpAddr {
    fn from(addr: Address) -> Self {
        match addr {
            Address::V4(b) => IpAddr::V4(Ipv4Addr::from(b)),
            Address::V6(b) => IpAddr::V6(Ipv6Addr::from(b)),
        }
    }
}

impl FromStr for Address {
    type Err = NetcalcError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<IpAddr>()
            .map(Address::from)
            .map_err(|_| NetcalcError::InvalidAddress(s.to_string()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&IpAddr::from(*self), f)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
