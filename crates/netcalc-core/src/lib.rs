//! Core types for netcalc
//!
//! This crate provides the foundational types shared by the netcalc crates:
//! - [`Address`] - Fixed-width IPv4/IPv6 address bytes
//! - [`Family`] - Address family and its bit length
//! - [`NetcalcError`] - Error types
//!
//! ```
//! use netcalc_core::{Address, Family};
//!
//! let addr: Address = "10.152.17.240".parse().unwrap();
//! assert_eq!(addr.family(), Family::V4);
//! assert_eq!(addr.as_bytes(), &[10, 152, 17, 240]);
//! ```

use thiserror::Error;

pub mod address;

pub use address::{Address, Family};

/// Error types for subnet calculations
///
/// Every variant is recoverable at the granularity of a single input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetcalcError {
    /// Text is not of the form `ip/prefix`
    #[error("Invalid CIDR notation: {0}")]
    InvalidNotation(String),

    /// Malformed IP literal
    #[error("Invalid IP address: {0}")]
    InvalidAddress(String),

    /// Prefix is not a parseable integer
    #[error("Invalid prefix length: {0}")]
    InvalidPrefixLength(String),

    /// Prefix outside the range allowed for the address family
    #[error("Prefix length {prefix} out of range for {family} (must be 0-{max})")]
    PrefixOutOfRange {
        prefix: i64,
        family: Family,
        max: u8,
    },

    /// Mask bytes are not a contiguous run of leading 1-bits
    #[error("Invalid subnet mask: {0}")]
    InvalidSubnetMask(String),

    /// Byte sequences of different widths were combined
    #[error("Length mismatch: {left} bytes vs {right} bytes")]
    LengthMismatch { left: usize, right: usize },
}

/// Result type alias for netcalc operations
pub type Result<T> = std::result::Result<T, NetcalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NetcalcError::InvalidAddress("10.0.0.256".to_string());
        assert_eq!(format!("{}", err), "Invalid IP address: 10.0.0.256");

        let err = NetcalcError::PrefixOutOfRange {
            prefix: 33,
            family: Family::V4,
            max: 32,
        };
        assert_eq!(
            format!("{}", err),
            "Prefix length 33 out of range for IPv4 (must be 0-32)"
        );

        let err = NetcalcError::LengthMismatch { left: 4, right: 16 };
        assert_eq!(format!("{}", err), "Length mismatch: 4 bytes vs 16 bytes");
    }

    #[test]
    fn test_result_type() {
        fn returns_result() -> Result<Address> {
            "192.168.1.1".parse()
        }

        let result = returns_result();
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Address::V4([192, 168, 1, 1]));
    }

    #[test]
    fn test_error_equality() {
        let a = NetcalcError::InvalidSubnetMask("255.0.255.0".to_string());
        let b = NetcalcError::InvalidSubnetMask("255.0.255.0".to_string());
        assert_eq!(a, b);
        assert_ne!(a, NetcalcError::InvalidNotation("x".to_string()));
    }
}
