//! Presentation record for a computed subnet

use netcalc_core::Address;
use serde::{Deserialize, Serialize};

use crate::SubnetInfo;

/// Flat, renderable view of a [`SubnetInfo`]
///
/// Field names match the conventional subnet-calculator output, e.g.
/// `NetworkName` is `"<network>/<prefix>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubnetRecord {
    pub address: Address,
    pub network_name: String,
    pub network_address: Address,
    pub network_mask: Address,
    pub mask_length: u8,
    #[serde(rename = "FirstIPAddress")]
    pub first_ip_address: Option<Address>,
    #[serde(rename = "LastIPAddress")]
    pub last_ip_address: Option<Address>,
}

impl SubnetRecord {
    /// Column names in render order
    pub const HEADERS: [&'static str; 7] = [
        "Address",
        "NetworkName",
        "NetworkAddress",
        "NetworkMask",
        "MaskLength",
        "FirstIPAddress",
        "LastIPAddress",
    ];

    /// Field values in [`Self::HEADERS`] order; absent bounds become empty strings
    pub fn to_row(&self) -> [String; 7] {
        let opt = |a: Option<Address>| a.map_or(String::new(), |a| a.to_string());

        [
            self.address.to_string(),
            self.network_name.clone(),
            self.network_address.to_string(),
            self.network_mask.to_string(),
            self.mask_length.to_string(),
            opt(self.first_ip_address),
            opt(self.last_ip_address),
        ]
    }
}

impl From<&SubnetInfo> for SubnetRecord {
    fn from(info: &SubnetInfo) -> Self {
        Self {
            address: info.address,
            network_name: info.network_name(),
            network_address: info.network,
            network_mask: info.mask,
            mask_length: info.prefix_len,
            first_ip_address: info.first_usable,
            last_ip_address: info.last_usable,
        }
    }
}

impl From<SubnetInfo> for SubnetRecord {
    fn from(info: SubnetInfo) -> Self {
        Self::from(&info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute;

    fn record(addr: &str, prefix: u8) -> SubnetRecord {
        compute(addr.parse().unwrap(), prefix).unwrap().into()
    }

    #[test]
    fn test_record_fields() {
        let rec = record("10.152.17.240", 22);
        assert_eq!(rec.network_name, "10.152.16.0/22");
        assert_eq!(rec.mask_length, 22);
        assert_eq!(
            rec.to_row(),
            [
                "10.152.17.240",
                "10.152.16.0/22",
                "10.152.16.0",
                "255.255.252.0",
                "22",
                "10.152.16.1",
                "10.152.19.254",
            ]
            .map(String::from)
        );
    }

    #[test]
    fn test_record_serialization() {
        let rec = record("192.168.1.5", 31);
        let json = serde_json::to_value(&rec).expect("serialization failed");

        assert_eq!(json["Address"], "192.168.1.5");
        assert_eq!(json["NetworkName"], "192.168.1.4/31");
        assert_eq!(json["NetworkMask"], "255.255.255.254");
        assert_eq!(json["MaskLength"], 31);
        assert!(json["FirstIPAddress"].is_null());
        assert!(json["LastIPAddress"].is_null());
    }

    #[test]
    fn test_record_deserialization() {
        let json = r#"{
            "Address": "2001:db8::1",
            "NetworkName": "2001:db8::/64",
            "NetworkAddress": "2001:db8::",
            "NetworkMask": "ffff:ffff:ffff:ffff::",
            "MaskLength": 64,
            "FirstIPAddress": "2001:db8::1",
            "LastIPAddress": "2001:db8::ffff:ffff:ffff:fffe"
        }"#;
        let rec: SubnetRecord = serde_json::from_str(json).expect("deserialization failed");
        assert_eq!(rec, record("2001:db8::1", 64));
    }

    #[test]
    fn test_headers_match_row_width() {
        let rec = record("10.0.0.1", 32);
        let row = rec.to_row();
        assert_eq!(row.len(), SubnetRecord::HEADERS.len());
        assert_eq!(row[5], "");
        assert_eq!(row[6], "");
    }
}
