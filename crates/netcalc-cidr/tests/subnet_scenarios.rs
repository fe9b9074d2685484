use netcalc_cidr::{
    byte_op, compute, mask_from_prefix, prefix_from_mask, BitOp, CalcPolicy, SubnetCalculator,
    SubnetRecord,
};
use netcalc_core::{Address, NetcalcError};

fn addr(s: &str) -> Address {
    s.parse().expect("valid test address")
}

#[test]
fn test_cidr_and_mask_forms_agree() {
    let calc = SubnetCalculator::default();

    let from_cidr = calc.calculate("10.152.17.240/22").expect("cidr form");
    let from_mask = calc
        .calculate_pair("10.152.17.240", "255.255.252.0")
        .expect("mask form");

    assert_eq!(from_cidr, from_mask);
    assert_eq!(from_cidr.network, addr("10.152.16.0"));
    assert_eq!(from_cidr.first_usable, Some(addr("10.152.16.1")));
    assert_eq!(from_cidr.last_usable, Some(addr("10.152.19.254")));
    assert_eq!(prefix_from_mask(from_cidr.mask.as_bytes()).unwrap(), 22);
}

#[test]
fn test_network_masking_is_idempotent() {
    let samples = [
        "0.0.0.0",
        "10.152.17.240",
        "192.168.255.255",
        "255.255.255.255",
        "::",
        "2001:db8:ffff:1234:5678:9abc:def0:ffff",
        "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff",
    ];

    for s in samples {
        let a = addr(s);
        for p in 0..=a.bit_len() {
            let info = compute(a, p).expect("valid prefix");
            let mask = info.mask.as_bytes();
            let network = info.network.as_bytes();

            assert_eq!(byte_op(network, mask, BitOp::And).unwrap(), network);

            // no host bit survives in the network address
            let host_mask = byte_op(mask, &vec![0xFF; mask.len()], BitOp::Xor).unwrap();
            let host_bits = byte_op(network, &host_mask, BitOp::And).unwrap();
            assert!(host_bits.iter().all(|&b| b == 0), "{}/{}", s, p);
        }
    }
}

#[test]
fn test_usable_range_bounds_the_subnet() {
    for s in ["10.152.17.240", "172.16.0.1", "2001:db8::dead:beef"] {
        let a = addr(s);
        for p in 0..=a.bit_len() - 2 {
            let info = compute(a, p).expect("valid prefix");
            let first = info.first_usable.expect("usable range");
            let last = info.last_usable.expect("usable range");

            assert!(info.network < first, "{}/{}", s, p);
            assert!(first <= last, "{}/{}", s, p);
            assert_eq!(
                byte_op(last.as_bytes(), info.mask.as_bytes(), BitOp::And).unwrap(),
                info.network.as_bytes()
            );
        }
    }
}

#[test]
fn test_point_to_point_and_host_subnets() {
    let calc = SubnetCalculator::default();
    for cidr in ["192.168.1.5/31", "192.168.1.5/32", "fe80::5/127", "fe80::5/128"] {
        let info = calc.calculate(cidr).expect("valid cidr");
        assert!(info.first_usable.is_none(), "{}", cidr);
        assert!(info.last_usable.is_none(), "{}", cidr);
    }
}

#[test]
fn test_non_canonical_mask_rejected() {
    let err = SubnetCalculator::default()
        .calculate_pair("10.0.0.1", "255.255.255.85")
        .unwrap_err();
    assert!(matches!(err, NetcalcError::InvalidSubnetMask(_)));
}

#[test]
fn test_strict_policy_only_affects_ipv6() {
    let strict = SubnetCalculator::new(CalcPolicy::strict());
    assert!(strict.calculate("192.168.1.5/31").is_ok());
    assert!(strict.calculate("2001:db8::/126").is_ok());
    assert!(matches!(
        strict.calculate("2001:db8::/127"),
        Err(NetcalcError::PrefixOutOfRange { .. })
    ));
}

#[test]
fn test_masks_for_all_prefixes_are_contiguous() {
    for p in 0..=128u8 {
        let mask = mask_from_prefix(p, 16);
        let ones: u32 = mask.iter().map(|b| b.count_ones()).sum();
        assert_eq!(ones, u32::from(p));
        assert_eq!(prefix_from_mask(&mask).unwrap(), p);
    }
}

#[test]
fn test_record_from_calculation() {
    let info = SubnetCalculator::default()
        .calculate("2001:db8::1/64")
        .expect("valid cidr");
    let rec = SubnetRecord::from(&info);

    assert_eq!(rec.network_name, "2001:db8::/64");
    assert_eq!(rec.network_mask.to_string(), "ffff:ffff:ffff:ffff::");
    assert_eq!(rec.mask_length, 64);
}
