use std::fs;

use super::*;

const TWO_BLOCKS: &str = "eth0      Link encap:Ethernet  HWaddr 08:00:27:4e:66:a1
          inet addr:10.0.2.15  Bcast:10.0.2.255  Mask:255.255.255.0
          RX bytes:1024 (1.0 KB)  TX bytes:2048 (2.0 KB)

lo        Link encap:Local Loopback
          inet addr:127.0.0.1  Mask:255.0.0.0
";

fn fixture() -> InterfaceRecordSet {
    InterfaceRecordSet::parse(
        &fs::read_to_string("tests/ifconfig-a.txt").unwrap(),
    )
    .unwrap()
}

#[test]
fn t_encapsulation_label() {
    assert_eq!(Encapsulation::Undetected, Encapsulation::from_label(""));
    assert_eq!(
        Encapsulation::LocalLoopback,
        Encapsulation::from_label("Local Loopback")
    );
    assert_eq!(
        Encapsulation::Other("ethernet".to_string()),
        Encapsulation::from_label("ethernet")
    );
    for label in ["Ethernet", "Local Loopback", "UNSPEC", "Point-to-Point", ""]
    {
        assert_eq!(label, Encapsulation::from_label(label).label());
    }
}

#[test]
fn t_two_blocks() {
    let set = InterfaceRecordSet::parse(TWO_BLOCKS).unwrap();
    assert_eq!(vec!["eth0", "lo"], set.names());

    let eth0 = set.get("eth0").unwrap();
    assert_eq!(&Encapsulation::Ethernet, eth0.encapsulation());
    assert_eq!("08:00:27:4e:66:a1", eth0.field("mac_address").unwrap());
    assert_eq!("10.0.2.15", eth0.field("ip_address").unwrap());
    assert_eq!("10.0.2.255", eth0.field("broadcast").unwrap());
    assert_eq!("255.255.255.0", eth0.field("netmask").unwrap());
    assert_eq!("1024", eth0.field("rx_bytes").unwrap());
    assert_eq!("2048", eth0.field("tx_bytes").unwrap());

    let lo = set.get("lo").unwrap();
    assert_eq!(&Encapsulation::LocalLoopback, lo.encapsulation());
    assert_eq!("127.0.0.1", lo.field("ip_address").unwrap());
    assert!(!lo.fields().contains_key(schema::MAC_ADDRESS));
    assert!(matches!(
        lo.field("mac_address"),
        Err(Error::FieldNotFound { .. })
    ));
    // Base fields are always there, even when their markers are missing.
    assert_eq!("", lo.field("rx_bytes").unwrap());
    assert_eq!("", lo.field("tx_bytes").unwrap());
}

#[test]
fn t_by_type() {
    let set = InterfaceRecordSet::parse(TWO_BLOCKS).unwrap();
    let ethernet = set.by_type(Some("Ethernet"));
    assert_eq!(1, ethernet.len());
    assert_eq!("eth0", ethernet[0].name());
    assert_eq!(2, set.by_type(None).len());
    assert!(set.by_type(Some("ethernet")).is_empty());
    assert!(set.by_type(Some("Loopback")).is_empty());
    assert_eq!("lo", set.by_type(Some("Local Loopback"))[0].name());
}

#[test]
fn t_get_missing() {
    let set = InterfaceRecordSet::parse(TWO_BLOCKS).unwrap();
    match set.get("wlan0") {
        Err(Error::InterfaceNotFound(name)) => assert_eq!("wlan0", name),
        other => panic!("Unexpected result: {other:?}"),
    }
}

#[test]
fn t_duplicate_replaces_whole_record() {
    let dump = "eth0 Link encap:Ethernet  HWaddr aa:aa:aa:aa:aa:aa
     inet addr:10.0.0.1  Bcast:10.0.0.255  Mask:255.255.255.0

lo Link encap:Local Loopback
     inet addr:127.0.0.1

eth0 Link encap:UNSPEC
     inet addr:10.0.0.2
";
    let set = InterfaceRecordSet::parse(dump).unwrap();
    assert_eq!(vec!["eth0", "lo"], set.names());
    let eth0 = set.get("eth0").unwrap();
    assert_eq!(&Encapsulation::Unspec, eth0.encapsulation());
    assert_eq!("10.0.0.2", eth0.field("ip_address").unwrap());
    assert_eq!("", eth0.field("broadcast").unwrap());
    assert!(eth0.field("mac_address").is_err());
}

#[test]
fn t_fixture() {
    let set = fixture();
    assert_eq!(vec!["eth0", "lo", "sit0", "tun0"], set.names());

    let eth0 = set.get("eth0").unwrap();
    assert_eq!("00:16:3e:5a:1c:02", eth0.field("mac_address").unwrap());
    assert_eq!("192.168.1.10", eth0.field("ip_address").unwrap());
    assert_eq!("192.168.1.255", eth0.field("broadcast").unwrap());
    assert_eq!("255.255.255.0", eth0.field("netmask").unwrap());
    assert_eq!("215326142", eth0.field("rx_bytes").unwrap());
    assert_eq!("12693461", eth0.field("tx_bytes").unwrap());

    let lo = set.get("lo").unwrap();
    assert_eq!(
        vec!["ip_address", "rx_bytes", "tx_bytes"],
        lo.fields().keys().copied().collect::<Vec<&str>>()
    );
    assert_eq!("190244", lo.field("rx_bytes").unwrap());

    let sit0 = set.get("sit0").unwrap();
    assert_eq!(
        &Encapsulation::Other("IPv6-in-IPv4".to_string()),
        sit0.encapsulation()
    );
    assert_eq!(2, sit0.fields().len());
    assert_eq!("0", sit0.field("tx_bytes").unwrap());

    let tun0 = set.get("tun0").unwrap();
    assert_eq!("UNSPEC", tun0.encapsulation().label());
    assert_eq!("10.8.0.6", tun0.field("ip_address").unwrap());
    assert_eq!("255.255.255.255", tun0.field("netmask").unwrap());
    assert_eq!("", tun0.field("broadcast").unwrap());

    assert_eq!(1, set.by_type(Some("UNSPEC")).len());
    assert_eq!(4, set.by_type(None).len());
}

#[test]
fn t_blank_line_runs() {
    let dump = "\n\n\neth0 Link encap:Ethernet\n\n\n\nlo Link encap:Local Loopback\n\n";
    let set = InterfaceRecordSet::parse(dump).unwrap();
    assert_eq!(vec!["eth0", "lo"], set.names());
}

#[test]
fn t_undetected_encapsulation() {
    let set =
        InterfaceRecordSet::parse("dummy0 flags=130<BROADCAST,NOARP>\n")
            .unwrap();
    let dummy0 = set.get("dummy0").unwrap();
    assert_eq!(&Encapsulation::Undetected, dummy0.encapsulation());
    assert_eq!(schema::BASE.len(), dummy0.fields().len());
    assert_eq!(1, set.by_type(Some("")).len());
}

#[test]
fn t_malformed_blocks() {
    // Skipped, the rest is still parsed.
    let set = InterfaceRecordSet::parse(
        "garbage\n\n   indented Link encap:Ethernet\n\nlo Link encap:Local Loopback\n",
    )
    .unwrap();
    assert_eq!(vec!["lo"], set.names());

    assert!(matches!(
        InterfaceRecordSet::parse("garbage\n\nmore-garbage"),
        Err(Error::Unparseable)
    ));
}

#[test]
fn t_empty_dump() {
    assert!(InterfaceRecordSet::parse("").unwrap().is_empty());
    assert!(InterfaceRecordSet::parse("\n \n\n\t\n").unwrap().is_empty());
}

#[test]
fn t_serialize() {
    let set = InterfaceRecordSet::parse(TWO_BLOCKS).unwrap();
    let json = serde_json::to_value(set.get("lo").unwrap()).unwrap();
    assert_eq!(
        serde_json::json!({
            "name": "lo",
            "encapsulation": "Local Loopback",
            "fields": {
                "ip_address": "127.0.0.1",
                "rx_bytes": "",
                "tx_bytes": "",
            },
        }),
        json
    );
}
