//! Which fields are scraped from an interface block, and the text marker that
//! precedes each value.

use super::Encapsulation;

/// Field name and the marker preceding its value.
pub type Field = (&'static str, &'static str);

pub const RX_BYTES: &str = "rx_bytes";
pub const TX_BYTES: &str = "tx_bytes";
pub const MAC_ADDRESS: &str = "mac_address";
pub const IP_ADDRESS: &str = "ip_address";
pub const BROADCAST: &str = "broadcast";
pub const NETMASK: &str = "netmask";

/// Applied to every interface.
pub const BASE: &[Field] = &[(RX_BYTES, "RX bytes:"), (TX_BYTES, "TX bytes:")];

const ETHERNET: &[Field] = &[
    (MAC_ADDRESS, "HWaddr "),
    (IP_ADDRESS, "inet addr:"),
    (BROADCAST, "Bcast:"),
    (NETMASK, "Mask:"),
];

const LOCAL_LOOPBACK: &[Field] = &[(IP_ADDRESS, "inet addr:")];

const UNSPEC: &[Field] = &[
    (IP_ADDRESS, "inet addr:"),
    (BROADCAST, "Bcast:"),
    (NETMASK, "Mask:"),
];

/// Fields specific to the encapsulation, extracted on top of [`BASE`].
pub fn specific(encapsulation: &Encapsulation) -> &'static [Field] {
    match encapsulation {
        Encapsulation::Ethernet => ETHERNET,
        Encapsulation::LocalLoopback => LOCAL_LOOPBACK,
        Encapsulation::Unspec => UNSPEC,
        Encapsulation::Other(_) | Encapsulation::Undetected => &[],
    }
}

/// Base fields followed by the specific ones. When both define a field, the
/// specific marker is the one that ends up in the record, since it is
/// inserted last.
pub fn effective(
    encapsulation: &Encapsulation,
) -> impl Iterator<Item = &'static Field> {
    BASE.iter().chain(specific(encapsulation))
}
