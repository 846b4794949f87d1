// data sources:
// - c: ifconfig -a (net-tools): per-interface blocks, separated by blank lines
//
// Newer ifconfig ("eth0: flags=...") and `ip addr` output are not handled.

pub mod ifconfig;
