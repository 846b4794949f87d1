//! Interface records scraped from `ifconfig -a` output (net-tools format):
//!
//! ```text
//! eth0      Link encap:Ethernet  HWaddr 00:16:3e:5a:1c:02
//!           inet addr:10.0.0.5  Bcast:10.0.0.255  Mask:255.255.255.0
//!           ...
//!           RX bytes:1234 (1.2 KB)  TX bytes:5678 (5.6 KB)
//!
//! lo        Link encap:Local Loopback
//!           ...
//! ```

use std::collections::BTreeMap;

use crate::{
    error::{Error, Result},
    text::{extract_between, Stop},
};

pub mod schema;

#[cfg(test)]
mod tests;

const ENCAP_MARKER: &str = "Link encap:";
const ENCAP_STOP: &[&str] = &["\n", "  "];
const FIELD_STOP: &[&str] = &["\n", "  ", "("];

/// Link encapsulation as reported after `Link encap:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encapsulation {
    Ethernet,
    LocalLoopback,
    Unspec,
    /// Reported, but without a specific schema. Only base fields apply.
    Other(String),
    /// No `Link encap:` label in the block.
    Undetected,
}

impl Encapsulation {
    pub fn from_label(label: &str) -> Self {
        match label {
            "" => Self::Undetected,
            "Ethernet" => Self::Ethernet,
            "Local Loopback" => Self::LocalLoopback,
            "UNSPEC" => Self::Unspec,
            other => Self::Other(other.to_string()),
        }
    }

    /// The label exactly as ifconfig prints it. Empty when undetected.
    pub fn label(&self) -> &str {
        match self {
            Self::Ethernet => "Ethernet",
            Self::LocalLoopback => "Local Loopback",
            Self::Unspec => "UNSPEC",
            Self::Other(label) => label,
            Self::Undetected => "",
        }
    }
}

impl std::fmt::Display for Encapsulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl serde::Serialize for Encapsulation {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct InterfaceRecord {
    name: String,
    encapsulation: Encapsulation,
    fields: BTreeMap<&'static str, String>,
}

impl InterfaceRecord {
    /// `None` if the block has no name, i.e. does not begin with a token
    /// followed by a space.
    fn from_block(block: &str) -> Option<Self> {
        let name = match block.find(' ') {
            Some(0) | None => return None,
            Some(end) => &block[..end],
        };
        let encapsulation = Encapsulation::from_label(extract_between(
            block,
            ENCAP_MARKER,
            Stop::AnyOf(ENCAP_STOP),
            false,
        ));
        let mut fields = BTreeMap::new();
        for &(field, marker) in schema::effective(&encapsulation) {
            let value =
                extract_between(block, marker, Stop::AnyOf(FIELD_STOP), false);
            fields.insert(field, value.to_string());
        }
        Some(Self {
            name: name.to_string(),
            encapsulation,
            fields,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn encapsulation(&self) -> &Encapsulation {
        &self.encapsulation
    }

    /// Every field of the record's schema, including empty ones.
    pub fn fields(&self) -> &BTreeMap<&'static str, String> {
        &self.fields
    }

    /// Fails only if the field is not part of this record's schema. A field
    /// whose marker was missing from the block is present, but empty.
    pub fn field(&self, name: &str) -> Result<&str> {
        self.fields.get(name).map(String::as_str).ok_or_else(|| {
            Error::FieldNotFound {
                interface: self.name.clone(),
                field: name.to_string(),
            }
        })
    }
}

/// Records in order of first appearance in the dump.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InterfaceRecordSet {
    records: Vec<InterfaceRecord>,
}

impl InterfaceRecordSet {
    /// Nameless blocks are skipped. Fails only if the dump has content but
    /// not a single block could be named.
    #[tracing::instrument(skip_all)]
    pub fn parse(dump: &str) -> Result<Self> {
        let mut set = Self::default();
        let mut malformed = 0;
        for block in blocks(dump) {
            match InterfaceRecord::from_block(block) {
                Some(record) => {
                    tracing::debug!(
                        name = record.name(),
                        encapsulation = %record.encapsulation(),
                        "Parsed interface block."
                    );
                    set.insert(record);
                }
                None => {
                    malformed += 1;
                    tracing::warn!(?block, "Skipping block without a name.");
                }
            }
        }
        if set.is_empty() && malformed > 0 {
            Err(Error::Unparseable)
        } else {
            Ok(set)
        }
    }

    /// Replaces a same-named record wholesale, keeping its position.
    fn insert(&mut self, record: InterfaceRecord) {
        match self.records.iter_mut().find(|r| r.name == record.name) {
            Some(existing) => {
                tracing::debug!(name = record.name(), "Replacing duplicate.");
                *existing = record;
            }
            None => self.records.push(record),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(InterfaceRecord::name).collect()
    }

    /// All records when `encapsulation` is `None`, otherwise those whose
    /// label matches it exactly.
    pub fn by_type(&self, encapsulation: Option<&str>) -> Vec<&InterfaceRecord> {
        self.records
            .iter()
            .filter(|r| {
                encapsulation.map_or(true, |e| r.encapsulation.label() == e)
            })
            .collect()
    }

    pub fn get(&self, name: &str) -> Result<&InterfaceRecord> {
        self.records
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| Error::InterfaceNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterfaceRecord> {
        self.records.iter()
    }
}

impl IntoIterator for InterfaceRecordSet {
    type Item = InterfaceRecord;
    type IntoIter = std::vec::IntoIter<InterfaceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Non-blank chunks separated by one or more blank lines.
fn blocks(dump: &str) -> impl Iterator<Item = &str> {
    dump.split("\n\n")
        // Runs of 3+ newlines leave leading newlines on the next chunk.
        .map(|chunk| chunk.trim_start_matches('\n'))
        .filter(|chunk| !chunk.trim().is_empty())
}
