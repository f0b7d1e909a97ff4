//! Protocol layers and their typed fields.

use super::{MacAddress, StreamDomainError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;

/// Protocol header a layer represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Ethernet II header.
    Ethernet,
    /// IPv4 header.
    Ipv4,
}

impl LayerKind {
    /// Returns the layer name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ethernet => "ethernet",
            Self::Ipv4 => "ipv4",
        }
    }

    /// Returns the type of `field`, or `None` when the header lacks it.
    #[must_use]
    pub fn field_type(self, field: &str) -> Option<FieldType> {
        match (self, field) {
            (Self::Ethernet, "src" | "dst") => Some(FieldType::Mac),
            (Self::Ethernet, "type") | (Self::Ipv4, "len") => Some(FieldType::U16),
            (Self::Ipv4, "src" | "dst") => Some(FieldType::Ipv4),
            (Self::Ipv4, "p") => Some(FieldType::U8),
            _ => None,
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value type of a header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Hardware address.
    Mac,
    /// IPv4 address.
    Ipv4,
    /// Unsigned byte.
    U8,
    /// Unsigned 16-bit integer.
    U16,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mac => "a MAC address",
            Self::Ipv4 => "an IPv4 address",
            Self::U8 => "an 8-bit integer",
            Self::U16 => "a 16-bit integer",
        })
    }
}

/// Value assigned to a header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Hardware address.
    Mac(MacAddress),
    /// IPv4 address.
    Ipv4(Ipv4Addr),
    /// Unsigned byte.
    U8(u8),
    /// Unsigned 16-bit integer.
    U16(u16),
}

impl FieldValue {
    /// Returns the value's type.
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        match self {
            Self::Mac(_) => FieldType::Mac,
            Self::Ipv4(_) => FieldType::Ipv4,
            Self::U8(_) => FieldType::U8,
            Self::U16(_) => FieldType::U16,
        }
    }
}

impl From<MacAddress> for FieldValue {
    fn from(value: MacAddress) -> Self {
        Self::Mac(value)
    }
}

impl From<Ipv4Addr> for FieldValue {
    fn from(value: Ipv4Addr) -> Self {
        Self::Ipv4(value)
    }
}

impl From<u8> for FieldValue {
    fn from(value: u8) -> Self {
        Self::U8(value)
    }
}

impl From<u16> for FieldValue {
    fn from(value: u16) -> Self {
        Self::U16(value)
    }
}

/// A named protocol layer with its assigned fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer {
    name: String,
    kind: LayerKind,
    fields: BTreeMap<String, FieldValue>,
}

impl Layer {
    /// Creates an empty layer.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: BTreeMap::new(),
        }
    }

    /// Returns the layer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the header kind.
    #[must_use]
    pub const fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Returns the value assigned to `field`.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<FieldValue> {
        self.fields.get(field).copied()
    }

    /// Assigns `value` to `field`, replacing any earlier value.
    ///
    /// # Errors
    ///
    /// Returns [`StreamDomainError::UnknownField`] when the header has no
    /// such field, or [`StreamDomainError::FieldTypeMismatch`] when the
    /// value has the wrong type.
    pub fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), StreamDomainError> {
        let expected =
            self.kind
                .field_type(field)
                .ok_or_else(|| StreamDomainError::UnknownField {
                    kind: self.kind,
                    field: field.to_owned(),
                })?;
        let actual = value.field_type();
        if expected != actual {
            return Err(StreamDomainError::FieldTypeMismatch {
                kind: self.kind,
                field: field.to_owned(),
                expected,
                actual,
            });
        }
        self.fields.insert(field.to_owned(), value);
        Ok(())
    }
}
