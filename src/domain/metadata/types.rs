// SPDX-License-Identifier: MPL-2.0
//! Metadata domain types.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

// =============================================================================
// MetadataValue
// =============================================================================

/// A loosely-typed metadata value.
///
/// Decoders expose numbers, strings and flags; a field the decoder knows about
/// but cannot fill is reported as [`MetadataValue::Absent`].
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Number(f64),
    Text(String),
    Boolean(bool),
    /// The field exists in the schema but the source does not provide it.
    Absent,
}

impl MetadataValue {
    /// Returns the numeric value, if any.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetadataValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text value, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean value, if any.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetadataValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Number(n) => write!(f, "{n}"),
            MetadataValue::Text(s) => f.write_str(s),
            MetadataValue::Boolean(b) => write!(f, "{b}"),
            MetadataValue::Absent => f.write_str("N/A"),
        }
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Number(value)
    }
}

impl From<u32> for MetadataValue {
    fn from(value: u32) -> Self {
        MetadataValue::Number(f64::from(value))
    }
}

impl From<usize> for MetadataValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: usize) -> Self {
        MetadataValue::Number(value as f64)
    }
}

impl From<i64> for MetadataValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        MetadataValue::Number(value as f64)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Boolean(value)
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl<T: Into<MetadataValue>> From<Option<T>> for MetadataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(MetadataValue::Absent, Into::into)
    }
}

// =============================================================================
// MetadataRecord
// =============================================================================

/// Descriptive fields extracted from one file.
///
/// Each record is shaped independently; a missing key is normal. Keys are kept
/// sorted so reports are stable from run to run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRecord {
    fields: BTreeMap<String, MetadataValue>,
}

impl MetadataRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetadataValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Sets `key` only when `value` is present; `None` leaves the record untouched.
    pub fn insert_some<T: Into<MetadataValue>>(
        &mut self,
        key: impl Into<String>,
        value: Option<T>,
    ) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, MetadataValue> {
        self.fields.iter()
    }
}

impl<'a> IntoIterator for &'a MetadataRecord {
    type Item = (&'a String, &'a MetadataValue);
    type IntoIter = btree_map::Iter<'a, String, MetadataValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

// =============================================================================
// FourCc
// =============================================================================

/// A four-character code such as `avc1` or `hvc1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FourCc([u8; 4]);

impl FourCc {
    /// Splits a packed value whose first character sits in the low byte,
    /// as `FFmpeg` stores `codec_tag`.
    #[must_use]
    pub fn from_le_u32(value: u32) -> Self {
        Self(value.to_le_bytes())
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            let c = if byte.is_ascii_graphic() || byte == b' ' {
                char::from(byte)
            } else {
                '?'
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_display() {
        assert_eq!(MetadataValue::Number(200.0).to_string(), "200");
        assert_eq!(MetadataValue::Number(29.97).to_string(), "29.97");
        assert_eq!(MetadataValue::from("Red").to_string(), "Red");
        assert_eq!(MetadataValue::Boolean(true).to_string(), "true");
        assert_eq!(MetadataValue::Absent.to_string(), "N/A");
    }

    #[test]
    fn value_from_option() {
        assert_eq!(MetadataValue::from(None::<u32>), MetadataValue::Absent);
        assert_eq!(MetadataValue::from(Some(5u32)), MetadataValue::Number(5.0));
    }

    #[test]
    fn value_accessors() {
        assert_eq!(MetadataValue::Number(3.0).as_number(), Some(3.0));
        assert_eq!(MetadataValue::from("x").as_text(), Some("x"));
        assert_eq!(MetadataValue::Boolean(false).as_bool(), Some(false));
        assert_eq!(MetadataValue::Absent.as_number(), None);
    }

    #[test]
    fn record_insert_and_get() {
        let mut record = MetadataRecord::new();
        record.insert("width", 1920u32);
        record.insert("codec", "avc1");
        record.insert_some("label", None::<String>);

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("width"), Some(&MetadataValue::Number(1920.0)));
        assert!(!record.contains_key("label"));
    }

    #[test]
    fn record_iterates_in_key_order() {
        let mut record = MetadataRecord::new();
        record.insert("zeta", 1u32);
        record.insert("alpha", 2u32);
        let keys: Vec<&str> = record.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "zeta"]);
    }

    #[test]
    fn fourcc_from_ffmpeg_codec_tag() {
        // MKTAG('h','v','c','1')
        let tag = u32::from(b'h')
            | u32::from(b'v') << 8
            | u32::from(b'c') << 16
            | u32::from(b'1') << 24;
        assert_eq!(FourCc::from_le_u32(tag).to_string(), "hvc1");
        assert_eq!(
            FourCc::from_le_u32(u32::from_le_bytes(*b"avc1")).to_string(),
            "avc1"
        );
    }

    #[test]
    fn fourcc_replaces_unprintable_bytes() {
        assert_eq!(FourCc::from_le_u32(0x4100_0000).to_string(), "???A");
    }
}
