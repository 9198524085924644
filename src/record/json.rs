//! Serde wiring for the document model. A tag serializes as an 8-digit hex
//! string (`"30060020"`) so a whole record is a plain JSON object keyed by
//! tag, the same shape the DICOM JSON model uses.

use super::Tag;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

impl Tag {
    /// Parses the 8-hex-digit form, e.g. `"30060020"`.
    pub fn parse(text: &str) -> Option<Tag> {
        if text.len() != 8 || !text.is_ascii() {
            return None;
        }
        let group = u16::from_str_radix(&text[..4], 16).ok()?;
        let element = u16::from_str_radix(&text[4..], 16).ok()?;
        Some(Tag::new(group, element))
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:04x}{:04x}", self.group, self.element))
    }
}

struct TagVisitor;

impl Visitor<'_> for TagVisitor {
    type Value = Tag;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an 8-hex-digit tag string like \"30060020\"")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Tag, E> {
        Tag::parse(value).ok_or_else(|| E::custom(format!("invalid tag string {:?}", value)))
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Tag, D::Error> {
        deserializer.deserialize_str(TagVisitor)
    }
}
