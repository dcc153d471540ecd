//! Tag parameter decoding.
//!
//! Two families are supported:
//!
//! - `TagSpecification.N.ResourceType` with `TagSpecification.N.Tags.M.Key` /
//!   `.Value` (the singular `Tag.M` spelling is accepted identically)
//! - flat `Tag.N.Key` / `Tag.N.Value` lists used by `CreateTags` and `DeleteTags`

use std::collections::BTreeMap;

use ruststack_ec2_model::types::{Tag, TagSpecification};

use crate::index::{group_by_index, split_index};
use crate::params::QueryParams;

/// Default prefix of the tag specification family.
pub const TAG_SPECIFICATION_PREFIX: &str = "TagSpecification";

/// Default prefix of the flat tag family.
pub const TAG_PREFIX: &str = "Tag";

#[derive(Debug, Default)]
struct TagSlot<'a> {
    key: Option<&'a str>,
    value: Option<&'a str>,
}

impl<'a> TagSlot<'a> {
    fn set(&mut self, field: &str, value: &'a str) {
        match field {
            "Key" => self.key = Some(value),
            "Value" => self.value = Some(value),
            _ => {}
        }
    }

    fn merge(&mut self, other: TagSlot<'a>) {
        if other.key.is_some() {
            self.key = other.key;
        }
        if other.value.is_some() {
            self.value = other.value;
        }
    }
}

/// Turn `M -> slot` into tags, dropping slots that have no key.
fn into_tags(slots: BTreeMap<usize, TagSlot<'_>>) -> Vec<Tag> {
    slots
        .into_iter()
        .filter_map(|(index, slot)| {
            let Some(key) = slot.key else {
                tracing::debug!(index, "skipping tag without a key");
                return None;
            };
            Some(Tag {
                key: key.to_owned(),
                value: slot.value.map(ToOwned::to_owned),
            })
        })
        .collect()
}

/// Record `M.Key` / `M.Value` into `slots`.
fn record_tag_field<'a>(slots: &mut BTreeMap<usize, TagSlot<'a>>, rest: &str, value: &'a str) {
    if let Some((m, Some(field))) = split_index(rest) {
        slots.entry(m).or_default().set(field, value);
    }
}

impl QueryParams {
    /// Decode the tag specifications under `TagSpecification`.
    #[must_use]
    pub fn parse_tag_specifications(&self) -> Vec<TagSpecification> {
        self.parse_tag_specifications_with_prefix(TAG_SPECIFICATION_PREFIX)
    }

    /// Decode the tag specifications under `prefix`.
    ///
    /// One specification is produced per index `N`, in ascending order, with
    /// its tags ordered by `M`. When `Tags.M` and `Tag.M` both fill the same
    /// field, the `Tags.M` value wins.
    #[must_use]
    pub fn parse_tag_specifications_with_prefix(&self, prefix: &str) -> Vec<TagSpecification> {
        group_by_index(self, prefix)
            .into_values()
            .map(|fields| {
                let mut resource_type = None;
                let mut plural = BTreeMap::new();
                let mut singular = BTreeMap::new();

                for (field, value) in fields {
                    if field == "ResourceType" {
                        resource_type = Some(value.to_owned());
                    } else if let Some(rest) = field.strip_prefix("Tags.") {
                        record_tag_field(&mut plural, rest, value);
                    } else if let Some(rest) = field.strip_prefix("Tag.") {
                        record_tag_field(&mut singular, rest, value);
                    }
                }

                for (m, slot) in plural {
                    singular.entry(m).or_insert_with(TagSlot::default).merge(slot);
                }

                TagSpecification {
                    resource_type,
                    tags: into_tags(singular),
                }
            })
            .collect()
    }

    /// Decode a flat `Tag.N.Key` / `Tag.N.Value` list.
    #[must_use]
    pub fn parse_tag_list(&self) -> Vec<Tag> {
        self.parse_tag_list_with_prefix(TAG_PREFIX)
    }

    /// Decode a flat `prefix.N.Key` / `prefix.N.Value` list.
    #[must_use]
    pub fn parse_tag_list_with_prefix(&self, prefix: &str) -> Vec<Tag> {
        let slots = group_by_index(self, prefix)
            .into_iter()
            .map(|(index, fields)| {
                let mut slot = TagSlot::default();
                for (field, value) in fields {
                    slot.set(field, value);
                }
                (index, slot)
            })
            .collect();
        into_tags(slots)
    }
}
