//! Identifiers for masked fields.
//!
//! A form (add contact, edit contact, business profile) holds one or more
//! phone fields. `FieldId` keys them inside a
//! [`MaskedInputStore`](crate::MaskedInputStore); the value carries no meaning
//! beyond identity, so hosts map their own widget ids onto it.

use std::fmt;

/// Opaque, copyable handle for one masked field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(u32);

impl FieldId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for FieldId {
    #[inline]
    fn from(raw: u32) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_id_display() {
        assert_eq!(FieldId::new(7).to_string(), "field#7");
    }

    #[test]
    fn field_ids_key_a_set() {
        use std::collections::HashSet;

        let set: HashSet<FieldId> = [1u32, 2, 1].into_iter().map(FieldId::from).collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&FieldId::new(2)));
    }
}
