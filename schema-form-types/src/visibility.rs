use std::collections::HashMap;

use serde::Serialize;

use crate::FieldId;

/// Per-field visibility, keyed by field id.
///
/// This is a projection of a form's fields and its current answers. It is
/// never a source of truth: recomputing it from the same answers gives the
/// same map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Visibility {
    entries: HashMap<FieldId, bool>,
}

impl Visibility {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Record a field's visibility, returning the previous entry.
    pub fn set(&mut self, id: FieldId, visible: bool) -> Option<bool> {
        self.entries.insert(id, visible)
    }

    /// The entry for `id`, if the field is known.
    pub fn get(&self, id: &FieldId) -> Option<bool> {
        self.entries.get(id).copied()
    }

    /// Whether the field is shown. Unknown ids are not.
    pub fn is_visible(&self, id: &FieldId) -> bool {
        self.get(id).unwrap_or(false)
    }

    /// Ids of all hidden fields, in no particular order.
    pub fn hidden(&self) -> impl Iterator<Item = &FieldId> {
        self.entries
            .iter()
            .filter(|(_, visible)| !**visible)
            .map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, bool)> {
        self.entries.iter().map(|(id, visible)| (id, *visible))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(FieldId, bool)> for Visibility {
    fn from_iter<T: IntoIterator<Item = (FieldId, bool)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
