//! Dynamic tech collection
//!
//! Entries live in an arena keyed by a stable [`EntryId`]; a separate ordered
//! index of ids decides display and validation order. Removing or moving an
//! entry only touches the index, so every other entry keeps its identity.
//! Validation never sees the ids: [`TechCollection::project`] yields plain
//! [`RawTech`] values in index order.
//!
//! Copyright (c) 2025 Techform Team
//! Licensed under the Apache-2.0 license

use crate::record::{RawKnowledge, RawTech};
use crate::validation::error::{FieldError, FieldPath, ValidationErrors};
use crate::validation::fields;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a collection entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tech:{}", self.0)
    }
}

/// Editable sub-field of a tech entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechField {
    Title,
    Knowledge,
}

impl TechField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TechField::Title => fields::TITLE,
            TechField::Knowledge => fields::KNOWLEDGE,
        }
    }
}

/// Read-only view of one entry, in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionEntry {
    pub id: EntryId,
    pub title: String,
    pub knowledge: RawKnowledge,
}

impl CollectionEntry {
    /// Drop the identifier, keeping what validation sees
    pub fn to_raw(&self) -> RawTech {
        RawTech {
            title: self.title.clone(),
            knowledge: self.knowledge.clone(),
        }
    }
}

/// Ordered, stable-id keyed list of techs backing the form
#[derive(Debug, Clone, Default)]
pub struct TechCollection {
    slots: HashMap<EntryId, RawTech>,
    order: Vec<EntryId>,
}

impl TechCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection, one fresh id per value
    pub fn with_entries<I: IntoIterator<Item = RawTech>>(entries: I) -> Self {
        let mut collection = Self::new();
        for entry in entries {
            collection.append(entry);
        }
        collection
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Add an entry at the end
    pub fn append(&mut self, initial: RawTech) -> EntryId {
        let id = EntryId::new();
        self.slots.insert(id, initial);
        self.order.push(id);
        tracing::debug!(%id, len = self.order.len(), "tech appended");
        id
    }

    /// Add the blank entry a fresh form row starts with
    pub fn append_default(&mut self) -> EntryId {
        self.append(RawTech::default())
    }

    /// Insert before `position`; positions past the end append
    pub fn insert_at(&mut self, position: usize, initial: RawTech) -> EntryId {
        let id = EntryId::new();
        let position = position.min(self.order.len());
        self.slots.insert(id, initial);
        self.order.insert(position, id);
        tracing::debug!(%id, position, len = self.order.len(), "tech inserted");
        id
    }

    /// Remove the entry at `position`. Out-of-bounds positions are a silent
    /// no-op: a stale index from a delayed click must not fail the form.
    pub fn remove_at(&mut self, position: usize) -> Option<CollectionEntry> {
        if position >= self.order.len() {
            tracing::debug!(position, len = self.order.len(), "remove ignored: position out of bounds");
            return None;
        }

        let id = self.order.remove(position);
        let removed = self.slots.remove(&id).map(|tech| entry(id, tech));
        tracing::debug!(%id, position, len = self.order.len(), "tech removed");
        removed
    }

    /// Remove by identity, wherever the entry currently sits
    pub fn remove(&mut self, id: EntryId) -> Option<CollectionEntry> {
        let position = self.position_of(id)?;
        self.remove_at(position)
    }

    /// Move the entry at `from` so it ends up at `to`. No-op when either is
    /// out of bounds.
    pub fn move_entry(&mut self, from: usize, to: usize) -> bool {
        if from >= self.order.len() || to >= self.order.len() {
            return false;
        }
        let id = self.order.remove(from);
        self.order.insert(to, id);
        tracing::debug!(%id, from, to, "tech moved");
        true
    }

    /// Current display position of `id`
    pub fn position_of(&self, id: EntryId) -> Option<usize> {
        self.order.iter().position(|candidate| *candidate == id)
    }

    pub fn id_at(&self, position: usize) -> Option<EntryId> {
        self.order.get(position).copied()
    }

    pub fn get(&self, id: EntryId) -> Option<CollectionEntry> {
        self.slots.get(&id).map(|tech| entry(id, tech.clone()))
    }

    /// Edit an entry in place. Returns false for unknown ids.
    pub fn update<F: FnOnce(&mut RawTech)>(&mut self, id: EntryId, edit: F) -> bool {
        match self.slots.get_mut(&id) {
            Some(tech) => {
                edit(tech);
                true
            }
            None => false,
        }
    }

    pub fn set_title<T: Into<String>>(&mut self, id: EntryId, title: T) -> bool {
        let title = title.into();
        self.update(id, |tech| tech.title = title)
    }

    pub fn set_knowledge<K: Into<RawKnowledge>>(&mut self, id: EntryId, knowledge: K) -> bool {
        let knowledge = knowledge.into();
        self.update(id, |tech| tech.knowledge = knowledge)
    }

    /// Entries in display order
    pub fn current_entries(&self) -> Vec<CollectionEntry> {
        self.order
            .iter()
            .filter_map(|id| self.slots.get(id).map(|tech| entry(*id, tech.clone())))
            .collect()
    }

    /// The `techs` slice of the next raw record: same length and order as
    /// [`current_entries`](Self::current_entries), ids stripped
    pub fn project(&self) -> Vec<RawTech> {
        self.order
            .iter()
            .filter_map(|id| self.slots.get(id).cloned())
            .collect()
    }

    /// Empty the collection when the hosting session resets
    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
    }

    /// Path of a sub-field of the entry currently at `position`
    pub fn field_path(position: usize, field: TechField) -> FieldPath {
        FieldPath::field(fields::TECHS).child_index(position).child(field.as_str())
    }

    /// Input binding identifier, e.g. `techs.1.knowledge`
    pub fn field_name(position: usize, field: TechField) -> String {
        Self::field_path(position, field).binding_name()
    }

    /// Binding identifier for an entry by identity, derived from its
    /// current position so it stays right after removals
    pub fn field_name_of(&self, id: EntryId, field: TechField) -> Option<String> {
        self.position_of(id).map(|position| Self::field_name(position, field))
    }

    /// Errors addressed to `id`. Error paths are index based, so this is
    /// only meaningful against errors from a pass over the current order.
    pub fn errors_for<'a>(&self, id: EntryId, errors: &'a ValidationErrors) -> Vec<&'a FieldError> {
        match self.position_of(id) {
            Some(position) => Self::errors_at(position, errors),
            None => Vec::new(),
        }
    }

    /// Errors addressed to whichever entry sat at `position` in the pass
    /// that produced `errors`
    pub fn errors_at(position: usize, errors: &ValidationErrors) -> Vec<&FieldError> {
        let prefix = FieldPath::field(fields::TECHS).child_index(position);
        errors.under(&prefix).collect()
    }

    /// Ids in display order
    pub fn ids(&self) -> &[EntryId] {
        &self.order
    }
}

fn entry(id: EntryId, tech: RawTech) -> CollectionEntry {
    CollectionEntry {
        id,
        title: tech.title,
        knowledge: tech.knowledge,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> TechCollection {
        TechCollection::with_entries(vec![
            RawTech::new("Go", "50"),
            RawTech::new("Rust", "80"),
            RawTech::new("Zig", "10"),
        ])
    }

    #[test]
    fn test_append_default_is_blank() {
        let mut collection = TechCollection::new();
        let id = collection.append_default();
        let entry = collection.get(id).unwrap();
        assert_eq!(entry.title, "");
        assert_eq!(entry.knowledge, RawKnowledge::Number(0.0));
    }

    #[test]
    fn test_remove_keeps_other_ids() {
        let mut collection = seeded();
        let ids: Vec<_> = collection.current_entries().iter().map(|e| e.id).collect();

        let removed = collection.remove_at(1).unwrap();
        assert_eq!(removed.id, ids[1]);
        assert_eq!(removed.title, "Rust");

        let remaining: Vec<_> = collection.current_entries().iter().map(|e| e.id).collect();
        assert_eq!(remaining, vec![ids[0], ids[2]]);
        assert_eq!(collection.position_of(ids[2]), Some(1));
    }

    #[test]
    fn test_insert_clamps_to_end() {
        let mut collection = seeded();
        let id = collection.insert_at(99, RawTech::new("C", "5"));
        assert_eq!(collection.position_of(id), Some(3));

        let first = collection.insert_at(0, RawTech::new("Ada", "5"));
        assert_eq!(collection.position_of(first), Some(0));
        assert_eq!(collection.len(), 5);
    }

    #[test]
    fn test_move_entry() {
        let mut collection = seeded();
        let zig = collection.id_at(2).unwrap();
        assert!(collection.move_entry(2, 0));
        assert_eq!(collection.position_of(zig), Some(0));
        assert_eq!(collection.project()[0].title, "Zig");
        assert!(!collection.move_entry(0, 3));
    }

    #[test]
    fn test_update_unknown_id() {
        let mut collection = seeded();
        let id = collection.id_at(0).unwrap();
        assert!(collection.set_title(id, "Golang"));
        assert!(collection.set_knowledge(id, 60u8));
        assert_eq!(collection.get(id).unwrap().title, "Golang");

        collection.remove(id);
        assert!(!collection.set_title(id, "gone"));
        assert!(collection.get(id).is_none());
    }

    #[test]
    fn test_field_names_follow_position() {
        let mut collection = seeded();
        let zig = collection.id_at(2).unwrap();
        assert_eq!(collection.field_name_of(zig, TechField::Title).as_deref(), Some("techs.2.title"));

        collection.remove_at(0);
        assert_eq!(
            collection.field_name_of(zig, TechField::Knowledge).as_deref(),
            Some("techs.1.knowledge")
        );
        assert_eq!(TechCollection::field_name(0, TechField::Title), "techs.0.title");
    }

    #[test]
    fn test_errors_for_uses_current_position() {
        use crate::validation::ErrorKind;

        let collection = seeded();
        let rust = collection.id_at(1).unwrap();
        let mut errors = ValidationErrors::new();
        errors.add(FieldError::new(
            TechCollection::field_path(1, TechField::Knowledge),
            ErrorKind::OutOfRange,
            "Knowledge must be between 1 and 100",
        ));
        errors.add(FieldError::new(
            TechCollection::field_path(2, TechField::Title),
            ErrorKind::Required,
            "Title is required",
        ));

        let found = collection.errors_for(rust, &errors);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, ErrorKind::OutOfRange);
        assert_eq!(TechCollection::errors_at(2, &errors)[0].kind, ErrorKind::Required);
    }

    #[test]
    fn test_clear() {
        let mut collection = seeded();
        collection.clear();
        assert!(collection.is_empty());
        assert!(collection.project().is_empty());
    }
}
