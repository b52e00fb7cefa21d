//! Ordered, uri-key-unique collections of entities and their grouping.

use crate::PanelError;
use panelkit_model::{Element, ModelError, RequestContext};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Bucket for entities that declare no group.
pub const DEFAULT_GROUP: &str = "Default";

/// A named menu bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group<T> {
    pub name: String,
    pub items: Vec<T>,
}

/// Buckets `items` by group name.
///
/// Buckets are ordered case-insensitively by name with `default_group` last;
/// an item without a group lands in `default_group`. Items keep their
/// relative order when `name_of` ties.
pub fn partition<T, G, N>(
    items: impl IntoIterator<Item = T>,
    default_group: &str,
    group_of: G,
    name_of: N,
) -> Vec<Group<T>>
where
    G: Fn(&T) -> Option<String>,
    N: Fn(&T) -> String,
{
    let default_key = default_group.to_lowercase();
    // Keyed by lowercased name; the first spelling seen is the one shown.
    let mut buckets: BTreeMap<String, Group<T>> = BTreeMap::new();
    let mut default_bucket = Group {
        name: default_group.to_string(),
        items: Vec::new(),
    };

    for item in items {
        let group = group_of(&item).filter(|g| !g.trim().is_empty());
        match group {
            Some(name) if name.to_lowercase() != default_key => {
                buckets
                    .entry(name.to_lowercase())
                    .or_insert_with(|| Group {
                        name,
                        items: Vec::new(),
                    })
                    .items
                    .push(item);
            }
            _ => default_bucket.items.push(item),
        }
    }

    let mut groups: Vec<Group<T>> = buckets.into_values().collect();
    if !default_bucket.items.is_empty() {
        groups.push(default_bucket);
    }
    for group in &mut groups {
        group.items.sort_by_cached_key(|item| name_of(item).to_lowercase());
    }
    groups
}

/// Entities of one kind in registration order.
#[derive(Debug)]
pub struct Registry<E: Element> {
    entries: Vec<E>,
}

impl<E: Element> Default for Registry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Element> Registry<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends entities in order.
    ///
    /// All-or-nothing: if any uri key collides with an existing entry or
    /// with another entity in the same batch, nothing is added.
    pub fn register<I>(&mut self, entities: I) -> Result<(), PanelError>
    where
        I: IntoIterator<Item = E>,
    {
        let batch: Vec<E> = entities.into_iter().collect();
        let mut seen: HashSet<String> = self.entries.iter().map(|e| e.uri_key()).collect();

        for entity in &batch {
            let uri_key = entity.uri_key();
            if !seen.insert(uri_key.clone()) {
                return Err(PanelError::DuplicateUriKey {
                    kind: E::KIND,
                    uri_key,
                });
            }
        }

        self.entries.extend(batch);
        Ok(())
    }

    pub fn find(&self, uri_key: &str) -> Option<&E> {
        self.entries.iter().find(|e| e.uri_key() == uri_key)
    }

    pub fn get(&self, uri_key: &str) -> Result<&E, PanelError> {
        self.find(uri_key).ok_or_else(|| PanelError::NotFound {
            kind: E::KIND,
            uri_key: uri_key.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, uri_key: &str) -> bool {
        self.find(uri_key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// First validation failure in registration order.
    pub fn validate_all(&self) -> Result<(), ModelError> {
        self.entries.iter().try_for_each(|e| e.validate())
    }

    /// Entities visible to `ctx`, in registration order.
    pub fn authorized(&self, ctx: &RequestContext) -> Vec<&E> {
        self.entries.iter().filter(|e| e.authorize(ctx)).collect()
    }

    /// Every entity, with ungrouped ones under [`DEFAULT_GROUP`].
    pub fn grouped(&self) -> Vec<Group<&E>> {
        self.grouped_with_default(DEFAULT_GROUP)
    }

    pub fn grouped_with_default(&self, default_group: &str) -> Vec<Group<&E>> {
        partition(
            self.entries.iter(),
            default_group,
            |e| e.group().map(str::to_string),
            |e| e.name(),
        )
    }
}

impl<'a, E: Element> IntoIterator for &'a Registry<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
