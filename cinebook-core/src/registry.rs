use std::collections::{BTreeMap, HashSet};
use std::fmt::Write as _;
use std::sync::Arc;

use crate::error::StoreError;
use crate::EOL;

/// Registry assigning unique, strictly increasing numeric ids to unique
/// names. Used once for movies and once for theaters.
///
/// Ids start at 1 and are never reused or reassigned; names are immutable
/// once inserted. Entries are only ever created through a bulk [`add`]
/// and only ever removed all at once through [`clear`].
///
/// [`add`]: IdRegistry::add
/// [`clear`]: IdRegistry::clear
#[derive(Debug)]
pub struct IdRegistry {
    next_id: u64,
    entries: BTreeMap<u64, String>,
    names: HashSet<String>,
    listing: Arc<str>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            entries: BTreeMap::new(),
            names: HashSet::new(),
            listing: Arc::from(""),
        }
    }

    /// Adds a batch of names, assigning each the next unused id.
    ///
    /// All-or-nothing: if any name is already registered the whole batch
    /// is rejected with `AlreadyExists` and the registry is unchanged.
    /// The returned ids are in no particular correspondence with the
    /// iteration order of the input set.
    pub fn add(&mut self, names: HashSet<String>) -> Result<Vec<u64>, StoreError> {
        if let Some(dup) = names.iter().find(|name| self.names.contains(*name)) {
            return Err(StoreError::AlreadyExists(dup.clone()));
        }

        let mut inserted = Vec::with_capacity(names.len());
        for name in names {
            let id = self.next_id;
            self.next_id += 1;
            self.names.insert(name.clone());
            self.entries.insert(id, name);
            inserted.push(id);
        }

        self.rebuild_listing();
        Ok(inserted)
    }

    /// Looks up the name registered under `id`.
    pub fn name(&self, id: u64) -> Result<&str, StoreError> {
        self.entries
            .get(&id)
            .map(String::as_str)
            .ok_or(StoreError::NotFound(id))
    }

    pub fn has(&self, id: u64) -> bool {
        self.entries.contains_key(&id)
    }

    /// All ids in ascending order. Uncached, costs O(n).
    pub fn sorted_ids(&self) -> Vec<u64> {
        self.entries.keys().copied().collect()
    }

    /// Cached listing, one `id,name` line per entry in ascending id
    /// order, each line terminated with `\r\n`.
    pub fn listing(&self) -> Arc<str> {
        Arc::clone(&self.listing)
    }

    /// Removes every entry. The next [`add`](IdRegistry::add) assigns
    /// ids starting from 1 again.
    pub fn clear(&mut self) {
        self.next_id = 1;
        self.entries.clear();
        self.names.clear();
        self.rebuild_listing();
    }

    fn rebuild_listing(&mut self) {
        let mut out = String::new();
        for (id, name) in &self.entries {
            let _ = write!(out, "{id},{name}{EOL}");
        }
        self.listing = Arc::from(out);
    }
}

impl Default for IdRegistry {
    fn default() -> Self {
        Self::new()
    }
}
