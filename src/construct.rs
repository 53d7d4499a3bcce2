use std::sync::Arc;

// committed stores are read by many while a single extractor writes
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::RwLock;

// other keepers use HashMap
use core::hash::BuildHasherDefault;
use seahash::SeaHasher;
use std::collections::HashMap;

// our own stuff that we need
use crate::datatype::{Entity, latest_position};
use crate::error::Result;

// keys are identifiers or reference strings
pub type OtherHasher = BuildHasherDefault<SeaHasher>;

// ------------- EntityIndex -------------
/// One entity per id. Colliding ids overwrite, they are never merged.
#[derive(Debug)]
pub struct EntityIndex<V: Entity> {
    kept: DashMap<String, Arc<V>, OtherHasher>,
}
impl<V: Entity> EntityIndex<V> {
    pub fn new() -> Self {
        Self {
            kept: DashMap::default(),
        }
    }
    pub fn get(&self, id: &str) -> Option<Arc<V>> {
        self.kept.get(id).map(|kept| Arc::clone(kept.value()))
    }
    pub fn all(&self) -> Vec<Arc<V>> {
        self.kept.iter().map(|kept| Arc::clone(kept.value())).collect()
    }
    pub fn put(&self, id: impl Into<String>, entity: V) {
        self.kept.insert(id.into(), Arc::new(entity));
    }
    pub fn put_all(&self, entities: impl IntoIterator<Item = V>) {
        for entity in entities {
            self.kept.insert(entity.id().to_owned(), Arc::new(entity));
        }
    }
    pub fn remove(&self, id: &str) {
        self.kept.remove(id);
    }
    pub fn contains(&self, id: &str) -> bool {
        self.kept.contains_key(id)
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}
impl<V: Entity> Default for EntityIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

// ------------- VersionedEntityIndex -------------
// The latest position is computed when a version set is stored, so reading the
// latest version never parses a marker.
#[derive(Debug)]
struct Versions<V> {
    all: Vec<Arc<V>>,
    latest: usize,
}
impl<V: Entity> Versions<V> {
    fn new(all: Vec<Arc<V>>) -> Result<Option<Self>> {
        let latest = latest_position(all.iter().map(|version| version.as_ref()))?;
        Ok(latest.map(|latest| Self { all, latest }))
    }
    fn latest(&self) -> &Arc<V> {
        &self.all[self.latest]
    }
}

/// Every version ever stored per id, plus a cached latest version.
#[derive(Debug)]
pub struct VersionedEntityIndex<V: Entity> {
    kept: DashMap<String, Versions<V>, OtherHasher>,
}
impl<V: Entity> VersionedEntityIndex<V> {
    pub fn new() -> Self {
        Self {
            kept: DashMap::default(),
        }
    }
    pub fn latest_version(&self, id: &str) -> Option<Arc<V>> {
        self.kept
            .get(id)
            .map(|versions| Arc::clone(versions.latest()))
    }
    pub fn get(&self, id: &str) -> Option<Arc<V>> {
        self.latest_version(id)
    }
    pub fn version(&self, id: &str, version: &str) -> Option<Arc<V>> {
        let versions = self.kept.get(id)?;
        versions
            .all
            .iter()
            .find(|kept| kept.version() == Some(version))
            .cloned()
    }
    pub fn latest_versions(&self) -> Vec<Arc<V>> {
        self.kept
            .iter()
            .map(|versions| Arc::clone(versions.latest()))
            .collect()
    }
    pub fn all_versions(&self, id: &str) -> Vec<Arc<V>> {
        self.kept
            .get(id)
            .map(|versions| versions.all.clone())
            .unwrap_or_default()
    }
    pub fn all_versions_by_id(&self) -> HashMap<String, Vec<Arc<V>>> {
        self.kept
            .iter()
            .map(|versions| (versions.key().clone(), versions.all.clone()))
            .collect()
    }
    /// Replaces the complete version set of `id`. An empty set removes it.
    pub fn put(&self, id: impl Into<String>, versions: Vec<V>) -> Result<()> {
        let id = id.into();
        match Versions::new(versions.into_iter().map(Arc::new).collect())? {
            Some(versions) => {
                self.kept.insert(id, versions);
            }
            None => {
                self.kept.remove(&id);
            }
        }
        Ok(())
    }
    /// Groups by id and replaces per id. Ids absent from the batch are untouched.
    pub fn put_all(&self, entities: impl IntoIterator<Item = V>) -> Result<()> {
        for (id, versions) in group_by_id(entities) {
            self.put(id, versions)?;
        }
        Ok(())
    }
    /// Adds versions to those already stored. A version string that is already
    /// stored for the id is replaced in place. Each id is merged under its
    /// entry lock, so concurrent merges into one id keep every version.
    pub fn merge_all(&self, entities: impl IntoIterator<Item = V>) -> Result<()> {
        for (id, incoming) in group_by_id(entities) {
            match self.kept.entry(id) {
                Entry::Occupied(mut kept) => {
                    let all = merged(kept.get().all.clone(), incoming);
                    if let Some(versions) = Versions::new(all)? {
                        kept.insert(versions);
                    }
                }
                Entry::Vacant(vacant) => {
                    if let Some(versions) = Versions::new(merged(Vec::new(), incoming))? {
                        vacant.insert(versions);
                    }
                }
            }
        }
        Ok(())
    }
    pub fn remove(&self, id: &str) {
        self.kept.remove(id);
    }
    pub fn contains(&self, id: &str) -> bool {
        self.kept.contains_key(id)
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}
impl<V: Entity> Default for VersionedEntityIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

// same version string replaces in place, new ones append
fn merged<V: Entity>(mut all: Vec<Arc<V>>, incoming: Vec<V>) -> Vec<Arc<V>> {
    for version in incoming {
        match all
            .iter()
            .position(|kept| kept.version() == version.version())
        {
            Some(position) => all[position] = Arc::new(version),
            None => all.push(Arc::new(version)),
        }
    }
    all
}

// first appearance of an id decides its place, versions keep document order
fn group_by_id<V: Entity>(entities: impl IntoIterator<Item = V>) -> Vec<(String, Vec<V>)> {
    let mut positions: HashMap<String, usize, OtherHasher> = HashMap::default();
    let mut groups: Vec<(String, Vec<V>)> = Vec::new();
    for entity in entities {
        match positions.get(entity.id()) {
            Some(&position) => groups[position].1.push(entity),
            None => {
                positions.insert(entity.id().to_owned(), groups.len());
                groups.push((entity.id().to_owned(), vec![entity]));
            }
        }
    }
    groups
}

// ------------- RelationMap -------------
/// Reference string to a single id, last write wins.
#[derive(Debug, Default)]
pub struct RelationMap {
    kept: DashMap<String, String, OtherHasher>,
}
impl RelationMap {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn get(&self, key: &str) -> Option<String> {
        self.kept.get(key).map(|value| value.value().clone())
    }
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.kept.insert(key.into(), value.into());
    }
    pub fn put_all(&self, entries: impl IntoIterator<Item = (String, String)>) {
        for (key, value) in entries {
            self.kept.insert(key, value);
        }
    }
    pub fn remove(&self, key: &str) {
        self.kept.remove(key);
    }
    pub fn entries(&self) -> Vec<(String, String)> {
        self.kept
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

// ------------- Lookup -------------
/// One-to-many and append-only. Equal values are all kept.
#[derive(Debug)]
pub struct Lookup<V> {
    index: DashMap<String, Vec<Arc<V>>, OtherHasher>,
}
impl<V> Lookup<V> {
    pub fn new() -> Self {
        Self {
            index: DashMap::default(),
        }
    }
    pub fn insert(&self, key: impl Into<String>, value: Arc<V>) {
        // the entry guard holds the shard lock, so concurrent appends are not lost
        self.index.entry(key.into()).or_default().push(value);
    }
    pub fn put_all(&self, entries: impl IntoIterator<Item = (String, Vec<Arc<V>>)>) {
        for (key, values) in entries {
            self.index.entry(key).or_default().extend(values);
        }
    }
    pub fn lookup(&self, key: &str) -> Vec<Arc<V>> {
        self.index
            .get(key)
            .map(|values| values.value().clone())
            .unwrap_or_default()
    }
    pub fn keys(&self) -> Vec<String> {
        self.index.iter().map(|entry| entry.key().clone()).collect()
    }
    pub fn remove(&self, key: &str) {
        self.index.remove(key);
    }
    pub fn len(&self) -> usize {
        self.index.len()
    }
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
impl<V> Default for Lookup<V> {
    fn default() -> Self {
        Self::new()
    }
}

// ------------- StagedLookup -------------
/// Unshared multimap an extractor fills while it parses one frame.
#[derive(Debug)]
pub struct StagedLookup<V> {
    index: HashMap<String, Vec<Arc<V>>, OtherHasher>,
}
impl<V> StagedLookup<V> {
    pub fn new() -> Self {
        Self {
            index: HashMap::default(),
        }
    }
    pub fn insert(&mut self, key: impl Into<String>, value: Arc<V>) {
        self.index.entry(key.into()).or_default().push(value);
    }
    pub fn len(&self) -> usize {
        self.index.len()
    }
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
    pub fn commit(self, into: &Lookup<V>) {
        into.put_all(self.index);
    }
}
impl<V> Default for StagedLookup<V> {
    fn default() -> Self {
        Self::new()
    }
}

// ------------- FrameCollection -------------
/// The frames of one kind, in the order they were walked.
#[derive(Debug)]
pub struct FrameCollection<T> {
    kept: RwLock<Vec<Arc<T>>>,
}
impl<T> FrameCollection<T> {
    pub fn new() -> Self {
        Self {
            kept: RwLock::new(Vec::new()),
        }
    }
    pub fn keep(&self, frame: Arc<T>) {
        self.kept.write().push(frame);
    }
    pub fn all(&self) -> Vec<Arc<T>> {
        self.kept.read().clone()
    }
    pub fn len(&self) -> usize {
        self.kept.read().len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.read().is_empty()
    }
}
impl<T> Default for FrameCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}
