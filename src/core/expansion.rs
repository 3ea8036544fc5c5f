/// Scene expansion — which scenes of the reading view are open, and the
/// port through which that set is persisted.
use rustc_hash::FxHashSet;
use std::path::PathBuf;
use thiserror::Error;

use crate::schema::scene::SceneId;
use crate::schema::script::Script;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON serialization error: {0}")]
    RonWrite(#[from] ron::Error),
}

/// Storage for the expanded-scene preference. Implemented by whatever the
/// host environment offers; the core never assumes a medium.
pub trait ExpansionStore {
    fn load(&self) -> Result<Vec<SceneId>, StoreError>;
    fn save(&mut self, expanded: &[SceneId]) -> Result<(), StoreError>;
}

impl<S: ExpansionStore + ?Sized> ExpansionStore for Box<S> {
    fn load(&self) -> Result<Vec<SceneId>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, expanded: &[SceneId]) -> Result<(), StoreError> {
        (**self).save(expanded)
    }
}

/// Keeps the preference in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Vec<SceneId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_saved(saved: Vec<SceneId>) -> Self {
        Self { saved }
    }
}

impl ExpansionStore for MemoryStore {
    fn load(&self) -> Result<Vec<SceneId>, StoreError> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, expanded: &[SceneId]) -> Result<(), StoreError> {
        self.saved = expanded.to_vec();
        Ok(())
    }
}

/// Persists the preference as a RON list in a file. A missing file loads
/// as "nothing expanded".
#[derive(Debug, Clone)]
pub struct RonFileStore {
    path: PathBuf,
}

impl RonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ExpansionStore for RonFileStore {
    fn load(&self) -> Result<Vec<SceneId>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(ron::from_str(&contents)?)
    }

    fn save(&mut self, expanded: &[SceneId]) -> Result<(), StoreError> {
        let contents = ron::to_string(expanded)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// The set of expanded scenes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneExpansion {
    expanded: FxHashSet<SceneId>,
}

impl SceneExpansion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = SceneId>,
    {
        Self {
            expanded: ids.into_iter().collect(),
        }
    }

    pub fn is_expanded(&self, id: &SceneId) -> bool {
        self.expanded.contains(id)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Open a closed scene or close an open one. Returns the new state.
    pub fn toggle(&mut self, id: &SceneId) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    pub fn expand(&mut self, id: &SceneId) {
        self.expanded.insert(id.clone());
    }

    pub fn collapse(&mut self, id: &SceneId) {
        self.expanded.remove(id);
    }

    /// Open every scene, e.g. before printing.
    pub fn expand_all(&mut self, script: &Script) {
        self.expanded = script.scenes.iter().map(|s| s.id.clone()).collect();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Replace the open set with `ids`.
    pub fn replace<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = SceneId>,
    {
        self.expanded = ids.into_iter().collect();
    }

    /// Open ids in document order. Ids not belonging to `script` are
    /// dropped.
    pub fn ids_in_order(&self, script: &Script) -> Vec<SceneId> {
        script
            .scenes
            .iter()
            .filter(|s| self.expanded.contains(&s.id))
            .map(|s| s.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::two_scene_script;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("script-engine-{}-{}.ron", name, std::process::id()))
    }

    #[test]
    fn toggle_opens_then_closes() {
        let mut expansion = SceneExpansion::new();
        let s1 = SceneId::from("s1");
        assert!(expansion.toggle(&s1));
        assert!(expansion.is_expanded(&s1));
        assert!(!expansion.toggle(&s1));
        assert!(!expansion.is_expanded(&s1));
    }

    #[test]
    fn expand_is_idempotent() {
        let mut expansion = SceneExpansion::new();
        let s1 = SceneId::from("s1");
        expansion.expand(&s1);
        expansion.expand(&s1);
        assert_eq!(expansion.len(), 1);
        expansion.collapse(&s1);
        assert!(expansion.is_empty());
    }

    #[test]
    fn expand_all_and_order() {
        let script = two_scene_script();
        let mut expansion = SceneExpansion::from_ids([SceneId::from("s2"), SceneId::from("gone")]);
        assert_eq!(expansion.ids_in_order(&script), vec![SceneId::from("s2")]);

        expansion.expand_all(&script);
        assert_eq!(
            expansion.ids_in_order(&script),
            vec![SceneId::from("s1"), SceneId::from("s2")]
        );

        expansion.collapse_all();
        assert!(expansion.is_empty());
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());
        store.save(&[SceneId::from("s1")]).unwrap();
        assert_eq!(store.load().unwrap(), vec![SceneId::from("s1")]);
    }

    #[test]
    fn ron_file_store_round_trip() {
        let path = temp_path("round-trip");
        let mut store = RonFileStore::new(&path);
        assert!(store.load().unwrap().is_empty());

        store.save(&[SceneId::from("s1"), SceneId::from("s2")]).unwrap();
        let loaded = RonFileStore::new(&path).load().unwrap();
        assert_eq!(loaded, vec![SceneId::from("s1"), SceneId::from("s2")]);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn ron_file_store_reports_corrupt_file() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not ron at all [").unwrap();
        assert!(matches!(RonFileStore::new(&path).load(), Err(StoreError::Ron(_))));
        std::fs::remove_file(&path).unwrap();
    }
}
