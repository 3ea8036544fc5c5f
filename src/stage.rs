/// The stage: a loaded script plus its configuration, handing out the
/// sessions that drive each surface.
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{ConfigError, StageConfig};
use crate::core::expansion::{ExpansionStore, MemoryStore, RonFileStore};
use crate::core::export::transcript;
use crate::core::flatten::Item;
use crate::core::highlight::{highlight, Segment};
use crate::core::search::{search, SearchResult};
use crate::core::session::{ProjectionSession, ReadingSession, RehearsalSession};
use crate::schema::character::CharacterId;
use crate::schema::script::{Script, ScriptError};

#[derive(Debug, Error)]
pub enum StageError {
    #[error("script error: {0}")]
    Script(#[from] ScriptError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("no script provided")]
    MissingScript,
}

/// A script ready to be read, rehearsed and projected. Built via
/// `Stage::builder()`.
#[derive(Debug, Clone)]
pub struct Stage {
    script: Script,
    config: StageConfig,
}

/// Builder for constructing a `Stage`.
#[derive(Debug, Default)]
pub struct StageBuilder {
    script_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    /// Directly provided script (for testing without files).
    script: Option<Script>,
    /// Directly provided config (for testing without files).
    config: Option<StageConfig>,
}

impl Stage {
    pub fn builder() -> StageBuilder {
        StageBuilder::default()
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        search(&self.script, query)
    }

    pub fn highlight<'t>(&self, text: &'t str, query: &str) -> Vec<Segment<'t>> {
        highlight(text, query)
    }

    /// Color of the character speaking `item`. Stage directions and
    /// unknown characters get the configured fallback.
    pub fn color_of(&self, item: &Item) -> &str {
        match item.content.as_dialogue() {
            Some(dialogue) => self
                .script
                .character_color_or(&dialogue.character_id, &self.config.fallback_color),
            None => &self.config.fallback_color,
        }
    }

    /// A reading session persisting its open scenes in `store`.
    pub fn reading<S: ExpansionStore>(&self, store: S) -> ReadingSession<'_, S> {
        ReadingSession::new(&self.script, store, self.config.result_limit)
    }

    /// A reading session using the store named by the config: the RON
    /// file if one is configured, memory otherwise.
    pub fn reading_with_configured_store(&self) -> ReadingSession<'_, Box<dyn ExpansionStore>> {
        let store: Box<dyn ExpansionStore> = match &self.config.expansion_store {
            Some(path) => Box::new(RonFileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };
        self.reading(store)
    }

    pub fn rehearsal(&self) -> RehearsalSession<'_> {
        RehearsalSession::new(&self.script, self.config.cue_before, self.config.cue_after)
    }

    pub fn projection(&self, filter: Option<CharacterId>) -> ProjectionSession<'_> {
        ProjectionSession::new(&self.script, filter)
    }

    /// Plain-text transcript of the whole play.
    pub fn transcript(&self) -> String {
        transcript(&self.script)
    }
}

impl StageBuilder {
    pub fn script_path(mut self, path: impl AsRef<Path>) -> Self {
        self.script_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Provide the script directly (for testing without files).
    pub fn with_script(mut self, script: Script) -> Self {
        self.script = Some(script);
        self
    }

    /// Provide the config directly (for testing without files).
    pub fn with_config(mut self, config: StageConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// A directly provided script or config wins over a path.
    pub fn build(self) -> Result<Stage, StageError> {
        let script = match (self.script, self.script_path) {
            (Some(script), _) => script,
            (None, Some(path)) => Script::load_from_ron(&path)?,
            (None, None) => return Err(StageError::MissingScript),
        };

        let config = match (self.config, self.config_path) {
            (Some(config), _) => config,
            (None, Some(path)) => StageConfig::load_from_ron(&path)?,
            (None, None) => StageConfig::default(),
        };

        tracing::debug!(
            title = %script.title,
            scenes = script.scenes.len(),
            characters = script.characters.len(),
            "stage built"
        );

        Ok(Stage { script, config })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::two_scene_script;
    use crate::core::flatten::flatten_all;
    use crate::schema::scene::SceneId;

    fn build_test_stage() -> Stage {
        Stage::builder()
            .with_script(two_scene_script())
            .build()
            .unwrap()
    }

    #[test]
    fn builder_requires_a_script() {
        assert!(matches!(
            Stage::builder().build(),
            Err(StageError::MissingScript)
        ));
    }

    #[test]
    fn builder_defaults_config() {
        let stage = build_test_stage();
        assert_eq!(stage.config(), &StageConfig::default());
        assert_eq!(stage.script().title, "Two Scenes");
    }

    #[test]
    fn builder_reports_missing_script_file() {
        let result = Stage::builder()
            .script_path("does/not/exist.ron")
            .build();
        assert!(matches!(
            result,
            Err(StageError::Script(ScriptError::Io(_)))
        ));
    }

    #[test]
    fn builder_with_config() {
        let config = StageConfig {
            result_limit: 1,
            cue_before: 0,
            ..StageConfig::default()
        };
        let stage = Stage::builder()
            .with_script(two_scene_script())
            .with_config(config)
            .build()
            .unwrap();

        let mut reading = stage.reading(MemoryStore::new());
        reading.set_query("xavier");
        assert_eq!(reading.visible_results().len(), 1);

        let mut rehearsal = stage.rehearsal();
        rehearsal.select_character(Some(CharacterId::from("x")));
        rehearsal.next();
        assert!(rehearsal.cues().before.is_empty());
    }

    #[test]
    fn color_of_items() {
        let mut script = two_scene_script();
        script.characters.retain(|c| c.id.as_str() != "y");
        let stage = Stage::builder()
            .with_script(script)
            .with_config(StageConfig {
                fallback_color: "#000000".to_string(),
                ..StageConfig::default()
            })
            .build()
            .unwrap();

        let items = flatten_all(stage.script());
        assert_eq!(stage.color_of(&items[0]), "#000000");
        assert_eq!(stage.color_of(&items[1]), "#ff0000");
        assert_eq!(stage.color_of(&items[2]), "#000000");
    }

    #[test]
    fn configured_store_defaults_to_memory() {
        let stage = build_test_stage();
        let mut reading = stage.reading_with_configured_store();
        reading.toggle_scene(&SceneId::from("s1"));
        assert_eq!(reading.store().load().unwrap(), vec![SceneId::from("s1")]);
    }

    #[test]
    fn stage_transcript_and_search() {
        let stage = build_test_stage();
        assert!(stage.transcript().ends_with("FIN\n"));
        assert_eq!(stage.search("begin").len(), 1);
        assert!(stage.highlight("Then we begin.", "BEGIN")[1].matched);
        assert!(stage.projection(None).current().is_some());
    }
}
