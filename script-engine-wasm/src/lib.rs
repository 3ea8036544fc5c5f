//! WASM bindings for script-engine — powers the browser script viewer.
//!
//! Sessions borrow the staged script, so the viewer keeps only plain state
//! (query, open scenes, selected character, cursor ids) and rebuilds a
//! session for each call.

use wasm_bindgen::prelude::*;

use script_engine::config::StageConfig;
use script_engine::core::expansion::MemoryStore;
use script_engine::core::flatten::Item;
use script_engine::core::navigator::Progress;
use script_engine::core::session::{ProjectionSession, ReadingSession, RehearsalSession};
use script_engine::schema::character::CharacterId;
use script_engine::schema::content::ContentId;
use script_engine::schema::scene::SceneId;
use script_engine::schema::script::Script;
use script_engine::stage::Stage;

mod data {
    pub const NAVIDAD_SCRIPT: &str = include_str!("../../script_data/navidad/script.ron");
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct CharacterInfo<'a> {
    id: &'a str,
    name: &'a str,
    actor: &'a str,
    color: &'a str,
}

#[derive(serde::Serialize)]
struct SceneInfo<'a> {
    id: &'a str,
    number: u32,
    title: &'a str,
    expanded: bool,
}

#[derive(serde::Serialize)]
struct ScriptInfo<'a> {
    title: &'a str,
    subtitle: Option<&'a str>,
    central_phrase: &'a str,
    characters: Vec<CharacterInfo<'a>>,
    scenes: Vec<SceneInfo<'a>>,
}

#[derive(serde::Serialize)]
struct SearchView<'a> {
    query: &'a str,
    total: usize,
    hidden: usize,
    results: &'a [script_engine::core::search::SearchResult],
    expanded: Vec<SceneId>,
}

#[derive(serde::Serialize)]
struct ProgressInfo {
    current: usize,
    total: usize,
    fraction: f32,
}

impl From<Progress> for ProgressInfo {
    fn from(p: Progress) -> Self {
        ProgressInfo {
            current: p.current,
            total: p.total,
            fraction: p.fraction(),
        }
    }
}

#[derive(serde::Serialize)]
struct RehearsalView<'a> {
    character: Option<&'a str>,
    current: Option<&'a Item>,
    color: Option<&'a str>,
    progress: Option<ProgressInfo>,
    cues_before: &'a [Item],
    cues_after: &'a [Item],
}

#[derive(serde::Serialize)]
struct ProjectionView<'a> {
    filter: Option<&'a str>,
    current: Option<&'a Item>,
    color: Option<&'a str>,
    progress: Option<ProgressInfo>,
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

// ---------------------------------------------------------------------------
// ScriptViewer — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct ScriptViewer {
    stage: Stage,
    query: String,
    expanded: Vec<SceneId>,
    rehearsal_character: Option<CharacterId>,
    rehearsal_at: Option<ContentId>,
    projection_filter: Option<CharacterId>,
    projection_at: Option<ContentId>,
}

#[wasm_bindgen]
impl ScriptViewer {
    /// Create a viewer over the bundled sample play.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ScriptViewer, JsError> {
        ScriptViewer::from_ron(data::NAVIDAD_SCRIPT)
    }

    /// Create a viewer over a script document in RON form.
    pub fn from_ron(source: &str) -> Result<ScriptViewer, JsError> {
        let script = Script::parse_ron(source)
            .map_err(|e| JsError::new(&format!("Script parse error: {e}")))?;
        let stage = Stage::builder()
            .with_script(script)
            .with_config(StageConfig::default())
            .build()
            .map_err(|e| JsError::new(&format!("Stage build error: {e}")))?;

        let mut viewer = ScriptViewer {
            stage,
            query: String::new(),
            expanded: Vec::new(),
            rehearsal_character: None,
            rehearsal_at: None,
            projection_filter: None,
            projection_at: None,
        };
        let mut reading = viewer.reading();
        reading.open_first_scene();
        viewer.expanded = reading.expanded();
        Ok(viewer)
    }

    /// Title block, cast and scene list as JSON.
    pub fn info(&self) -> Result<String, JsError> {
        let script = self.stage.script();
        let info = ScriptInfo {
            title: &script.title,
            subtitle: script.subtitle.as_deref(),
            central_phrase: &script.central_phrase,
            characters: script
                .characters
                .iter()
                .map(|c| CharacterInfo {
                    id: c.id.as_str(),
                    name: &c.name,
                    actor: &c.actor,
                    color: &c.color,
                })
                .collect(),
            scenes: script
                .scenes
                .iter()
                .map(|s| SceneInfo {
                    id: s.id.as_str(),
                    number: s.number,
                    title: &s.title,
                    expanded: self.expanded.contains(&s.id),
                })
                .collect(),
        };
        to_json(&info)
    }

    // -----------------------------------------------------------------------
    // Reading
    // -----------------------------------------------------------------------

    /// Run a search. Scenes with matches become the open scenes. Returns
    /// the results and the open scenes as JSON.
    pub fn search(&mut self, query: &str) -> Result<String, JsError> {
        let mut reading = self.reading();
        reading.set_query(query);
        let expanded = reading.expanded();
        let json = to_json(&SearchView {
            query: reading.query(),
            total: reading.results().len(),
            hidden: reading.hidden_results(),
            results: reading.visible_results(),
            expanded: expanded.clone(),
        })?;
        self.query = query.to_string();
        self.expanded = expanded;
        Ok(json)
    }

    /// Split `text` into highlighted segments for the current query.
    pub fn highlight(&self, text: &str) -> Result<String, JsError> {
        to_json(&self.stage.highlight(text, &self.query))
    }

    /// Open or close a scene. Returns true if the scene is now open.
    pub fn toggle_scene(&mut self, scene_id: &str) -> bool {
        let mut reading = self.reading();
        let open = reading.toggle_scene(&SceneId::from(scene_id));
        self.expanded = reading.expanded();
        open
    }

    pub fn expand_all(&mut self) {
        let mut reading = self.reading();
        reading.expand_all();
        self.expanded = reading.expanded();
    }

    pub fn expanded_scenes(&self) -> Result<String, JsError> {
        to_json(&self.expanded)
    }

    // -----------------------------------------------------------------------
    // Rehearsal
    // -----------------------------------------------------------------------

    /// Select a character to rehearse (empty string for none).
    pub fn rehearse(&mut self, character_id: &str) -> Result<String, JsError> {
        self.rehearsal_character = if character_id.is_empty() {
            None
        } else {
            Some(CharacterId::from(character_id))
        };
        self.rehearsal_at = None;
        self.rehearsal_view(|_| {})
    }

    pub fn rehearsal_next(&mut self) -> Result<String, JsError> {
        self.rehearsal_view(|session| {
            session.next();
        })
    }

    pub fn rehearsal_previous(&mut self) -> Result<String, JsError> {
        self.rehearsal_view(|session| {
            session.previous();
        })
    }

    pub fn rehearsal_current(&mut self) -> Result<String, JsError> {
        self.rehearsal_view(|_| {})
    }

    // -----------------------------------------------------------------------
    // Projection
    // -----------------------------------------------------------------------

    /// Start projecting, optionally filtered to one character (empty
    /// string for the whole play).
    pub fn project(&mut self, character_id: &str) -> Result<String, JsError> {
        self.projection_filter = if character_id.is_empty() {
            None
        } else {
            Some(CharacterId::from(character_id))
        };
        self.projection_at = None;
        self.projection_view(|_| Ok(()))
    }

    /// Hand the rehearsal over to projection, starting at the current line.
    pub fn project_rehearsal(&mut self) -> Result<String, JsError> {
        let projection = self.rehearsal_session().projection();
        let filter = projection.filter().cloned();
        let at = projection.current().map(|item| item.id().clone());
        self.projection_filter = filter;
        self.projection_at = at;
        self.projection_view(|_| Ok(()))
    }

    pub fn projection_next(&mut self) -> Result<String, JsError> {
        self.projection_view(|session| {
            session.next();
            Ok(())
        })
    }

    pub fn projection_previous(&mut self) -> Result<String, JsError> {
        self.projection_view(|session| {
            session.previous();
            Ok(())
        })
    }

    /// Jump the projection to a content id.
    pub fn projection_seek(&mut self, content_id: &str) -> Result<String, JsError> {
        let id = ContentId::from(content_id);
        self.projection_view(|session| {
            session
                .seek_to_id(&id)
                .map(|_| ())
                .map_err(|e| JsError::new(&e.to_string()))
        })
    }

    /// The whole play as a plain-text transcript.
    pub fn transcript(&self) -> String {
        self.stage.transcript()
    }
}

// Private helpers
impl ScriptViewer {
    fn reading(&self) -> ReadingSession<'_, MemoryStore> {
        self.stage
            .reading(MemoryStore::with_saved(self.expanded.clone()))
    }

    fn rehearsal_session(&self) -> RehearsalSession<'_> {
        let mut session = self.stage.rehearsal();
        session.select_character(self.rehearsal_character.clone());
        if let Some(id) = &self.rehearsal_at {
            let _ = session.seek_to_id(id);
        }
        session
    }

    fn projection_session(&self) -> ProjectionSession<'_> {
        let mut session = self.stage.projection(self.projection_filter.clone());
        if let Some(id) = &self.projection_at {
            let _ = session.seek_to_id(id);
        }
        session
    }

    fn rehearsal_view(
        &mut self,
        step: impl FnOnce(&mut RehearsalSession<'_>),
    ) -> Result<String, JsError> {
        let mut session = self.rehearsal_session();
        step(&mut session);
        let current = session.current_line();
        let cues = session.cues();
        let json = to_json(&RehearsalView {
            character: session.character_id().map(CharacterId::as_str),
            current,
            color: current.map(|item| self.stage.color_of(item)),
            progress: session.progress().map(ProgressInfo::from),
            cues_before: cues.before,
            cues_after: cues.after,
        })?;
        let at = current.map(|item| item.id().clone());
        self.rehearsal_at = at;
        Ok(json)
    }

    fn projection_view(
        &mut self,
        step: impl FnOnce(&mut ProjectionSession<'_>) -> Result<(), JsError>,
    ) -> Result<String, JsError> {
        let mut session = self.projection_session();
        step(&mut session)?;
        let current = session.current();
        let json = to_json(&ProjectionView {
            filter: session.filter().map(CharacterId::as_str),
            current,
            color: current.map(|item| self.stage.color_of(item)),
            progress: session.progress().map(ProgressInfo::from),
        })?;
        let at = current.map(|item| item.id().clone());
        self.projection_at = at;
        Ok(json)
    }
}
