/// Per-surface controllers.
///
/// Each session owns the explicit UI state of one surface (query and open
/// scenes for reading, selected character and cursor for rehearsal,
/// filter and cursor for projection) and answers discrete user actions.
/// The script itself is only ever borrowed.
use crate::core::expansion::{ExpansionStore, SceneExpansion};
use crate::core::flatten::{
    filter_by_character, flatten_all, flatten_by_character, flatten_dialogues, Item,
};
use crate::core::highlight::{highlight, Segment};
use crate::core::navigator::{ContextWindow, Navigator, NavigatorError, Progress};
use crate::core::search::{matching_scene_ids, search, SearchResult};
use crate::schema::character::{Character, CharacterId};
use crate::schema::content::ContentId;
use crate::schema::scene::SceneId;
use crate::schema::script::Script;

/// What the UI should reveal after a search result is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub scene_id: SceneId,
    pub content_id: ContentId,
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// The reading view: a search query, its results, and the set of open
/// scenes, persisted through an [`ExpansionStore`].
pub struct ReadingSession<'s, S: ExpansionStore> {
    script: &'s Script,
    store: S,
    query: String,
    results: Vec<SearchResult>,
    expansion: SceneExpansion,
    result_limit: usize,
}

impl<'s, S: ExpansionStore> ReadingSession<'s, S> {
    /// Start a session, restoring the open scenes from `store`. A store
    /// that cannot be read starts the session with every scene closed.
    pub fn new(script: &'s Script, store: S, result_limit: usize) -> Self {
        let saved = match store.load() {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(error = %e, "could not restore expanded scenes");
                Vec::new()
            }
        };
        let expansion = SceneExpansion::from_ids(
            saved.into_iter().filter(|id| script.scene(id).is_some()),
        );
        Self {
            script,
            store,
            query: String::new(),
            results: Vec::new(),
            expansion,
            result_limit,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Every result for the current query.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// The results to display, at most `result_limit` of them.
    pub fn visible_results(&self) -> &[SearchResult] {
        let end = self.results.len().min(self.result_limit);
        &self.results[..end]
    }

    /// How many results are not shown by [`Self::visible_results`].
    pub fn hidden_results(&self) -> usize {
        self.results.len().saturating_sub(self.result_limit)
    }

    /// Run a new query. When it matches anything, exactly the scenes that
    /// contain a match are opened; a blank or fruitless query leaves the
    /// open scenes alone.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.results = search(self.script, query);

        let matching = matching_scene_ids(self.script, query);
        if !matching.is_empty() {
            self.expansion.replace(matching);
            self.persist();
        }
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.results.clear();
    }

    /// Open the scene holding `result` and tell the UI where to scroll.
    pub fn select_result(&mut self, result: &SearchResult) -> Selection {
        if self.script.scene(&result.scene_id).is_some()
            && !self.expansion.is_expanded(&result.scene_id)
        {
            self.expansion.expand(&result.scene_id);
            self.persist();
        }
        Selection {
            scene_id: result.scene_id.clone(),
            content_id: result.content_id.clone(),
        }
    }

    /// Split `text` around occurrences of the current query.
    pub fn highlight<'t>(&self, text: &'t str) -> Vec<Segment<'t>> {
        highlight(text, &self.query)
    }

    pub fn is_expanded(&self, id: &SceneId) -> bool {
        self.expansion.is_expanded(id)
    }

    /// Open scene ids in document order.
    pub fn expanded(&self) -> Vec<SceneId> {
        self.expansion.ids_in_order(self.script)
    }

    /// Open or close one scene. Returns whether it is now open.
    pub fn toggle_scene(&mut self, id: &SceneId) -> bool {
        let open = self.expansion.toggle(id);
        self.persist();
        open
    }

    /// Open every scene, as needed before printing.
    pub fn expand_all(&mut self) {
        self.expansion.expand_all(self.script);
        self.persist();
    }

    /// Make sure something is visible when the reader jumps to the script:
    /// opens the first scene if none is open.
    pub fn open_first_scene(&mut self) {
        if self.expansion.is_empty() {
            if let Some(first) = self.script.scenes.first() {
                self.expansion.expand(&first.id);
                self.persist();
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) {
        let ids = self.expansion.ids_in_order(self.script);
        if let Err(e) = self.store.save(&ids) {
            tracing::warn!(error = %e, "could not save expanded scenes");
        }
    }
}

// ---------------------------------------------------------------------------
// Rehearsal
// ---------------------------------------------------------------------------

/// The rehearsal view: one character's lines, one at a time, with the
/// surrounding dialogue of the play as cues.
#[derive(Debug, Clone)]
pub struct RehearsalSession<'s> {
    script: &'s Script,
    character: Option<CharacterId>,
    navigator: Navigator,
    dialogues: Vec<Item>,
    cue_before: usize,
    cue_after: usize,
}

impl<'s> RehearsalSession<'s> {
    pub fn new(script: &'s Script, cue_before: usize, cue_after: usize) -> Self {
        Self {
            script,
            character: None,
            navigator: Navigator::default(),
            dialogues: flatten_dialogues(script),
            cue_before,
            cue_after,
        }
    }

    /// Pick the character to rehearse, or none. The cursor always returns
    /// to that character's first line.
    pub fn select_character(&mut self, character_id: Option<CharacterId>) {
        let lines = match &character_id {
            Some(id) => flatten_by_character(self.script, id),
            None => Vec::new(),
        };
        tracing::debug!(
            character = character_id.as_ref().map(CharacterId::as_str),
            lines = lines.len(),
            "rehearsal character selected"
        );
        self.character = character_id;
        self.navigator.replace(lines);
    }

    pub fn character_id(&self) -> Option<&CharacterId> {
        self.character.as_ref()
    }

    /// The selected cast member, if the selected id is in the cast.
    pub fn character(&self) -> Option<&'s Character> {
        let script = self.script;
        self.character.as_ref().and_then(|id| script.character(id))
    }

    /// Returns true if the selected character has anything to rehearse.
    pub fn has_lines(&self) -> bool {
        !self.navigator.is_empty()
    }

    pub fn current_line(&self) -> Option<&Item> {
        self.navigator.current()
    }

    pub fn next(&mut self) -> bool {
        self.navigator.next()
    }

    pub fn previous(&mut self) -> bool {
        self.navigator.previous()
    }

    pub fn seek_to_id(&mut self, id: &ContentId) -> Result<usize, NavigatorError> {
        self.navigator.seek_to_id(id)
    }

    pub fn progress(&self) -> Option<Progress> {
        self.navigator.progress()
    }

    /// The character's own neighbouring lines.
    pub fn line_window(&self, before: usize, after: usize) -> ContextWindow<'_> {
        self.navigator.context_window(before, after)
    }

    /// The dialogue spoken just before and after the current line in the
    /// play, whoever speaks it. Empty for the final message, which has no
    /// neighbours inside a scene.
    pub fn cues(&self) -> ContextWindow<'_> {
        let empty = ContextWindow {
            before: &[],
            after: &[],
        };
        let Some(current) = self.navigator.current() else {
            return empty;
        };
        let Some(index) = self.dialogues.iter().position(|d| d.id() == current.id()) else {
            return empty;
        };
        let start = index.saturating_sub(self.cue_before);
        let end = index
            .saturating_add(1)
            .saturating_add(self.cue_after)
            .min(self.dialogues.len());
        ContextWindow {
            before: &self.dialogues[start..index],
            after: &self.dialogues[index + 1..end],
        }
    }

    /// Project the selected character's lines, starting at the line being
    /// rehearsed.
    pub fn projection(&self) -> ProjectionSession<'s> {
        let mut projection = ProjectionSession::new(self.script, self.character.clone());
        if let Some(current) = self.navigator.current() {
            // Both sequences come from the same character filter.
            let _ = projection.seek_to_id(current.id());
        }
        projection
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// The full-screen projection view: the whole play item by item, or only
/// one character's dialogue when a filter is set.
#[derive(Debug, Clone)]
pub struct ProjectionSession<'s> {
    script: &'s Script,
    filter: Option<CharacterId>,
    navigator: Navigator,
}

impl<'s> ProjectionSession<'s> {
    pub fn new(script: &'s Script, filter: Option<CharacterId>) -> Self {
        let navigator = Navigator::new(Self::sequence(script, filter.as_ref()));
        Self {
            script,
            filter,
            navigator,
        }
    }

    fn sequence(script: &Script, filter: Option<&CharacterId>) -> Vec<Item> {
        let items = flatten_all(script);
        match filter {
            Some(id) => filter_by_character(items, id),
            None => items,
        }
    }

    /// Change the character filter. The cursor returns to the start.
    pub fn set_filter(&mut self, filter: Option<CharacterId>) {
        self.navigator
            .replace(Self::sequence(self.script, filter.as_ref()));
        self.filter = filter;
    }

    pub fn filter(&self) -> Option<&CharacterId> {
        self.filter.as_ref()
    }

    pub fn current(&self) -> Option<&Item> {
        self.navigator.current()
    }

    pub fn next(&mut self) -> bool {
        self.navigator.next()
    }

    pub fn previous(&mut self) -> bool {
        self.navigator.previous()
    }

    pub fn seek_to_id(&mut self, id: &ContentId) -> Result<usize, NavigatorError> {
        self.navigator.seek_to_id(id)
    }

    pub fn progress(&self) -> Option<Progress> {
        self.navigator.progress()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }
}
