/// Search — case-insensitive literal substring matching over the script.
///
/// Results come back in document order. There is no ranking and no limit;
/// truncating for display is left to the caller.
use serde::{Deserialize, Serialize};

use crate::core::flatten::{FINAL_MESSAGE_SCENE_ID, FINAL_MESSAGE_TITLE};
use crate::core::highlight::Matcher;
use crate::schema::content::{ContentId, ContentKind, ContentNode};
use crate::schema::scene::{Scene, SceneId};
use crate::schema::script::Script;

/// A content node that matched a query, with the scene it lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub scene_id: SceneId,
    pub scene_number: u32,
    pub scene_title: String,
    pub content_id: ContentId,
    pub matched_text: String,
    pub kind: ContentKind,
}

/// Matcher for a user query, trimmed. `None` when the query is blank,
/// which means search is inactive.
fn needle(query: &str) -> Option<Matcher> {
    Matcher::new(query.trim())
}

fn node_matches(node: &ContentNode, needle: &Matcher) -> bool {
    node.searchable_fields()
        .iter()
        .any(|field| needle.is_match(field))
}

fn scene_has_match(scene: &Scene, needle: &Matcher) -> bool {
    scene.content.iter().any(|node| node_matches(node, needle))
}

fn result_for(
    scene_id: &SceneId,
    scene_number: u32,
    scene_title: &str,
    node: &ContentNode,
) -> SearchResult {
    SearchResult {
        scene_id: scene_id.clone(),
        scene_number,
        scene_title: scene_title.to_string(),
        content_id: node.id().clone(),
        matched_text: node.summary(),
        kind: node.kind(),
    }
}

/// Every node containing `query`, scenes first, final message last.
///
/// Stage directions match on their text; dialogue matches on its joined
/// lines, the character name, or the actor. The query is literal text.
pub fn search(script: &Script, query: &str) -> Vec<SearchResult> {
    let Some(needle) = needle(query) else {
        return Vec::new();
    };

    let mut results = Vec::new();
    for scene in &script.scenes {
        for node in &scene.content {
            if node_matches(node, &needle) {
                results.push(result_for(&scene.id, scene.number, &scene.title, node));
            }
        }
    }

    let final_message = ContentNode::Dialogue(script.final_message.clone());
    if node_matches(&final_message, &needle) {
        results.push(result_for(
            &SceneId::from(FINAL_MESSAGE_SCENE_ID),
            0,
            FINAL_MESSAGE_TITLE,
            &final_message,
        ));
    }

    tracing::debug!(query = query.trim(), results = results.len(), "search");
    results
}

/// Returns true if any node of `scene` contains `query`. A blank query
/// matches every scene.
pub fn scene_matches(scene: &Scene, query: &str) -> bool {
    match needle(query) {
        None => true,
        Some(needle) => scene_has_match(scene, &needle),
    }
}

/// Ids of the scenes containing `query`, in document order. A blank query
/// selects nothing.
pub fn matching_scene_ids(script: &Script, query: &str) -> Vec<SceneId> {
    let Some(needle) = needle(query) else {
        return Vec::new();
    };
    script
        .scenes
        .iter()
        .filter(|scene| scene_has_match(scene, &needle))
        .map(|scene| scene.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::two_scene_script;
    use crate::core::highlight::highlight;

    fn content_ids(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.content_id.as_str()).collect()
    }

    #[test]
    fn blank_query_returns_nothing() {
        let script = two_scene_script();
        assert!(search(&script, "").is_empty());
        assert!(search(&script, "   \t").is_empty());
    }

    #[test]
    fn matches_stage_direction_text() {
        let results = search(&two_scene_script(), "EMPTY ROOM");
        assert_eq!(content_ids(&results), vec!["s1-d1"]);
        assert_eq!(results[0].kind, ContentKind::StageDirection);
        assert_eq!(results[0].matched_text, "Lights rise on an empty room.");
        assert_eq!(results[0].scene_id.as_str(), "s1");
        assert_eq!(results[0].scene_title, "Opening");
    }

    #[test]
    fn matches_across_joined_lines() {
        let results = search(&two_scene_script(), "me. as");
        assert_eq!(content_ids(&results), vec!["s1-l2"]);
        assert_eq!(results[0].matched_text, "Yara: Only me. As always.");
    }

    #[test]
    fn matches_character_name_and_actor() {
        let script = two_scene_script();
        assert_eq!(
            content_ids(&search(&script, "xavier")),
            vec!["s1-l1", "s2-l1"]
        );
        assert_eq!(
            content_ids(&search(&script, "(actor)")),
            vec!["s1-l1", "s1-l2", "s2-l1", "final"]
        );
    }

    #[test]
    fn final_message_is_scanned_last() {
        let results = search(&two_scene_script(), "goodnight");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].scene_number, 0);
        assert_eq!(results[0].scene_id.as_str(), FINAL_MESSAGE_SCENE_ID);
        assert_eq!(results[0].scene_title, FINAL_MESSAGE_TITLE);
        assert_eq!(results[0].kind, ContentKind::Dialogue);
    }

    #[test]
    fn metacharacters_are_literal() {
        let script = two_scene_script();
        assert!(search(&script, "l.ghts").is_empty());
        assert!(search(&script, ".*").is_empty());
        assert_eq!(content_ids(&search(&script, "here?")), vec!["s1-l1"]);
    }

    #[test]
    fn search_agrees_with_highlight_on_case_folding() {
        let mut script = two_scene_script();
        script.scenes[1]
            .content
            .push(crate::core::fixtures::direction("s2-d1", "ΟΔΟΣ"));

        let results = search(&script, "σ");
        assert_eq!(content_ids(&results), vec!["s2-d1"]);
        let segments = highlight(&results[0].matched_text, "σ");
        assert!(segments.iter().any(|s| s.matched));
        assert_eq!(matching_scene_ids(&script, "σ"), vec![SceneId::from("s2")]);
    }

    #[test]
    fn query_is_trimmed() {
        assert_eq!(
            content_ids(&search(&two_scene_script(), "  begin  ")),
            vec!["s2-l1"]
        );
    }

    #[test]
    fn scene_matching() {
        let script = two_scene_script();
        assert!(scene_matches(&script.scenes[0], ""));
        assert!(scene_matches(&script.scenes[1], "BEGIN"));
        assert!(!scene_matches(&script.scenes[0], "begin"));
        assert_eq!(
            matching_scene_ids(&script, "xavier"),
            vec![SceneId::from("s1"), SceneId::from("s2")]
        );
        assert!(matching_scene_ids(&script, " ").is_empty());
        assert!(matching_scene_ids(&script, "goodnight").is_empty());
    }
}
