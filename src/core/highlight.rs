/// Highlighter — splits text into matched and unmatched segments.
///
/// Output is markup-free; the rendering layer decides how a matched
/// segment looks.
use regex::{Regex, RegexBuilder};
use serde::Serialize;

/// A run of the input text, marked if it is an occurrence of the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

impl<'a> Segment<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            matched: false,
        }
    }

    fn marked(text: &'a str) -> Self {
        Self {
            text,
            matched: true,
        }
    }
}

/// A compiled case-insensitive literal query.
///
/// Search and highlighting share this matcher so a node is returned by
/// search exactly when its text would show a highlighted occurrence.
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: Regex,
}

impl Matcher {
    /// Compile `query` as literal text. `None` when the query is blank.
    pub fn new(query: &str) -> Option<Matcher> {
        if query.trim().is_empty() {
            return None;
        }
        match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => Some(Matcher { pattern }),
            Err(e) => {
                // An escaped literal only fails on size limits.
                tracing::warn!(error = %e, "query pattern rejected, matching nothing");
                None
            }
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Split `text` around the occurrences of the query.
    pub fn segments<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut cursor = 0;
        for found in self.pattern.find_iter(text) {
            if found.start() > cursor {
                segments.push(Segment::plain(&text[cursor..found.start()]));
            }
            segments.push(Segment::marked(found.as_str()));
            cursor = found.end();
        }
        if cursor < text.len() {
            segments.push(Segment::plain(&text[cursor..]));
        }
        segments
    }
}

/// Mark every case-insensitive occurrence of `query` in `text`.
///
/// Occurrences are found left to right and never overlap. The query is
/// matched literally. Concatenating the segments reproduces `text`
/// exactly; a blank query leaves the text unmarked.
pub fn highlight<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    if text.is_empty() {
        return Vec::new();
    }
    match Matcher::new(query) {
        Some(matcher) => matcher.segments(text),
        None => vec![Segment::plain(text)],
    }
}

/// Returns true if `text` contains at least one occurrence of `query`.
pub fn has_match(text: &str, query: &str) -> bool {
    highlight(text, query).iter().any(|segment| segment.matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(segments: &[Segment<'_>]) -> String {
        segments.iter().map(|s| s.text).collect()
    }

    fn marked<'a>(segments: &[Segment<'a>]) -> Vec<&'a str> {
        segments.iter().filter(|s| s.matched).map(|s| s.text).collect()
    }

    #[test]
    fn blank_query_is_identity() {
        let text = "Yo nací por amor.";
        assert_eq!(highlight(text, ""), vec![Segment::plain(text)]);
        assert_eq!(highlight(text, "  "), vec![Segment::plain(text)]);
    }

    #[test]
    fn empty_text_has_no_segments() {
        assert!(highlight("", "amor").is_empty());
    }

    #[test]
    fn marks_every_occurrence_preserving_case() {
        let text = "Amor, amor y más AMOR";
        let segments = highlight(text, "amor");
        assert_eq!(marked(&segments), vec!["Amor", "amor", "AMOR"]);
        assert_eq!(joined(&segments), text);
    }

    #[test]
    fn segments_alternate_around_matches() {
        let segments = highlight("por amor a ti", "amor");
        assert_eq!(
            segments,
            vec![
                Segment::plain("por "),
                Segment::marked("amor"),
                Segment::plain(" a ti"),
            ]
        );
    }

    #[test]
    fn metacharacters_match_literally() {
        let segments = highlight("a.b axb a.b", "a.b");
        assert_eq!(marked(&segments), vec!["a.b", "a.b"]);
        assert_eq!(joined(&segments), "a.b axb a.b");

        assert!(!has_match("nothing here", ".*"));
        assert!(has_match("(¿ya?)", "(¿ya?)"));
        assert!(has_match("cost: $5 [approx]", "$5 [approx]"));
    }

    #[test]
    fn matches_do_not_overlap() {
        let segments = highlight("aaaa", "aa");
        assert_eq!(marked(&segments), vec!["aa", "aa"]);
    }

    #[test]
    fn non_ascii_text_is_preserved() {
        let text = "Niña… ¿sabes por qué estás tan vacía?";
        let segments = highlight(text, "VACÍA");
        assert_eq!(marked(&segments), vec!["vacía"]);
        assert_eq!(joined(&segments), text);
    }

    #[test]
    fn matcher_folds_greek_sigma_forms() {
        let matcher = Matcher::new("σ").unwrap();
        assert!(matcher.is_match("ΟΔΟΣ"));
        assert!(matcher.is_match("οδος"));
        assert_eq!(marked(&matcher.segments("ΟΔΟΣ")), vec!["Σ"]);
        assert!(Matcher::new(" ").is_none());
    }

    #[test]
    fn no_match_is_single_plain_segment() {
        assert_eq!(highlight("Luz dorada.", "noche"), vec![Segment::plain("Luz dorada.")]);
    }
}
