// file: src/models/bundle.rs
// description: flattened plain-text representation of one thread for model input
// reference: internal data structures

/// Comments kept per thread after ranking.
pub const MAX_COMMENTS: usize = 10;

/// Rendered in place of an absent post body.
pub const NO_BODY_MARKER: &str = "[No body text]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedComment {
    pub body: String,
    pub score: i64,
}

impl RankedComment {
    pub fn new(body: impl Into<String>, score: i64) -> Self {
        Self {
            body: body.into(),
            score,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThreadBundle {
    title: String,
    body: String,
    comments: Vec<RankedComment>,
}

impl ThreadBundle {
    /// Ranks `comments` by descending score (stable, so retrieval order
    /// breaks ties) and keeps at most [`MAX_COMMENTS`] of them.
    pub fn new(title: String, body: String, mut comments: Vec<RankedComment>) -> Self {
        comments.sort_by_key(|c| std::cmp::Reverse(c.score));
        comments.truncate(MAX_COMMENTS);

        Self {
            title,
            body,
            comments,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn comments(&self) -> &[RankedComment] {
        &self.comments
    }

    /// Model input text: title, body (or the no-body marker), then the kept
    /// comments numbered from 1.
    pub fn render(&self) -> String {
        let body = if self.body.trim().is_empty() {
            NO_BODY_MARKER
        } else {
            &self.body
        };

        let mut output = format!("Title: {}\n", self.title);
        output.push_str(&format!("Post: {}\n", body));
        for (i, comment) in self.comments.iter().enumerate() {
            output.push_str(&format!("Comment {}: {}\n", i + 1, comment.body));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn comment(body: &str, score: i64) -> RankedComment {
        RankedComment::new(body, score)
    }

    #[test]
    fn test_comments_ranked_descending() {
        let bundle = ThreadBundle::new(
            "t".to_string(),
            "b".to_string(),
            vec![comment("low", 1), comment("high", 50), comment("mid", 7)],
        );

        let scores: Vec<i64> = bundle.comments().iter().map(|c| c.score).collect();
        assert_eq!(scores, vec![50, 7, 1]);
    }

    #[test]
    fn test_ties_keep_retrieval_order() {
        let bundle = ThreadBundle::new(
            "t".to_string(),
            "b".to_string(),
            vec![comment("first", 3), comment("second", 3), comment("third", 3)],
        );

        let bodies: Vec<&str> = bundle.comments().iter().map(|c| c.body.as_str()).collect();
        assert_eq!(bodies, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_truncates_to_max_comments() {
        let comments = (0..25).map(|i| comment("c", i)).collect();
        let bundle = ThreadBundle::new("t".to_string(), "b".to_string(), comments);
        assert_eq!(bundle.comments().len(), MAX_COMMENTS);
        assert_eq!(bundle.comments()[0].score, 24);
    }

    #[test]
    fn test_render_format() {
        let bundle = ThreadBundle::new(
            "Big news".to_string(),
            "Something happened".to_string(),
            vec![comment("wow", 10), comment("indeed", 5)],
        );

        assert_eq!(
            bundle.render(),
            "Title: Big news\nPost: Something happened\nComment 1: wow\nComment 2: indeed\n"
        );
    }

    #[test]
    fn test_render_empty_body_uses_marker() {
        let bundle = ThreadBundle::new("Link post".to_string(), String::new(), vec![]);
        assert_eq!(bundle.render(), "Title: Link post\nPost: [No body text]\n");
    }
}
