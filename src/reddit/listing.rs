// file: src/reddit/listing.rs
// description: serde models for Reddit's Thing/Listing JSON envelope
// reference: https://www.reddit.com/dev/api

use crate::models::RankedComment;
use serde::Deserialize;

/// One node of the Thing envelope. Every payload Reddit returns is a Thing
/// with a `kind` discriminator and the body nested under `data`.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum Node {
    #[serde(rename = "Listing")]
    Listing(ListingData),

    #[serde(rename = "t3")]
    Link(LinkData),

    #[serde(rename = "t1")]
    Comment(CommentData),

    /// Placeholder for collapsed comment pages ("load more"). Never expanded.
    #[serde(rename = "more")]
    More(MoreData),
}

#[derive(Debug, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Deserialize)]
pub struct LinkData {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub score: i64,
}

#[derive(Debug, Deserialize)]
pub struct CommentData {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub replies: Option<Replies>,
}

#[derive(Debug, Deserialize)]
pub struct MoreData {
    #[serde(default)]
    pub count: u64,
}

/// The `replies` field is a nested Listing Thing when a comment has
/// children and the empty string when it does not.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Replies {
    Thing(Box<Node>),
    Empty(String),
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Node {
    /// Flattens a comment forest into retrieval order, dropping `more`
    /// placeholders along the way.
    pub fn collect_comments(&self, out: &mut Vec<RankedComment>) {
        match self {
            Node::Listing(listing) => {
                for child in &listing.children {
                    child.collect_comments(out);
                }
            }
            Node::Comment(comment) => {
                out.push(RankedComment::new(comment.body.clone(), comment.score));
                if let Some(Replies::Thing(nested)) = &comment.replies {
                    nested.collect_comments(out);
                }
            }
            Node::Link(_) | Node::More(_) => {}
        }
    }

    /// Link payloads of a listing, in the order Reddit returned them.
    pub fn links(&self) -> Vec<&LinkData> {
        match self {
            Node::Listing(listing) => listing
                .children
                .iter()
                .filter_map(|child| match child {
                    Node::Link(link) => Some(link),
                    _ => None,
                })
                .collect(),
            Node::Link(link) => vec![link],
            _ => Vec::new(),
        }
    }
}
