// file: src/reddit/mod.rs
// description: reddit api module exports
// reference: internal module structure

pub mod client;
pub mod listing;

pub use client::RedditClient;
pub use listing::{CommentData, LinkData, ListingData, Node, Replies, TokenResponse};
