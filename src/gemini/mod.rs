// file: src/gemini/mod.rs
// description: gemini api module exports
// reference: internal module structure

pub mod client;

pub use client::{GeminiClient, parse_qa_list};
