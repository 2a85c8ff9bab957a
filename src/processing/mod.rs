//! Text processing, scoring and analysis

pub mod analyzer;
pub mod catalog;
pub mod document;
pub mod embedding_manager;
pub mod embeddings;
pub mod formatting;
pub mod keywords;
pub mod sections;
pub mod shared;
pub mod skill_matcher;
pub mod text_processor;
