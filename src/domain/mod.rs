//! Core domain types and logic.

pub mod table;
pub mod normalize;
pub mod registry;
pub mod vocabulary;
pub mod intent;
pub mod resolver;
pub mod facts;
pub mod engine;
pub mod settings;
pub mod error;
