//! Core type definitions: persisted entities and the moderation status model.

pub mod entities;
pub mod status;
