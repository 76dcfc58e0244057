//! Conversation threads and messages

mod model;

pub use model::*;
