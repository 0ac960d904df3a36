//! Core types and structures for slugline-editor
//!
//! - `SceneList`: the ordered, renumbered scenes of one import
//! - `EditDraft`: the single in-progress scene edit
//! - `SceneBreakdown`: the read-only result handed downstream on commit
//! - Error types for editor operations

pub mod breakdown;
pub mod draft;
pub mod errors;
pub mod scene_list;

pub use breakdown::{BreakdownEntry, SceneBreakdown};
pub use draft::EditDraft;
pub use errors::{EditorError, Result};
pub use scene_list::SceneList;
