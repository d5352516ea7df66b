//! Description blocks for the storyboard video generation wizard.
//!
//! Generated descriptions come back as one text block holding several
//! labelled entries (characters, storyboard frames, video shots). This crate
//! parses those blocks, replaces one entry's content by its label and writes
//! the block back out, and tracks which cards need regenerating after an edit.

pub mod config;
pub mod description;
pub mod error;
pub mod phase;
pub mod regenerate;

pub use config::{Config, Spacing};
pub use description::{DescriptionBlock, DescriptionCodec, DescriptionFormat};
pub use error::{DescriptionError, Result};
pub use phase::{DescriptionPhase, FlowStage, TaskPhase};
pub use regenerate::{IndexMarks, LoadTracker, RegenerateTracker};
