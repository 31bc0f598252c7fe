//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! Depends only on serde and chrono.

mod error;
mod folder;
mod idea;
mod ideas_state;
mod task;

pub use error::{DomainError, DomainResult};
pub use folder::{Folder, ALL_FOLDER_ID, ALL_FOLDER_NAME};
pub use idea::{Idea, UNTITLED_IDEA};
pub use ideas_state::IdeasState;
pub use task::{Priority, Task};
