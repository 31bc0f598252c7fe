//! Store Layer
//!
//! Stateful owners of the app's data: the idea organizer and the focus
//! task list, plus the clock and id collaborators they are built with.

mod clock;
mod ids;
mod idea_store;
mod task_list;


pub use clock::{Clock, FixedClock, SystemClock};
pub use ids::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use idea_store::IdeaStore;
pub use task_list::TaskList;
