pub mod complete;
pub mod sort;
pub mod stats;
pub mod store;

pub use complete::set_completion;
pub use sort::{SortKey, sort_forest};
pub use stats::{ForestStats, forest_stats};
pub use store::{StoreError, TaskPatch, TaskStore};
