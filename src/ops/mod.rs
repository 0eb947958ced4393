pub mod deadline;
pub mod filter;
pub mod search;
pub mod stats;

pub use deadline::{DeadlineClass, classify};
pub use filter::{FilterSet, apply_filters};
pub use search::{search, search_regex};
pub use stats::Stats;
