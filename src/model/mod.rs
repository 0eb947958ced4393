pub mod store;
pub mod task;

pub use store::{
    CalendarScale, Meta, Settings, StoreError, TaskEdit, TaskStore, ThemeKind, ViewKind,
};
pub use task::{Effort, NewTask, Priority, Status, Task};
