pub mod calendar;
pub mod kanban;
pub mod list;

pub use calendar::{DayCell, MonthGrid, project_day, project_month, project_week};
pub use kanban::{Carry, KanbanBoard, KanbanColumn, project_kanban};
pub use list::{ListGroup, project_grouped, project_table};
