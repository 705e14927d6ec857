//! Value objects - immutable domain values

mod page;
mod task_status;

pub use page::PageRequest;
pub use task_status::{TaskStatus, TaskStatusParseError};
