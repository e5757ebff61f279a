pub mod calendar;
pub mod filter;
pub mod layout;
pub mod task_ops;
