pub mod app;
pub mod form;
pub mod input;
pub mod interaction;
pub mod render;
pub mod theme;

pub use app::run;
