pub mod commands;
pub mod controller;
pub mod fallback;
pub mod presenter;

pub use controller::{GenerationOutcome, TimetableController};
pub use presenter::{present, PresentMode, RenderModel};
