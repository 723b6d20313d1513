pub mod app;
pub mod face;
pub mod toast;
