pub mod app;
pub mod commands;
pub mod effects;
pub mod logging;
pub mod render;
