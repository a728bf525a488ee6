pub mod app;
pub mod components;
pub mod domain;
pub mod engine;
pub mod infrastructure;
pub mod logging;
pub mod theme;
