pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod fetch;
pub mod fixtures;
pub mod flash;
pub mod format;
pub mod input;
pub mod model;
pub mod notifier;
pub mod runtime;
pub mod store;
pub mod ticker;
pub mod ui;
