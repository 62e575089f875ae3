pub mod activity;
pub mod app;
pub mod badges;
pub mod config;
pub mod courses;
pub mod data;
pub mod error;
pub mod export;
pub mod games;
pub mod learning_path;
pub mod model;
pub mod progress;
pub mod scoring;
pub mod settings;
pub mod store;
pub mod tracker;
pub mod ui;
pub mod view_models;

pub use app::LiteracyApp;
pub use tracker::Tracker;
