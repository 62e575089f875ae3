pub mod badges;
pub mod course;
pub mod dashboard;
pub mod game;
pub mod paths;
pub mod quiz;
pub mod settings;
pub mod summary;
