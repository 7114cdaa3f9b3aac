pub mod config;
pub mod decade;
pub mod effects;
pub mod effects_driver;
pub mod replay;
pub mod roster;
pub mod state;
