//! Core system components for the rangefinder
pub mod resources;
pub mod state;
