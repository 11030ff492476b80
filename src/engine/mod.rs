pub mod arena;
pub mod config;
pub mod dice;
pub mod picker;
pub mod simulator;
