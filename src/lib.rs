pub mod clock;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod geometry;
pub mod hp_bar;
pub mod input;
pub mod physics;
pub mod terminal;
