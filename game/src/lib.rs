pub mod highscore;
pub mod playtest;
pub mod session;
pub mod tile_rng;
pub mod twenty48_core;
pub mod twenty48_ui;
pub mod view;
