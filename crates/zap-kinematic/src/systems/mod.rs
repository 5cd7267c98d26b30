pub mod debug;
pub mod movement;
