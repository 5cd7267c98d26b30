pub mod body;
pub mod entity;
pub mod shape;
pub mod tilemap;
