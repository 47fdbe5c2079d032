pub mod animation;
pub mod body;
pub mod geometry;
pub mod pickup;
pub mod tilemap;
