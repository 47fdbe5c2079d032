pub mod encounter;
pub mod render;
pub mod world;
