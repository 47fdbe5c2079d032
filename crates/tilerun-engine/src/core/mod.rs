pub mod collision;
pub mod overlap;
pub mod rng;
pub mod scene;
pub mod time;
