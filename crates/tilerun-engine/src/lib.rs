pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::GameConfig;
pub use api::error::LoadError;
pub use api::types::{EntityId, EntityKind, SoundEvent, GameEvent};
pub use components::animation::{Action, AnimationKey, AnimationDef, AnimationState};
pub use components::body::{Body, Facing, LifeState};
pub use components::geometry::{Collidable, Footprint};
pub use components::pickup::{Pickup, PickupKind};
pub use components::tilemap::{LevelSet, MapError, Tile, TileGrid, TileKind};
pub use core::collision::{CollisionResolver, Contact};
pub use core::overlap::{box_overlap, circle_overlap};
pub use core::rng::Rng;
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputIntents, InputQueue, InputState};
pub use renderer::instance::{RenderBuffer, SpriteInstance};
pub use systems::encounter::{Encounter, EncounterRules};
pub use systems::render::build_render_buffer;
pub use systems::world::{TickOutcome, World};
