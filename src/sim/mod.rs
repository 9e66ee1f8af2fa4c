//! Play simulation
//!
//! Everything that decides what happens on the course during play. This
//! module is deterministic given its inputs:
//! - Time comes from the host as milliseconds, never from a clock
//! - Hazards live in owning collections, iterated in insertion order
//! - No rendering dependencies; sprites are opaque handles

pub mod portal;
pub mod shapes;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod windmill;

pub use portal::{Portal, build_portals, first_collision};
pub use shapes::{Circle, Rect};
pub use state::{PlayEvent, PlayPhase, PlayState, RoundResult, StartMarker, Tickable, ToastKind};
pub use terrain::{
    MaskLayer, PendingSample, TerrainClass, TerrainClassifier, TerrainQuery, hole_hitbox,
};
pub use tick::PlaySession;
pub use windmill::Windmill;
