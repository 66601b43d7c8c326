//! Entity behaviors
//!
//! Each behavior is a small state machine advanced once per tick by the
//! scheduler. Behaviors draw themselves into the context's framebuffer
//! during their step and spawn follow-on behaviors through the context.

pub mod debris;
pub mod era;
pub mod explosion;
pub mod gameover;
pub mod projectile;
pub mod ship;
pub mod star;

pub use debris::{DebrisFall, DebrisSpawner, debris_spawn_interval};
pub use era::EraClock;
pub use explosion::ExplosionEffect;
pub use gameover::GameOverDisplay;
pub use projectile::ProjectileFlight;
pub use ship::{ShipAnimator, ShipControl};
pub use star::StarBlink;
