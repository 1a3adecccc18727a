pub mod health;
pub mod track;

pub use health::{HealthService, health_routes};
pub use track::{TrackService, track_routes};
