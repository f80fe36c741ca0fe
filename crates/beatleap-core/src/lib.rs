pub mod beat;
pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod motion;
pub mod particles;
pub mod snapshot;
pub mod state;
pub mod track;

pub use beat::*;
pub use camera::*;
pub use clock::*;
pub use config::*;
pub use constants::*;
pub use engine::*;
pub use error::EngineError;
pub use motion::*;
pub use particles::*;
pub use snapshot::*;
pub use state::*;
pub use track::*;
