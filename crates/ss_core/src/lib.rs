//! # ss_core - Soccer Simulation Server Core
//!
//! Per-cycle player action/physics model and the versioned wire
//! serialization layer of a networked soccer simulation server.
//!
//! ## Features
//! - Strict one-primary-command-per-cycle agent state machine
//! - Stochastic kick/tackle/catch models behind an explicit seeded
//!   noise source (same seed = same match)
//! - Stamina/recovery/effort and hearing-capacity resource model
//! - Protocol versions 8 through 14 rendered by immutable serializer
//!   singletons with a strictly additive compatibility contract

pub mod context;
pub mod error;
pub mod geom;
pub mod param;
pub mod play_mode;
pub mod player;
pub mod player_type;
pub mod rng;
pub mod sender;
pub mod serializer;

pub use context::{MatchContext, Side, TeamSelector};
pub use error::{CommandError, Result};
pub use param::{PlayerParam, ServerParam};
pub use play_mode::PlayMode;
pub use player::{
    Arm, CommandCounters, EarMode, EarSettings, Player, PrimaryState, StatusFlags, ViewQuality,
    ViewWidth,
};
pub use player_type::{PlayerType, PlayerTypeCatalog};
pub use rng::NoiseSource;
pub use sender::SenderSet;
pub use serializer::{serializer_for, ObjectView, PlayerView, ProtocolVersion, Serializer};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
