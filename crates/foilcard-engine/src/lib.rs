//! Foilcard Engine - effect state and preset transitions
//!
//! This crate owns the mutable side of foilcard: the single set of effect
//! values an editor works on, the timed transition that applies a preset
//! without flicker, and the frame handed to a renderer.
//!
//! # Components
//!
//! - [`EffectStateStore`] - Values, manual edits, resets and the preset state machine
//! - [`EffectSession`] - Store plus preset catalog, rotation/pointer input and panel flags
//! - [`RenderFrame`] / [`RenderAdapter`] - What a renderer receives, and how
//! - [`Clock`] / [`Scheduler`] - Injected time and cancellable phase timers
//!
//! # Example
//!
//! ```rust
//! use foilcard_config::PresetCatalog;
//! use foilcard_core::Rotation;
//! use foilcard_engine::{EffectSession, ManualClock};
//! use foilcard_registry::EffectRegistry;
//!
//! let clock = ManualClock::new();
//! let mut session = EffectSession::new(
//!     EffectRegistry::new(),
//!     PresetCatalog::with_factory_presets(),
//!     clock.clone(),
//! );
//!
//! session.apply_catalog_preset("gold-rush").unwrap();
//! clock.advance_ms(500);
//! session.poll();
//!
//! session.set_rotation(Rotation::new(0.0, 30.0));
//! let frame = session.frame();
//! assert_eq!(frame.dominant.unwrap().effect_id, "gold");
//! ```

pub mod clock;
pub mod error;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{EngineError, Result};
pub use foilcard_config::{ConflictPolicy, PanelState, TransitionTiming};
pub use render::{Pointer, RenderAdapter, RenderFrame, TracingAdapter};
pub use scheduler::{Scheduler, TimerHandle};
pub use session::EffectSession;
pub use store::{EffectStateStore, PresetApplicationState, PresetOutcome, TransitionPhase};
