//! Control core: pure functions over an explicit [`ControllerState`].
//!
//! Nothing in here touches hardware or reads a clock.  The service passes
//! in the tick's sensor snapshot and timestamp, and applies whatever the
//! policy and stepper decide.

pub mod policy;
pub mod state;
pub mod stepper;

pub use policy::{CloseReason, Decision, VentTarget};
pub use state::ControllerState;
pub use stepper::StepOutcome;
