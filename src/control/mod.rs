//! Cascaded control pipeline for the chassis and gimbal
//!
//! Decoded link messages land in [`state::CtlState`]; each scheduler
//! tick [`ctl::Controller`] runs the cascade (chassis body loops ->
//! mecanum kinematics -> wheel loops, gimbal position -> rate loops)
//! and dispatches one [`ctl::ActuatorCommand`].

pub mod ctl;
pub mod mecanum;
pub mod pid;
pub mod ramp;
pub mod state;

pub use ctl::{ActuatorCommand, Actuators, Controller, Phase};
pub use mecanum::MecanumGeometry;
pub use pid::{DerivativeMode, Pid, PidGains};
pub use state::CtlState;
