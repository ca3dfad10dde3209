//! YantraIO - link codec and control pipeline for a mecanum chassis
//! with a pan-tilt gimbal
//!
//! The crate has two halves: a framed binary message layer (`msg`) that
//! speaks the MCU link protocol, and a cascaded PID control pipeline
//! (`control`) driven by a cooperative scheduler. The daemon in `app`
//! wires both to a serial transport.

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod msg;
pub mod sched;
pub mod transport;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{Error, Result};
