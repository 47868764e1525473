//! VentGuard firmware library.
//!
//! Rain-triggered window/vent closer: a single polling loop that samples a
//! manual switch and an MH-RD rain module, steps a servo toward open or
//! closed, sounds a buzzer while closing, and prints one telemetry line per
//! tick.
//!
//! Exposes every module for the host-side simulator, the telemetry
//! monitor, and integration testing.  ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod sensors;
pub mod telemetry;
