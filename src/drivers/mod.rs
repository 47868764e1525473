//! Actuator drivers: the vent servo and the alert buzzer.

pub mod buzzer;
pub mod servo;
