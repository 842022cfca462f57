//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the Reloj7 appliance:
//! the rolling weather state store, the display derivations (carousel,
//! wind classification), the one-shot alarm timer, and the presentation
//! service that drives them on a fixed cadence. All interaction with
//! hardware and the network happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod alarm;
pub mod carousel;
pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod state;
pub mod wind;
