//! Application core: pure trigger logic, zero I/O.
//!
//! The mode controller and its events live here.  All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
