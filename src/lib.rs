//! Diagnostic harness for a ReefNet Sensus Ultra dive computer driver.
//!
//! The harness drives a device through three scenarios (general memory dump,
//! user memory dump and dive enumeration), persists what it reads and reports
//! a summary of how each scenario ended.

pub mod capture;
pub mod clock;
pub mod config;
pub mod device;
pub mod error;
pub mod harness;
pub mod log_sink;
pub mod scenario;
pub mod status;

#[cfg(test)]
mod test_device;
