//! Search execution.
//!
//! One [`SearchExecutor`] runs every query; the [`SearchPolicy`] chosen from
//! configuration decides whether results come from the backend or from the
//! [`SimulatedSource`].

pub mod executor;
pub mod simulated;

pub use executor::{SearchExecutor, SearchOutcome, SearchPolicy};
pub use simulated::{SimulatedSource, MAX_SIMULATED};
