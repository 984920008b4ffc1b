//! Calculation request inputs

mod data;
pub mod loader;

pub use data::Scenario;
pub use loader::{load_scenarios, load_scenarios_from_reader, ScenarioRecord};
