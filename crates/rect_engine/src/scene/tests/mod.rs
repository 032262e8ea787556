//! End-to-end registry scenarios

mod registry_scenarios;
