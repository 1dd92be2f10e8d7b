pub mod apis;
pub mod orchestrator;
pub use orchestrator::LiquidityProvisioner;

pub mod providers;
#[cfg(test)]
pub mod test_utils;
pub mod types;
