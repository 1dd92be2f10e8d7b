mod chains;
pub use chains::*;

mod config;
pub use config::*;

pub mod contracts;
pub mod errors;

mod pool;
pub use pool::*;

pub mod units;
