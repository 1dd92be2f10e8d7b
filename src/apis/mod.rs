pub mod allowance_api;
pub use allowance_api::*;

pub mod approval_api;
pub use approval_api::*;

pub mod position_api;
pub use position_api::*;
