mod eth;
pub use eth::*;
