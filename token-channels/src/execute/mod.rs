//! Execute handlers for the token channels contract.
//!
//! - `open` - Open and Receive handlers that create channels and take custody
//! - `dispute` - Close, Challenge and Finalize handlers driving settlement

mod dispute;
mod open;

pub use dispute::*;
pub use open::*;
