pub mod config;
pub mod dataset;
pub mod errors;
pub mod point;
pub mod result;
pub mod stats;
pub mod traits;

pub use config::*;
pub use dataset::*;
pub use errors::*;
pub use point::*;
pub use result::*;
pub use stats::*;
pub use traits::*;
