//! Loading apps from a JSON description.

pub mod conversion;
pub mod raw;

pub use conversion::*;
pub use raw::*;
