pub mod definition;
pub mod set;

pub use definition::*;
pub use set::*;
