pub mod enums;
pub mod result;

pub use enums::*;
pub use result::*;
