pub mod document;
pub mod enums;
pub mod fields;

pub use document::*;
pub use enums::*;
pub use fields::*;
