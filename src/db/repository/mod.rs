pub mod audit;
pub mod document;

pub use audit::*;
pub use document::*;
