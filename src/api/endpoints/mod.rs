pub mod detect;
pub mod documents;
pub mod export;
pub mod health;
pub mod process;
