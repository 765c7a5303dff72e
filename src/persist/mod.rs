pub mod adapter;
pub mod blob;

pub use adapter::*;
pub use blob::*;
