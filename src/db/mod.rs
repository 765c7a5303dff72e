pub mod connection;
pub mod migrations;
pub mod blob_repo;

pub use blob_repo::SqliteBlobStore;
pub use connection::*;
