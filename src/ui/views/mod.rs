pub mod lock;
pub mod status;
pub mod summary;
