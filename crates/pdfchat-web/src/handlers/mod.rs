pub mod ask;
pub mod summary;
pub mod upload;
