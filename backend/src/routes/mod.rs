pub mod catalog;
pub mod chat;
pub mod classify;
pub mod export;
pub mod plots;
pub mod summary;
