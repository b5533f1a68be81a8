//! Patient and doctor directories

pub mod service;

pub use service::DirectoryService;
