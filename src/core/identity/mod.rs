//! Identity, roles, and authorization policy

pub mod policy;
pub mod service;

pub use policy::{required_roles, Operation};
pub use service::{IdentityService, RegisterRequest};
