//! Shared authentication primitives for devlink services.
//!
//! Token issuance belongs to the identity service; everything here is
//! validation-only so that resource services never hold signing material.

pub mod jwt;
