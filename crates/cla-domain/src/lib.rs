//! Domain types shared by the CLA portal crates.
//!
//! Pure types with no framework dependencies: identifiers, manager roles,
//! link kinds and verification-code purposes.

pub mod id;
pub mod link;
pub mod manager;
pub mod purpose;
