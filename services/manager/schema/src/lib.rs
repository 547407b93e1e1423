//! sea-orm entities for the manager service tables.

pub mod corp_managers;
pub mod links;
pub mod verification_codes;
