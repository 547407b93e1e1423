pub mod credential;
pub mod roster;
pub mod verification_code;
