//! Route handlers organized by resource

pub mod assets;
pub mod boats;
pub mod home;
