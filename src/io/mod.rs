//! CSV collaborators: hourly readings in, annual results out.

pub mod export;
pub mod import;
