pub mod defaults;
pub mod profile;
