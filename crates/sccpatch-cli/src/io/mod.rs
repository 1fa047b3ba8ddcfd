pub mod fragments;
pub mod music;
pub mod process;
pub mod profile_file;
pub mod rom_file;
