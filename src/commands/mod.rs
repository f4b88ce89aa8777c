// src/commands/mod.rs
pub mod iterate;
pub mod version;
