pub mod access;
pub mod config;
pub mod token;
