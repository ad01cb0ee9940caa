//! CLI command modules

pub mod area;
pub mod demo;
pub mod info;
pub mod init;
pub mod plugins;
pub mod validate;
