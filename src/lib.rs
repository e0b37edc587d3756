pub mod backend;
pub mod config;
pub mod constraints;
pub mod diagnose;
pub mod domain;
pub mod error;
pub mod objective;
pub mod options;
pub mod result;
pub mod server;
pub mod solve;
pub mod validate;
