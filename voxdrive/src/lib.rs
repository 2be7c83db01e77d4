// src/lib.rs
pub mod error;
pub mod config;
pub mod cli;

pub mod session {
    pub mod analyzer;
    pub mod sink;
    pub mod drive;
}
