// src/lib.rs — wbso library root

pub mod cli;
pub mod core;
pub mod infra;
