//! Command-line interface over edge-list files.

pub mod commands;
