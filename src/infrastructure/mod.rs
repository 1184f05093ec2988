//! Sandbox filesystem locations.

pub mod paths;

pub use paths::{data_dir, resolve_host_path, trace_file};
