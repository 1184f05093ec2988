//! Paths inside the Zellij plugin sandbox.
//!
//! Zellij mounts a per-plugin data directory at `/data` and the host
//! filesystem, rooted at the directory Zellij was started from, at `/host`.

use std::path::PathBuf;

/// Trace file name inside [`data_dir`].
pub const TRACE_FILE_NAME: &str = "covidash-otlp.json";

/// Plugin-private data directory.
#[must_use]
pub fn data_dir() -> PathBuf {
    PathBuf::from("/data")
}

/// Location of the OTLP trace file.
#[must_use]
pub fn trace_file() -> PathBuf {
    data_dir().join(TRACE_FILE_NAME)
}

/// Maps a user-supplied path onto the sandbox.
///
/// `~` and `~/...` resolve under `/host`; every other path is used as given.
///
/// ```
/// use covidash::infrastructure::paths::resolve_host_path;
/// use std::path::PathBuf;
///
/// assert_eq!(resolve_host_path("~/themes/dark.toml"), PathBuf::from("/host/themes/dark.toml"));
/// assert_eq!(resolve_host_path("/data/theme.toml"), PathBuf::from("/data/theme.toml"));
/// ```
#[must_use]
pub fn resolve_host_path(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some("") => PathBuf::from("/host"),
        Some(rest) if rest.starts_with('/') => PathBuf::from("/host").join(&rest[1..]),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_file_lives_in_data_dir() {
        assert_eq!(trace_file(), PathBuf::from("/data/covidash-otlp.json"));
    }

    #[test]
    fn tilde_maps_to_host_mount() {
        assert_eq!(resolve_host_path("~"), PathBuf::from("/host"));
        assert_eq!(resolve_host_path("~user/x"), PathBuf::from("~user/x"));
        assert_eq!(resolve_host_path("themes/x.toml"), PathBuf::from("themes/x.toml"));
    }
}
