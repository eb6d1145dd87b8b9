//! Platform-specific directory paths.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "opsgrid";
const APPLICATION: &str = "opsgrid";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory.
///
/// - Linux: `$XDG_CACHE_HOME/opsgrid` or `~/.cache/opsgrid`
/// - macOS: `~/Library/Caches/dev.opsgrid.opsgrid`
/// - Windows: `C:\Users\<User>\AppData\Local\opsgrid\opsgrid\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the path to the latest log file.
///
/// Falls back to the working directory when no home directory is known.
pub fn log_file() -> PathBuf {
    match cache_dir() {
        Some(dir) if std::fs::create_dir_all(&dir).is_ok() => dir.join("latest.log"),
        _ => PathBuf::from("opsgrid.log"),
    }
}
