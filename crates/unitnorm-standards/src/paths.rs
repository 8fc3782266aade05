//! Settings file path resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the settings file location.
pub const SETTINGS_ENV_VAR: &str = "UNITNORM_SETTINGS";

/// File name used when neither a flag nor the environment names a settings file.
pub const DEFAULT_SETTINGS_FILE: &str = "settings.toml";

/// Get the settings file path.
///
/// Resolution order:
/// 1. Explicit path (e.g. from `--settings`)
/// 2. `UNITNORM_SETTINGS` environment variable
/// 3. `settings.toml` in the current directory
pub fn settings_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var(SETTINGS_ENV_VAR) {
        return PathBuf::from(path);
    }
    PathBuf::from(DEFAULT_SETTINGS_FILE)
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let path = settings_path(Some(Path::new("/etc/unitnorm.toml")));
        assert_eq!(path, PathBuf::from("/etc/unitnorm.toml"));
    }

    #[test]
    fn relative_paths_join_base() {
        let base = Path::new("/data/config");
        assert_eq!(
            resolve(base, Path::new("raw/CN.csv")),
            PathBuf::from("/data/config/raw/CN.csv")
        );
        assert_eq!(
            resolve(base, Path::new("/abs/CN.csv")),
            PathBuf::from("/abs/CN.csv")
        );
    }
}
