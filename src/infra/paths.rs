// src/infra/paths.rs — XDG-compliant path management
//
// All paths respect the WBSO_HOME environment variable for isolation.
// When WBSO_HOME is set, config and data live under that directory.
// When unset, config uses the platform config dir and data the platform
// data dir (e.g. ~/.config/wbso and ~/.local/share/wbso on Linux).

use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::OnceLock;

static PROJECT_DIRS: OnceLock<Option<ProjectDirs>> = OnceLock::new();

fn project_dirs() -> Option<&'static ProjectDirs> {
    PROJECT_DIRS
        .get_or_init(|| ProjectDirs::from("", "", "wbso"))
        .as_ref()
}

/// Returns the WBSO_HOME override, if set.
fn wbso_home() -> Option<PathBuf> {
    std::env::var_os("WBSO_HOME").map(PathBuf::from)
}

/// Configuration directory: $WBSO_HOME/ or the platform config dir.
/// Falls back to the working directory when no home can be determined.
pub fn config_dir() -> PathBuf {
    if let Some(home) = wbso_home() {
        return home;
    }
    project_dirs()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Data directory: $WBSO_HOME/data/ or the platform data dir.
pub fn data_dir() -> PathBuf {
    if let Some(home) = wbso_home() {
        return home.join("data");
    }
    project_dirs()
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Default ledger file path
pub fn ledger_path() -> PathBuf {
    data_dir().join("ledger.json")
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
