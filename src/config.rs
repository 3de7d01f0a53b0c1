//! Run configuration: file kinds, excluded directories and worker count.
//!
//! Values come from three layers, later layers winning:
//!
//! ```text
//! defaults  ->  namespacer.yaml (scan root or --config)  ->  CLI flags
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use crate::context::ServiceContext;
use crate::error::NamespaceError;

/// File looked up in the scan root when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "namespacer.yaml";

/// Directory names skipped by default: build output, intermediate output
/// and version-control / IDE metadata.
pub const DEFAULT_EXCLUDE_DIRS: [&str; 4] = ["bin", "obj", ".git", ".vs"];

/// Effective configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory names never descended into.
    pub exclude_dirs: BTreeSet<String>,
    /// Extension of project marker files, without the dot.
    pub marker_extension: String,
    /// Extension of source files, without the dot.
    pub source_extension: String,
    /// Maximum number of files processed concurrently.
    pub jobs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(ToString::to_string).collect(),
            marker_extension: "csproj".to_string(),
            source_extension: "cs".to_string(),
            jobs: std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get),
        }
    }
}

/// On-disk shape of `namespacer.yaml`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    /// Replaces the default exclusion set.
    exclude_dirs: Option<Vec<String>>,
    /// Added on top of the (default or replaced) exclusion set.
    extra_exclude_dirs: Vec<String>,
    marker_extension: Option<String>,
    source_extension: Option<String>,
    jobs: Option<usize>,
}

impl Config {
    /// Loads the configuration for a scan rooted at `root`.
    ///
    /// When `explicit` is given that file must exist. Otherwise
    /// `<root>/namespacer.yaml` is used if present, and defaults apply if not.
    ///
    /// # Errors
    ///
    /// Returns [`NamespaceError::Config`] if the file cannot be read or parsed
    /// or holds invalid values.
    pub fn load(
        ctx: &ServiceContext,
        root: &Path,
        explicit: Option<&Path>,
    ) -> Result<Self, NamespaceError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = root.join(CONFIG_FILE_NAME);
                if !ctx.fs.exists(&candidate) {
                    log::debug!("no {CONFIG_FILE_NAME} in {}, using defaults", root.display());
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let contents = ctx.fs.read_to_string(&path).map_err(|e| NamespaceError::Config {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        let config = Self::from_yaml(&contents).map_err(|message| NamespaceError::Config {
            message: format!("{}: {message}", path.display()),
        })?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses a YAML configuration document on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the YAML is malformed or a
    /// value is out of range.
    pub fn from_yaml(contents: &str) -> Result<Self, String> {
        // An empty document deserializes to unit, not to a map.
        let file: ConfigFile = if contents.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(contents).map_err(|e| e.to_string())?
        };

        let mut config = Self::default();
        if let Some(exclude_dirs) = file.exclude_dirs {
            config.exclude_dirs = exclude_dirs.into_iter().collect();
        }
        config.exclude_dirs.extend(file.extra_exclude_dirs);
        if let Some(ext) = file.marker_extension {
            config.marker_extension = normalize_extension(&ext)?;
        }
        if let Some(ext) = file.source_extension {
            config.source_extension = normalize_extension(&ext)?;
        }
        if let Some(jobs) = file.jobs {
            config.jobs = jobs;
        }
        config.validate()?;
        Ok(config)
    }

    /// Applies command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns [`NamespaceError::Config`] if the resulting values are invalid.
    pub fn with_overrides(
        mut self,
        extra_exclude_dirs: &[String],
        jobs: Option<usize>,
    ) -> Result<Self, NamespaceError> {
        self.exclude_dirs.extend(extra_exclude_dirs.iter().cloned());
        if let Some(jobs) = jobs {
            self.jobs = jobs;
        }
        self.validate().map_err(|message| NamespaceError::Config { message })?;
        Ok(self)
    }

    /// Returns `true` if a directory with this name must not be scanned.
    #[must_use]
    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.exclude_dirs.contains(dir_name)
    }

    fn validate(&self) -> Result<(), String> {
        if self.jobs == 0 {
            return Err("jobs must be at least 1".to_string());
        }
        if self.marker_extension.eq_ignore_ascii_case(&self.source_extension) {
            return Err(format!(
                "marker and source extension must differ (both are {:?})",
                self.source_extension
            ));
        }
        Ok(())
    }
}

fn normalize_extension(ext: &str) -> Result<String, String> {
    let ext = ext.trim().trim_start_matches('.');
    if ext.is_empty() || ext.contains(['/', '\\']) {
        return Err(format!("invalid file extension {ext:?}"));
    }
    Ok(ext.to_string())
}
