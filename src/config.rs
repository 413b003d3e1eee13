//! Configuration: user settings and observing block files.
//!
//! Settings are loaded from `~/.gravseq/config.toml`. The file is optional;
//! every setting has a default. Observing block files are required input
//! and every field in them must be present, except `swap` and the
//! sequence-level `repeat`.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    model::{ObservationContext, Offset, SequenceRequest},
    oracle::{FixedPositions, OrbitCatalog},
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHome,

    #[error("no file found at {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// User settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Settings {
    /// Directory of orbit posterior files. Defaults to `~/.gravseq/orbits`.
    pub catalog_dir: Option<PathBuf>,

    /// Where plans are written.
    pub out_dir: PathBuf,

    /// Destination directory on the instrument workstation.
    pub remote_dir: String,

    /// Alternate companion names, alias → catalog name.
    pub aliases: BTreeMap<String, String>,

    /// Companion positions that bypass orbit prediction, `[ra, dec]` in mas.
    pub fixed: BTreeMap<String, [f64; 2]>,
}

/// Aliases that always resolve unless the user maps the same name elsewhere.
const BUILTIN_ALIASES: &[(&str, &str)] = &[("betpicb", "betapicb")];

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_dir: None,
            out_dir: PathBuf::from("OBs"),
            remote_dir: "targets/exoplanets".to_string(),
            aliases: BTreeMap::new(),
            fixed: BTreeMap::new(),
        }
        .with_builtin_aliases()
    }
}

impl Settings {
    /// Load settings from `~/.gravseq/config.toml`, or defaults if there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => parse(path, &contents).map(Self::with_builtin_aliases),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Adds the built-in aliases under the user's own entries.
    fn with_builtin_aliases(mut self) -> Self {
        for (alias, name) in BUILTIN_ALIASES {
            self.aliases
                .entry((*alias).to_string())
                .or_insert_with(|| (*name).to_string());
        }
        self
    }

    /// The settings file path: `~/.gravseq/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".gravseq").join("config.toml"))
    }

    /// The orbit catalog, rooted at `dir` if given, else at the configured directory.
    pub fn catalog(&self, dir: Option<&Path>) -> Result<OrbitCatalog, ConfigError> {
        let dir = match dir.or(self.catalog_dir.as_deref()) {
            Some(dir) => dir.to_path_buf(),
            None => dirs::home_dir()
                .ok_or(ConfigError::NoHome)?
                .join(".gravseq")
                .join("orbits"),
        };

        let fixed = self
            .fixed
            .iter()
            .fold(FixedPositions::new(), |fixed, (name, [ra, dec])| {
                fixed.with(name, Offset::new(*ra, *dec))
            });

        Ok(OrbitCatalog::new(dir)
            .with_aliases(&self.aliases)
            .with_fixed(fixed))
    }
}

/// One observing block file: the fixed context plus the sequence to plan.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservingBlock {
    pub observation: ObservationContext,
    pub sequence: SequenceRequest,
}

impl ObservingBlock {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::Missing(path.to_path_buf()));
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        parse(path, &contents)
    }
}

fn parse<T: serde::de::DeserializeOwned>(path: &Path, contents: &str) -> Result<T, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
