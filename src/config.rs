//! Provides the registry of parameter files, a TOML document.
//!
//! ```toml
//! [[file]]
//! key = "semidyna2023"
//! path = "SemiDyna2023.par"
//! format = "SemiDynaEXE"
//! description = "SemiDynaEXE 2023"
//! ```
//!
//! A relative `path` resolves against the directory of the registry file,
//! and the format is guessed from the file stem when `format` is absent.
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::par::{Format, ParseParError, Parser};
use crate::{Point, Transformer};

/// The environment variable of the registry path.
pub const ENV_CONFIG: &str = "PARSHIFT_CONFIG";

/// The registry path used when neither CLI nor environment gives one.
pub const DEFAULT_CONFIG: &str = "parshift.toml";

/// An error which can be returned on handling the registry.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid registry {}: {source}", path.display())]
    Deserialize {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize registry: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid json {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid par file {}: {source}", path.display())]
    Par {
        path: PathBuf,
        #[source]
        source: ParseParError,
    },
    #[error("key already exists: '{key}'")]
    DuplicateKey { key: String },
    #[error("key not found: '{key}'")]
    KeyNotFound { key: String },
}

/// Where the registry path comes from, higher precedence later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigSource {
    Default,
    Environment,
    Cli,
}

/// Returns the registry path with its source.
///
/// The precedence is `cli`, then [`ENV_CONFIG`], then [`DEFAULT_CONFIG`].
pub fn resolve_path(cli: Option<&Path>) -> (PathBuf, ConfigSource) {
    if let Some(path) = cli {
        return (path.to_path_buf(), ConfigSource::Cli);
    }

    match env::var_os(ENV_CONFIG) {
        Some(value) if !value.is_empty() => (PathBuf::from(value), ConfigSource::Environment),
        Some(_) => {
            tracing::warn!(
                var = ENV_CONFIG,
                default = DEFAULT_CONFIG,
                "empty registry path in environment, using default"
            );
            (PathBuf::from(DEFAULT_CONFIG), ConfigSource::Default)
        }
        None => (PathBuf::from(DEFAULT_CONFIG), ConfigSource::Default),
    }
}

/// A registered parameter file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// The unique name of the entry.
    pub key: String,
    /// The par file or the json record.
    pub path: PathBuf,
    /// The format of the par file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    /// Overrides the description of the par file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entry {
    /// Returns the format, guessed from the file stem when not given.
    pub fn format(&self) -> Format {
        self.format.unwrap_or_else(|| {
            let stem = self
                .path
                .file_stem()
                .map(|s| s.to_string_lossy())
                .unwrap_or_default();
            Format::guess(&stem)
        })
    }

    /// Loads the [`Transformer`], a relative path resolves against `base`.
    ///
    /// A `.json` file is read as the serialized [`Transformer`],
    /// and others as par file.
    ///
    /// # Errors
    ///
    /// If it fails to read or to parse the file.
    pub fn load_transformer(&self, base: &Path) -> Result<Transformer, ConfigError> {
        let path = base.join(&self.path);
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            let tf: Transformer = serde_json::from_str(&text)
                .map_err(|source| ConfigError::Json { path, source })?;

            return Ok(match &self.description {
                Some(description) => Transformer::with_description(
                    tf.unit(),
                    tf.parameter().clone(),
                    description.clone(),
                ),
                None => tf,
            });
        }

        let parser = Parser::new(self.format());
        let result = match &self.description {
            Some(description) => parser.parse_with_description(&text, description.as_str()),
            None => parser.parse(&text),
        };
        result.map_err(|source| ConfigError::Par { path, source })
    }
}

/// A failed transformation of a point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// The key of the transformer which fails.
    pub key: String,
    pub message: String,
}

/// A point after the transformations of [`Registry::transform`].
///
/// It serializes as `{"latitude":..,"longitude":..,"altitude":..}`
/// with an `"error"` array only when a transformation fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transformed {
    /// The last successfully transformed position.
    #[serde(flatten)]
    pub point: Point,
    /// Holds at most one failure, the sequence stops there.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub error: Vec<Failure>,
}

impl Transformed {
    /// Returns `true` if no transformation fails.
    #[inline]
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_empty()
    }
}

/// The registry of parameter files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(skip)]
    path: PathBuf,
    #[serde(default)]
    file: Vec<Entry>,
}

impl Registry {
    /// Loads the registry of `path`, empty when the file does not exist.
    ///
    /// # Errors
    ///
    /// If it fails to read or to parse the file.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "registry not found, starting empty");
            return Ok(Self {
                path,
                file: Vec::new(),
            });
        }

        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        let mut registry: Self = toml::from_str(&text).map_err(|source| ConfigError::Deserialize {
            path: path.clone(),
            source,
        })?;
        registry.path = path;

        Ok(registry)
    }

    /// Saves `self` to the path it was loaded from.
    ///
    /// # Errors
    ///
    /// If it fails to serialize or to write.
    pub fn save(&self) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        fs::write(&self.path, text).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Returns the path of the registry file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the directory which relative entry paths resolve against.
    pub fn base(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Returns the entries.
    pub fn entries(&self) -> &[Entry] {
        &self.file
    }

    /// Returns the keys in the registered order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.file.iter().map(|entry| entry.key.as_str())
    }

    /// Returns the entry of `key`.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.file.iter().find(|entry| entry.key == key)
    }

    /// Adds `entry`.
    ///
    /// # Errors
    ///
    /// If the key is already registered.
    pub fn add(&mut self, entry: Entry) -> Result<(), ConfigError> {
        if self.get(&entry.key).is_some() {
            return Err(ConfigError::DuplicateKey { key: entry.key });
        }
        self.file.push(entry);
        Ok(())
    }

    /// Removes the entries of `key` and returns them.
    pub fn remove(&mut self, key: &str) -> Vec<Entry> {
        self.remove_if(|entry| entry.key == key)
    }

    /// Removes the entries which `f` returns `true` for, and returns them.
    pub fn remove_if<F>(&mut self, f: F) -> Vec<Entry>
    where
        F: FnMut(&Entry) -> bool,
    {
        let (removed, kept) = std::mem::take(&mut self.file)
            .into_iter()
            .partition(f);
        self.file = kept;
        removed
    }

    /// Loads the [`Transformer`] of `key`.
    ///
    /// # Errors
    ///
    /// If `key` is not registered, or it fails to load the file.
    pub fn load_transformer(&self, key: &str) -> Result<Transformer, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::KeyNotFound {
                key: key.to_string(),
            })?
            .load_transformer(self.base())
    }

    /// Transforms `points` by the transformers of `keys` in sequence.
    ///
    /// The transformers apply in reverse order when `backward` is `true`,
    /// and `safe` selects [`Transformer::backward_safe`] then.
    ///
    /// A point whose transformation fails keeps the last position,
    /// records the failure and skips the rest of the sequence,
    /// the other points continue.
    ///
    /// # Errors
    ///
    /// If a key is not registered, or it fails to load the file.
    pub fn transform<I, K>(
        &self,
        points: I,
        keys: &[K],
        backward: bool,
        safe: bool,
    ) -> Result<Vec<Transformed>, ConfigError>
    where
        I: IntoIterator<Item = Point>,
        K: AsRef<str>,
    {
        let mut transformers = keys
            .iter()
            .map(|key| {
                let key = key.as_ref();
                Ok((key, self.load_transformer(key)?))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        if backward {
            transformers.reverse();
        }

        let result = points
            .into_iter()
            .map(|origin| {
                let mut point = origin;
                let mut error = Vec::new();

                for (key, tf) in &transformers {
                    let result = match (backward, safe) {
                        (false, _) => tf.forward(&point),
                        (true, false) => tf.backward(&point),
                        (true, true) => tf.backward_safe(&point),
                    };

                    match result {
                        Ok(p) => point = p,
                        Err(e) => {
                            tracing::debug!(key = *key, ?origin, error = %e, "transformation failed");
                            error.push(Failure {
                                key: key.to_string(),
                                message: e.to_string(),
                            });
                            break;
                        }
                    }
                }

                Transformed { point, error }
            })
            .collect();

        Ok(result)
    }
}
