use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::dance::{DanceType, UnknownDance};

/// File extensions picked up when a catalog is read from a directory tree.
pub const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "ogg", "oga", "wav", "flac", "m4a"];

/// Clip pools per dance type. Every dance type has at least one clip.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ClipCatalog {
    pools: BTreeMap<DanceType, Vec<String>>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no clip pool defined for {dance}")]
    MissingPool { dance: DanceType },
    #[error("clip pool for {dance} is empty")]
    EmptyPool { dance: DanceType },
    #[error("clip {clip} appears more than once in the {dance} pool")]
    DuplicateClip { dance: DanceType, clip: String },
    #[error("clip {clip} is listed for both {first} and {second}")]
    SharedClip {
        clip: String,
        first: DanceType,
        second: DanceType,
    },
    #[error(transparent)]
    UnknownDance(#[from] UnknownDance),
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog at {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse catalog at {path}: {source}")]
    ParseError {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid catalog at {path}: {source}")]
    Invalid { path: String, source: CatalogError },
}

impl PartialEq for CatalogLoadError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ReadError { path: left, .. }, Self::ReadError { path: right, .. }) => {
                left == right
            }
            (Self::ParseError { path: left, .. }, Self::ParseError { path: right, .. }) => {
                left == right
            }
            (
                Self::Invalid {
                    path: left,
                    source: left_source,
                },
                Self::Invalid {
                    path: right,
                    source: right_source,
                },
            ) => left == right && left_source == right_source,
            _ => false,
        }
    }
}

impl Eq for CatalogLoadError {}

/// On-disk shape: `{"pools": {"Waltz": ["waltz_1.mp3"], ...}}`.
#[derive(Debug, Clone, serde::Deserialize)]
struct CatalogFile {
    pools: BTreeMap<String, Vec<String>>,
}

impl ClipCatalog {
    /// Builds a catalog from `(dance, clips)` pairs. Pools given twice for the
    /// same dance are concatenated.
    pub fn new<I, S>(pools: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (DanceType, Vec<S>)>,
        S: Into<String>,
    {
        let mut merged: BTreeMap<DanceType, Vec<String>> = BTreeMap::new();

        for (dance, clips) in pools {
            merged
                .entry(dance)
                .or_default()
                .extend(clips.into_iter().map(Into::into));
        }

        validate(&merged)?;

        Ok(Self { pools: merged })
    }

    /// Wraps pools known to be complete, such as the built-in demo data.
    pub(crate) fn from_checked_pools(pools: BTreeMap<DanceType, Vec<String>>) -> Self {
        Self { pools }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogLoadError> {
        Self::parse_json(json.as_bytes(), "<inline>")
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogLoadError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| CatalogLoadError::ReadError {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse_json(&data, &path.display().to_string())
    }

    /// Reads a directory whose sub-directories are named after dance types.
    /// Audio files inside become clips with the id `<directory>/<file>`.
    pub fn from_directory(root: impl AsRef<Path>) -> Result<Self, CatalogLoadError> {
        let root = root.as_ref();
        let root_label = root.display().to_string();
        let mut pools: Vec<(DanceType, Vec<String>)> = Vec::new();

        for entry in read_dir(root)? {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let Some(dir_name) = path.file_name().and_then(|value| value.to_str()) else {
                continue;
            };
            if dir_name.starts_with('.') {
                continue;
            }

            let dance: DanceType =
                dir_name
                    .parse()
                    .map_err(|error: UnknownDance| CatalogLoadError::Invalid {
                        path: path.display().to_string(),
                        source: error.into(),
                    })?;

            let mut clips = Vec::new();
            for clip_entry in read_dir(&path)? {
                let clip_path = clip_entry.path();
                if clip_path.is_file() && is_audio_file(&clip_path) {
                    if let Some(file_name) = clip_path.file_name().and_then(|value| value.to_str())
                    {
                        clips.push(format!("{}/{}", dir_name, file_name));
                    }
                }
            }
            clips.sort();

            pools.push((dance, clips));
        }

        let catalog = Self::new(pools).map_err(|source| CatalogLoadError::Invalid {
            path: root_label.clone(),
            source,
        })?;

        tracing::debug!(root = %root_label, clips = catalog.clip_count(), "loaded catalog directory");

        Ok(catalog)
    }

    /// Loads a JSON file or, for directories, a dance-named directory tree.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogLoadError> {
        let path = path.as_ref();
        if path.is_dir() {
            Self::from_directory(path)
        } else {
            Self::from_json_file(path)
        }
    }

    pub fn pool(&self, dance: DanceType) -> &[String] {
        self.pools.get(&dance).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, dance: DanceType, clip: &str) -> bool {
        self.pool(dance).iter().any(|candidate| candidate == clip)
    }

    /// Dance type whose pool holds `clip`, if any. A clip belongs to at most
    /// one pool.
    pub fn dance_of(&self, clip: &str) -> Option<DanceType> {
        self.pools
            .iter()
            .find(|(_, clips)| clips.iter().any(|candidate| candidate == clip))
            .map(|(dance, _)| *dance)
    }

    pub fn clip_count(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }

    fn parse_json(data: &[u8], path: &str) -> Result<Self, CatalogLoadError> {
        let parsed: CatalogFile =
            serde_json::from_slice(data).map_err(|source| CatalogLoadError::ParseError {
                path: path.to_string(),
                source,
            })?;

        let invalid = |source: CatalogError| CatalogLoadError::Invalid {
            path: path.to_string(),
            source,
        };

        let mut pools = Vec::with_capacity(parsed.pools.len());
        for (name, clips) in parsed.pools {
            let dance: DanceType = name.parse().map_err(|error: UnknownDance| invalid(error.into()))?;
            pools.push((dance, clips));
        }

        Self::new(pools).map_err(invalid)
    }
}

/// Path an audio surface loads a clip from: `<base_dir>/<clip_id>`.
pub fn clip_path(base_dir: &str, clip_id: &str) -> String {
    if base_dir.is_empty() {
        return clip_id.to_string();
    }

    let base = base_dir.trim_end_matches('/');
    format!("{}/{}", base, clip_id)
}

fn validate(pools: &BTreeMap<DanceType, Vec<String>>) -> Result<(), CatalogError> {
    let mut owners: BTreeMap<&str, DanceType> = BTreeMap::new();

    for dance in DanceType::ALL {
        let clips = pools
            .get(&dance)
            .ok_or(CatalogError::MissingPool { dance })?;

        if clips.is_empty() {
            return Err(CatalogError::EmptyPool { dance });
        }

        let mut seen = BTreeSet::new();
        for clip in clips {
            if !seen.insert(clip.as_str()) {
                return Err(CatalogError::DuplicateClip {
                    dance,
                    clip: clip.clone(),
                });
            }

            if let Some(first) = owners.insert(clip.as_str(), dance) {
                return Err(CatalogError::SharedClip {
                    clip: clip.clone(),
                    first,
                    second: dance,
                });
            }
        }
    }

    Ok(())
}

fn read_dir(path: &Path) -> Result<Vec<fs::DirEntry>, CatalogLoadError> {
    let read_error = |source| CatalogLoadError::ReadError {
        path: path.display().to_string(),
        source,
    };

    fs::read_dir(path)
        .map_err(read_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_error)
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(extension))
        })
        .unwrap_or(false)
}
