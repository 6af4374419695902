use dph_boundary as json;
use dph_core::{
    entities::*,
    repositories::{Error as RepoError, LocationRepo, RawCaptureRepo},
};
use serde::Serialize;
use serde_json::Value;
use std::{
    fs,
    io::{self, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use thiserror::Error;

type Result<T> = std::result::Result<T, RepoError>;

pub const RAW_CAPTURE_EXTENSION: &str = "raw.json";

#[derive(Debug, Error)]
pub enum RawCaptureError {
    #[error("Unable to read raw capture {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Raw capture {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Reads the elements of a raw capture.
///
/// A capture without an `elements` array has no elements.
/// Elements that do not look like Overpass elements are skipped.
pub fn read_raw_capture(path: &Path) -> std::result::Result<Vec<Element>, RawCaptureError> {
    let contents = fs::read_to_string(path).map_err(|source| RawCaptureError::Read {
        path: path.to_owned(),
        source,
    })?;
    let capture: Value =
        serde_json::from_str(&contents).map_err(|source| RawCaptureError::Parse {
            path: path.to_owned(),
            source,
        })?;
    Ok(elements_from_capture(&capture))
}

pub fn elements_from_capture(capture: &Value) -> Vec<Element> {
    let Some(elements) = capture.get("elements").and_then(Value::as_array) else {
        log::warn!("The raw capture contains no elements");
        return vec![];
    };
    elements
        .iter()
        .filter_map(|element| {
            serde_json::from_value::<json::Element>(element.clone())
                .map_err(|err| log::debug!("Skipping malformed element: {err}"))
                .ok()
        })
        .map(Element::from)
        .collect()
}

fn write_pretty_json<T: Serialize + ?Sized>(writer: impl Write, value: &T) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()
}

// Same mode as `fs::write`, i.e. subject to the umask
// instead of the owner-only default of temporary files.
#[cfg(unix)]
fn new_temp_file(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;
    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_temp_file(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

/// Writes the file as a whole or not at all.
///
/// An existing file keeps its permissions.
fn write_json_atomically<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let permissions = match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(err) if err.kind() == ErrorKind::NotFound => None,
        Err(err) => return Err(err),
    };
    let mut file = new_temp_file(dir)?;
    write_pretty_json(file.as_file_mut(), value)?;
    if let Some(permissions) = permissions {
        file.as_file().set_permissions(permissions)?;
    }
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// The canonical collection, stored as a JSON array.
#[derive(Debug, Clone)]
pub struct LocationFile {
    path: PathBuf,
}

impl LocationFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<file>.backup.<suffix>.json`
    pub fn backup_path(&self, suffix: &str) -> PathBuf {
        let mut file_name = self.path.as_os_str().to_owned();
        file_name.push(format!(".backup.{suffix}.json"));
        PathBuf::from(file_name)
    }
}

impl LocationRepo for LocationFile {
    fn load_locations(&self) -> Result<Vec<Location>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("{} does not exist yet", self.path.display());
                return Ok(vec![]);
            }
            Err(err) => return Err(err.into()),
        };
        let locations: Vec<json::Location> = serde_json::from_str(&contents)
            .map_err(|err| RepoError::Corrupt(format!("{}: {err}", self.path.display())))?;
        Ok(locations.into_iter().map(Location::from).collect())
    }

    fn backup_locations(&self, suffix: &str) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let backup = self.backup_path(suffix);
        fs::copy(&self.path, &backup)?;
        Ok(Some(backup.display().to_string()))
    }

    fn store_locations(&self, locations: &[Location]) -> Result<()> {
        let locations: Vec<json::Location> =
            locations.iter().cloned().map(json::Location::from).collect();
        write_json_atomically(&self.path, &locations)?;
        log::debug!(
            "Stored {} locations in {}",
            locations.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Raw captures, organized as `<root>/<source>/<date>/<query>.raw.json`.
#[derive(Debug, Clone)]
pub struct RawCaptureDir {
    root: PathBuf,
    source: String,
}

impl RawCaptureDir {
    pub fn new(root: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            source: source.into(),
        }
    }

    pub fn capture_path(&self, date: &str, query_name: &str) -> PathBuf {
        self.root
            .join(&self.source)
            .join(date)
            .join(format!("{query_name}.{RAW_CAPTURE_EXTENSION}"))
    }
}

impl RawCaptureRepo for RawCaptureDir {
    fn save_raw_capture(&self, date: &str, query_name: &str, capture: &Value) -> Result<String> {
        let path = self.capture_path(date, query_name);
        write_json_atomically(&path, capture)?;
        Ok(path.display().to_string())
    }
}
