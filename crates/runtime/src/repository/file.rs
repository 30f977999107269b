//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use uno_core::GameState;

use super::{RepositoryError, Result, StateRepository};

const STATE_EXTENSION: &str = "bin";

/// File-based implementation of StateRepository.
///
/// Stores each room as `{room}.bin` in bincode format. Writes go to a
/// temporary file first and are moved into place with a rename, so a crash
/// mid-write leaves the previous snapshot intact.
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    /// Create a new file-based state repository rooted at `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a room file.
    ///
    /// Room keys become file names, so anything that could escape the base
    /// directory is rejected.
    fn state_path(&self, room: &str) -> Result<PathBuf> {
        let valid = !room.is_empty()
            && room
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
        if !valid {
            return Err(RepositoryError::InvalidRoomKey(room.to_owned()));
        }
        Ok(self.base_dir.join(format!("{room}.{STATE_EXTENSION}")))
    }
}

impl StateRepository for FileStateRepository {
    fn get(&self, room: &str) -> Result<Option<GameState>> {
        let path = self.state_path(room)?;

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let state: GameState = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!(room, path = %path.display(), "loaded room state");

        Ok(Some(state))
    }

    fn put(&self, room: &str, state: &GameState) -> Result<()> {
        let path = self.state_path(room)?;
        let temp_path = path.with_extension("bin.tmp");

        let bytes =
            bincode::serialize(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!(room, path = %path.display(), "saved room state");

        Ok(())
    }

    fn delete(&self, room: &str) -> Result<()> {
        let path = self.state_path(room)?;

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!(room, "deleted room state");
        }

        Ok(())
    }

    fn list_rooms(&self) -> Result<Vec<String>> {
        let mut rooms = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) == Some(STATE_EXTENSION)
                && let Some(room) = path.file_stem().and_then(|s| s.to_str())
            {
                rooms.push(room.to_owned());
            }
        }

        rooms.sort_unstable();
        Ok(rooms)
    }
}
