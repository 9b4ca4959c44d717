use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use crate::error::AppError;

lazy_static! {
    // Only names the store itself generated are ever served back.
    static ref ARTIFACT_NAME: Regex = Regex::new(r"^tts_[0-9a-f]{32}\.mp3$").unwrap();
}

/// A generated audio file, addressed by its unique filename.
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub filename: String,
}

impl AudioArtifact {
    pub fn url(&self) -> String {
        format!("/api/audio/{}", self.filename)
    }
}

/// Flat directory of generated MP3 files. No expiry, no eviction; files live
/// until an explicit cleanup call.
#[derive(Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: PathBuf) -> Result<Self, AppError> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Write a fresh artifact under a generated name. `create_new` keeps the
    /// never-overwrite invariant even if a name were ever reissued.
    pub fn create(&self, bytes: &[u8]) -> Result<AudioArtifact, AppError> {
        let filename = format!("tts_{}.mp3", Uuid::new_v4().simple());
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.dir.join(&filename))?;
        file.write_all(bytes)?;
        Ok(AudioArtifact { filename })
    }

    /// Read an artifact back. Names that don't match the generated pattern are
    /// rejected before touching the filesystem, so a request can never reach
    /// outside the storage directory.
    pub fn open(&self, filename: &str) -> Result<Vec<u8>, AppError> {
        if !ARTIFACT_NAME.is_match(filename) {
            return Err(AppError::ArtifactNotFound(filename.to_string()));
        }
        match fs::read(self.dir.join(filename)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::ArtifactNotFound(filename.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete every managed artifact, returning how many were removed.
    pub fn cleanup(&self) -> Result<usize, AppError> {
        let mut deleted = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e == "mp3").unwrap_or(false) {
                fs::remove_file(&path)?;
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}
