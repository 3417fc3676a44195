use std::cell::Cell;
use std::fmt;
use std::fs;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use log::warn;

pub const DEFAULT_HIGHSCORE_FILE: &str = "highscore.txt";
pub const HIGHSCORE_PATH_ENV: &str = "TWENTY48_HIGHSCORE_PATH";

/// Where the best score lives between runs.
pub trait HighScoreStore {
    /// The stored best, or 0 when there is none or it cannot be read.
    fn load_high_score(&self) -> u32;

    fn save_high_score(&self, score: u32) -> io::Result<()>;
}

#[derive(Debug)]
pub enum HighScoreError {
    Io(io::Error),
    Parse { text: String, source: ParseIntError },
}

impl fmt::Display for HighScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighScoreError::Io(err) => write!(f, "reading high score failed: {err}"),
            HighScoreError::Parse { text, source } => {
                write!(f, "high score {text:?} is not a number: {source}")
            }
        }
    }
}

impl std::error::Error for HighScoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HighScoreError::Io(err) => Some(err),
            HighScoreError::Parse { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for HighScoreError {
    fn from(err: io::Error) -> Self {
        HighScoreError::Io(err)
    }
}

/// A text file holding one decimal integer.
#[derive(Debug, Clone)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl Default for HighScoreFile {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHSCORE_FILE)
    }
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `TWENTY48_HIGHSCORE_PATH` if set, else `highscore.txt` in the working directory.
    pub fn from_env() -> Self {
        match std::env::var_os(HIGHSCORE_PATH_ENV) {
            Some(explicit) if !explicit.is_empty() => Self::new(explicit),
            _ => Self::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is a best of 0; anything else unreadable is an error.
    pub fn try_load(&self) -> Result<u32, HighScoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };
        let trimmed = text.trim();
        trimmed.parse::<u32>().map_err(|source| HighScoreError::Parse {
            text: trimmed.to_string(),
            source,
        })
    }
}

impl HighScoreStore for HighScoreFile {
    fn load_high_score(&self) -> u32 {
        self.try_load().unwrap_or_else(|err| {
            warn!("{}: {err}; starting from 0", self.path.display());
            0
        })
    }

    fn save_high_score(&self, score: u32) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, score.to_string())
    }
}

/// Keeps the best score in memory; used by the headless demo and tests.
#[derive(Debug, Default)]
pub struct MemoryHighScore {
    best: Cell<u32>,
    saves: Cell<usize>,
}

impl MemoryHighScore {
    pub fn new(best: u32) -> Self {
        Self {
            best: Cell::new(best),
            saves: Cell::new(0),
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load_high_score(&self) -> u32 {
        self.best.get()
    }

    fn save_high_score(&self, score: u32) -> io::Result<()> {
        self.best.set(score);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for &S {
    fn load_high_score(&self) -> u32 {
        (**self).load_high_score()
    }

    fn save_high_score(&self, score: u32) -> io::Result<()> {
        (**self).save_high_score(score)
    }
}
