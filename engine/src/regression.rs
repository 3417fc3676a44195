//! Render-hash regression helpers.
//!
//! A scenario is a `GameLogic` plus a list of inputs. Rendering every state into an RGBA buffer
//! and hashing it gives a compact fingerprint that can be stored as JSON and compared later.
//! Rendering is supplied by the caller so the engine stays game-agnostic.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use log::info;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{GameLogic, HeadlessRunner};

/// Environment flag helper: accepts `1/true/yes/on` (case-insensitive).
pub fn env_flag(name: &str) -> bool {
    parse_flag(std::env::var(name).ok().as_deref()).unwrap_or(false)
}

/// Parses `1/true/yes/on` and `0/false/no/off`; anything else is `None`.
pub fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Whether hash logs may be rewritten in place instead of compared. The caller names the flag.
pub fn update_goldens_enabled(var: &str) -> bool {
    env_flag(var)
}

pub fn rgba_sha256_hex(rgba: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(rgba);
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameHashLog {
    pub version: u32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub hash_alg: String,
    /// One hash per state, starting with the initial state.
    pub hashes: Vec<String>,
}

impl FrameHashLog {
    pub fn new(name: impl Into<String>, width: u32, height: u32, hashes: Vec<String>) -> Self {
        Self {
            version: 1,
            name: name.into(),
            width,
            height,
            hash_alg: "sha256".to_string(),
            hashes,
        }
    }

    pub fn load_json(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let reader = io::BufReader::new(fs::File::open(path)?);
        serde_json::from_reader(reader).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed parsing hash log {}: {e}", path.display()),
            )
        })
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut writer = io::BufWriter::new(fs::File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self).map_err(io::Error::other)?;
        writer.flush()
    }

    /// Index of the first frame whose hash differs, counting a length difference as a mismatch
    /// at the end of the shorter log.
    pub fn first_mismatch(&self, other: &FrameHashLog) -> Option<usize> {
        let shared = self.hashes.len().min(other.hashes.len());
        (0..shared)
            .find(|&i| self.hashes[i] != other.hashes[i])
            .or_else(|| (self.hashes.len() != other.hashes.len()).then_some(shared))
    }
}

/// Runs `inputs` through a fresh runner and hashes the rendered frame of every state.
pub fn record_render_hashes<G, Render>(
    game: G,
    inputs: impl IntoIterator<Item = G::Input>,
    width: u32,
    height: u32,
    mut render: Render,
) -> Vec<String>
where
    G: GameLogic,
    Render: FnMut(&G::State, &mut [u8], u32, u32),
{
    let mut buf = vec![0u8; (width as usize) * (height as usize) * 4];
    let mut runner = HeadlessRunner::new(game);
    let mut hash_state = |state: &G::State, buf: &mut Vec<u8>| {
        buf.fill(0);
        render(state, buf, width, height);
        rgba_sha256_hex(buf)
    };

    let mut hashes = vec![hash_state(runner.state(), &mut buf)];
    for input in inputs {
        runner.step(input);
        hashes.push(hash_state(runner.state(), &mut buf));
    }
    hashes
}

/// Compares `actual` against the log stored at `path`, writing it instead when the file is
/// missing or `update` is set.
pub fn assert_or_update_hash_log(
    path: impl AsRef<Path>,
    actual: &FrameHashLog,
    update: bool,
) -> io::Result<()> {
    let path = path.as_ref();
    if update || !path.exists() {
        actual.save_json(path)?;
        info!("wrote hash log: {}", path.display());
        return Ok(());
    }

    let expected = FrameHashLog::load_json(path)?;
    if (expected.width, expected.height) != (actual.width, actual.height) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "hash log size mismatch at {}: expected {}x{}, got {}x{}",
                path.display(),
                expected.width,
                expected.height,
                actual.width,
                actual.height
            ),
        ));
    }
    if let Some(frame) = expected.first_mismatch(actual) {
        return Err(io::Error::other(format!(
            "hash log mismatch at {} (frame {frame}); enable golden updates to rewrite",
            path.display()
        )));
    }
    Ok(())
}
