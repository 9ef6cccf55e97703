//! Engine configuration loading and normalization.
//!
//! Parses `hexide.toml` (or an override path supplied by the host) into the
//! rendering preferences the engine consumes: bytes per row, hex casing,
//! non-printable fallback char, overscan, and the virtual height ceiling.
//! Unknown fields are ignored (TOML deserialization tolerance) so config
//! files survive engine upgrades, and every value is clamped on
//! normalization; a hand-edited `bytes_per_row = 0` degrades to 1 rather
//! than erroring.
//!
//! Absent file or absent fields mean defaults; only unreadable/unparsable
//! content is an error, and even that is the host's to surface.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default bytes per grid row.
pub const DEFAULT_BYTES_PER_ROW: usize = 16;
/// Default overscan rows rendered beyond the viewport on each side.
pub const DEFAULT_OVERSCAN_ROWS: usize = 2;
/// Default substitute glyph for non-printable bytes.
pub const DEFAULT_NON_PRINTABLE_CHAR: char = '.';
/// Default virtual scroll height ceiling, matching the chunk manager.
pub const DEFAULT_MAX_VIRTUAL_HEIGHT_PX: f64 = 4_000_000.0;

/// Widest supported row; beyond this the grid stops being a grid.
const BYTES_PER_ROW_MAX: usize = 512;
/// Overscan cap: more than this re-renders most of a chunk per frame.
const OVERSCAN_MAX: usize = 64;
/// Floor for the virtual height ceiling (one viewport's worth of rows).
const MAX_VIRTUAL_HEIGHT_MIN: f64 = 1_000.0;

/// Raw deserialization target; every field optional.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    bytes_per_row: Option<usize>,
    uppercase: Option<bool>,
    non_printable_char: Option<char>,
    overscan: Option<usize>,
    max_virtual_height_px: Option<f64>,
}

/// Normalized engine preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bytes_per_row: usize,
    pub uppercase: bool,
    pub non_printable_char: char,
    pub overscan: usize,
    pub max_virtual_height_px: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bytes_per_row: DEFAULT_BYTES_PER_ROW,
            uppercase: false,
            non_printable_char: DEFAULT_NON_PRINTABLE_CHAR,
            overscan: DEFAULT_OVERSCAN_ROWS,
            max_virtual_height_px: DEFAULT_MAX_VIRTUAL_HEIGHT_PX,
        }
    }
}

impl Config {
    /// Load from `path` when given, else from the per-user default location.
    /// A missing file yields defaults; unreadable or malformed TOML is an
    /// error for the host to surface.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_path() {
                Some(p) => p,
                None => {
                    debug!(target: "config", "no config directory; using defaults");
                    return Ok(Self::default());
                }
            },
        };
        if !path.exists() {
            debug!(target: "config", path = %path.display(), "config absent; using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let raw: RawConfig = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        let config = Self::from_raw(raw);
        info!(
            target: "config",
            path = %path.display(),
            bytes_per_row = config.bytes_per_row,
            overscan = config.overscan,
            "config loaded"
        );
        Ok(config)
    }

    fn from_raw(raw: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            bytes_per_row: raw
                .bytes_per_row
                .unwrap_or(defaults.bytes_per_row)
                .clamp(1, BYTES_PER_ROW_MAX),
            uppercase: raw.uppercase.unwrap_or(defaults.uppercase),
            non_printable_char: raw
                .non_printable_char
                .unwrap_or(defaults.non_printable_char),
            overscan: raw.overscan.unwrap_or(defaults.overscan).min(OVERSCAN_MAX),
            max_virtual_height_px: normalize_height(
                raw.max_virtual_height_px
                    .unwrap_or(defaults.max_virtual_height_px),
            ),
        }
    }
}

fn normalize_height(value: f64) -> f64 {
    if !value.is_finite() {
        return DEFAULT_MAX_VIRTUAL_HEIGHT_PX;
    }
    value.max(MAX_VIRTUAL_HEIGHT_MIN)
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hexide").join("hexide.toml"))
}
