//! Mapping model elements to filesystem paths.
//!
//! A namespace's dot-segments become directory segments and a declaration
//! becomes a file name, both normalized by the target language's
//! [`PathPolicy`]. Output paths are relative to the configured output root.
//!
//! ## Path-length ceiling
//!
//! Filesystems cap path lengths, so the segmenter enforces a configured
//! ceiling. An over-long path is recovered locally: the offending segment is
//! shortened to a prefix plus an 8-hex-character SHA-256 digest of the full
//! segment, which keeps reruns byte-identical. Only when even the digest
//! cannot fit does the segmenter fail with a path-overflow error.

use std::path::{Component, PathBuf};

use sha2::{Digest, Sha256};

use crate::errors::{GenError, Result};
use crate::model::{CodeModel, NodeId, NodeKind};

/// Hex characters of the SHA-256 digest appended to a shortened segment.
const SEGMENT_DIGEST_LEN: usize = 8;

/// Per-language file naming policy.
pub trait PathPolicy: Sync {
    /// Normalize one namespace segment into a directory name.
    fn normalize_segment(&self, segment: &str) -> String;

    /// Normalize a declaration name into a file stem.
    fn normalize_file_name(&self, name: &str) -> String;

    /// File suffix including the dot, e.g. `.ts`.
    fn file_suffix(&self) -> &str;

    /// Stem of the namespace barrel file, e.g. `index`.
    fn barrel_file_stem(&self) -> &str;
}

/// Computes collision-safe relative output paths.
pub struct PathSegmenter<'a> {
    policy: &'a dyn PathPolicy,
    max_path_length: usize,
}

impl<'a> PathSegmenter<'a> {
    pub fn new(policy: &'a dyn PathPolicy, max_path_length: usize) -> Self {
        Self {
            policy,
            max_path_length,
        }
    }

    /// Relative path for `element` declared in `namespace`.
    ///
    /// With `normalize` disabled the policy's per-segment normalizers are
    /// skipped (used when a refiner has already normalized names); the
    /// suffix and the length ceiling still apply.
    pub fn get_path(
        &self,
        model: &CodeModel,
        namespace: NodeId,
        element: NodeId,
        normalize: bool,
    ) -> Result<PathBuf> {
        if !matches!(model.kind(namespace), NodeKind::Namespace) {
            return Err(GenError::invalid_argument(format!(
                "expected a namespace, got a {}",
                model.kind(namespace).label()
            )));
        }
        let stem = match model.kind(element) {
            NodeKind::Namespace => self.policy.barrel_file_stem().to_string(),
            _ => last_segment(model.name(element)).to_string(),
        };
        self.assemble(model.name(namespace), &stem, normalize)
    }

    /// Relative path of the barrel file for `namespace`.
    pub fn get_barrel_path(&self, model: &CodeModel, namespace: NodeId) -> Result<PathBuf> {
        self.get_path(model, namespace, namespace, true)
    }

    fn assemble(&self, namespace_name: &str, stem: &str, normalize: bool) -> Result<PathBuf> {
        if stem.is_empty() {
            return Err(GenError::invalid_argument("element name is required"));
        }
        let mut segments: Vec<String> = namespace_name
            .split('.')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if normalize {
                    self.policy.normalize_segment(s)
                } else {
                    s.to_string()
                }
            })
            .collect();
        let file_stem = if normalize {
            self.policy.normalize_file_name(stem)
        } else {
            stem.to_string()
        };
        if file_stem.is_empty() || segments.iter().any(String::is_empty) {
            return Err(GenError::invalid_argument(format!(
                "normalization produced an empty path segment for `{}.{}`",
                namespace_name, stem
            )));
        }
        segments.push(format!("{}{}", file_stem, self.policy.file_suffix()));
        self.fit_under_ceiling(segments)
    }

    /// Shorten segments, longest first, until the joined path fits.
    fn fit_under_ceiling(&self, mut segments: Vec<String>) -> Result<PathBuf> {
        let suffix_len = self.policy.file_suffix().len();
        loop {
            let total: usize = segments.iter().map(String::len).sum::<usize>() + segments.len() - 1;
            if total <= self.max_path_length {
                return Ok(segments.iter().collect());
            }
            let excess = total - self.max_path_length;

            // Pick the longest segment still worth shortening. The file
            // segment keeps its suffix, so its shrinkable span excludes it.
            let candidate = segments
                .iter()
                .enumerate()
                .max_by_key(|(i, s)| (shrinkable_len(s, *i == segments.len() - 1, suffix_len), *i));
            let Some((index, segment)) = candidate else {
                break;
            };
            let is_file = index == segments.len() - 1;
            let shrinkable = shrinkable_len(segment, is_file, suffix_len);
            if shrinkable <= SEGMENT_DIGEST_LEN {
                // Nothing left to squeeze; overflow is fatal.
                break;
            }
            let budget = shrinkable.saturating_sub(excess).max(SEGMENT_DIGEST_LEN);
            let (stem, suffix) = if is_file {
                segment.split_at(segment.len() - suffix_len)
            } else {
                (segment.as_str(), "")
            };
            let shortened = format!("{}{}", shorten_segment(stem, budget), suffix);
            if shortened.len() >= segment.len() {
                // Each pass must strictly shrink its segment or the loop
                // cannot terminate.
                break;
            }
            tracing::debug!(
                original = %segment,
                shortened = %shortened,
                "path segment exceeded ceiling, applying digest shortening"
            );
            segments[index] = shortened;
        }
        let joined: PathBuf = segments.iter().collect();
        Err(GenError::PathOverflow {
            path: joined,
            max: self.max_path_length,
        })
    }
}

fn last_segment(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

fn shrinkable_len(segment: &str, is_file: bool, suffix_len: usize) -> usize {
    if is_file {
        segment.len().saturating_sub(suffix_len)
    } else {
        segment.len()
    }
}

/// Replace `segment` with a name of at most `budget` bytes: a prefix of the
/// original plus a digest of the whole segment. Deterministic per input.
fn shorten_segment(segment: &str, budget: usize) -> String {
    let digest = Sha256::digest(segment.as_bytes());
    let mut hex = String::with_capacity(SEGMENT_DIGEST_LEN);
    for byte in digest.iter().take(SEGMENT_DIGEST_LEN / 2) {
        // Two hex chars per byte.
        hex.push_str(&format!("{:02x}", byte));
    }
    // Budgets are in bytes (the ceiling is a byte count), so the prefix cut
    // must land on a char boundary at or below the byte budget.
    let keep = budget.saturating_sub(SEGMENT_DIGEST_LEN);
    let mut cut = 0;
    for (index, ch) in segment.char_indices() {
        let end = index + ch.len_utf8();
        if end > keep {
            break;
        }
        cut = end;
    }
    format!("{}{}", &segment[..cut], hex)
}

/// True when `inner` is located underneath `outer`.
pub fn is_subpath(outer: &std::path::Path, inner: &std::path::Path) -> bool {
    let outer: Vec<Component> = outer.components().collect();
    let inner: Vec<Component> = inner.components().collect();
    inner.len() >= outer.len() && inner[..outer.len()] == outer[..]
}
