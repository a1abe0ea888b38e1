use std::fs;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// Review state of a single clip. A clip never returns to `Unreviewed`
/// once the user has acted on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Unreviewed,
    Kept,
    MarkedForDeletion,
}

/// One recorded clip: the camera-native file plus its transcoded
/// counterpart, paired by base filename.
#[derive(Debug, Clone)]
pub struct Clip {
    pub id: String,
    pub raw_path: PathBuf,
    pub converted_path: Option<PathBuf>,
    pub status: ReviewStatus,
}

impl Clip {
    pub fn new(id: String, raw_path: PathBuf, converted_path: Option<PathBuf>) -> Self {
        Clip {
            id,
            raw_path,
            converted_path,
            status: ReviewStatus::Unreviewed,
        }
    }

    /// The file to hand to the player: converted when present, raw otherwise.
    pub fn playback_path(&self) -> &PathBuf {
        self.converted_path.as_ref().unwrap_or(&self.raw_path)
    }
}

/// Result of executing a commit. `failures` holds per-file errors that did
/// not abort the batch.
#[derive(Debug, Default)]
pub struct CommitOutcome {
    pub clips_removed: usize,
    pub files_deleted: usize,
    pub files_missing: usize,
    pub failures: Vec<(PathBuf, String)>,
}

/// Ordered clip list plus cursor, owned by a single review loop.
/// The cursor is always a valid index while the list is non-empty.
#[derive(Debug)]
pub struct Session {
    clips: Vec<Clip>,
    cursor: usize,
}

impl Session {
    pub fn new(clips: Vec<Clip>) -> Self {
        Session { clips, cursor: 0 }
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn current(&self) -> Option<&Clip> {
        self.clips.get(self.cursor)
    }

    /// Move the cursor down; clamped at the last entry.
    pub fn move_next(&mut self) {
        if self.cursor + 1 < self.clips.len() {
            self.cursor += 1;
        }
    }

    /// Move the cursor up; clamped at the first entry.
    pub fn move_previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Mark the current clip for deletion. Re-marking is a no-op.
    pub fn mark_current_for_deletion(&mut self) {
        if let Some(clip) = self.clips.get_mut(self.cursor) {
            clip.status = ReviewStatus::MarkedForDeletion;
            debug!("Marked '{}' for deletion", clip.id);
        }
    }

    /// Keep the current clip. An unmarked clip goes to `Kept`, never back
    /// to `Unreviewed`.
    pub fn keep_current(&mut self) {
        if let Some(clip) = self.clips.get_mut(self.cursor) {
            clip.status = ReviewStatus::Kept;
            debug!("Keeping '{}'", clip.id);
        }
    }

    pub fn marked_count(&self) -> usize {
        self.clips
            .iter()
            .filter(|c| c.status == ReviewStatus::MarkedForDeletion)
            .count()
    }

    /// Delete the files of every clip marked for deletion and drop those
    /// clips from the session. Per-file failures are collected, never
    /// propagated; files of kept and unreviewed clips are not touched.
    pub fn commit_deletions(&mut self) -> CommitOutcome {
        let mut outcome = CommitOutcome::default();

        for clip in &self.clips {
            if clip.status != ReviewStatus::MarkedForDeletion {
                continue;
            }
            outcome.clips_removed += 1;

            let mut targets = vec![&clip.raw_path];
            if let Some(converted) = &clip.converted_path {
                targets.push(converted);
            }

            for path in targets {
                if !path.exists() {
                    warn!("'{}' no longer exists, skipping", path.display());
                    outcome.files_missing += 1;
                    continue;
                }
                match fs::remove_file(path) {
                    Ok(()) => {
                        debug!("Deleted '{}'", path.display());
                        outcome.files_deleted += 1;
                    }
                    Err(err) => {
                        error!("Failed to remove '{}': {}", path.display(), err);
                        outcome.failures.push((path.clone(), err.to_string()));
                    }
                }
            }
        }

        self.clips
            .retain(|c| c.status != ReviewStatus::MarkedForDeletion);
        if self.cursor >= self.clips.len() {
            self.cursor = self.clips.len().saturating_sub(1);
        }

        info!(
            "Commit: {} clips removed, {} files deleted, {} failures",
            outcome.clips_removed,
            outcome.files_deleted,
            outcome.failures.len()
        );
        outcome
    }
}
