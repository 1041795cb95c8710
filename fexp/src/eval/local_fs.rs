use std::fs;
use std::io;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::{Component, Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{FexpError, FexpResult};
use crate::perms::PermissionSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Other,
}

impl EntryKind {
    /// Symlink is checked before directory, so a link to a directory is a symlink.
    #[must_use]
    pub fn from_file_type(ft: fs::FileType) -> Self {
        if ft.is_symlink() {
            Self::Symlink
        } else if ft.is_dir() {
            Self::Directory
        } else if ft.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }

    /// Column label in listings. Sockets, fifos and devices show as `file`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Directory => "dir",
            Self::Symlink => "symlink",
            Self::File | Self::Other => "file",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Zero for anything but regular files.
    pub size: u64,
    pub permissions: PermissionSet,
}

impl DirectoryEntry {
    /// Describe the entry itself; symlinks are not followed.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = fs::symlink_metadata(path)?;
        Ok(Self::from_metadata(path.to_path_buf(), &metadata))
    }

    fn from_metadata(path: PathBuf, metadata: &fs::Metadata) -> Self {
        let kind = EntryKind::from_file_type(metadata.file_type());
        let size = if kind == EntryKind::File {
            metadata.len()
        } else {
            0
        };
        Self {
            path,
            kind,
            size,
            permissions: PermissionSet::from_mode(metadata.permissions().mode()),
        }
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.to_string_lossy().into_owned(),
            |n| n.to_string_lossy().into_owned(),
        )
    }
}

/// Immediate children of `path` in native order. The iterator ends at the
/// first entry that cannot be read.
pub fn read_entries(path: &Path) -> io::Result<impl Iterator<Item = DirectoryEntry>> {
    let entries = fs::read_dir(path)?;
    Ok(entries.map_while(|entry| {
        let entry = entry.ok()?;
        // DirEntry::metadata does not traverse symlinks
        let metadata = entry.metadata().ok()?;
        Some(DirectoryEntry::from_metadata(entry.path(), &metadata))
    }))
}

/// Kind of whatever sits at `path`, without following a final symlink.
#[must_use]
pub fn entry_kind(path: &Path) -> Option<EntryKind> {
    fs::symlink_metadata(path)
        .ok()
        .map(|m| EntryKind::from_file_type(m.file_type()))
}

/// Absolute, symlink-resolved form of `path` even when its tail does not exist.
///
/// The longest existing prefix is canonicalized; the remaining components are
/// appended lexically (`.` dropped, `..` pops).
pub fn weakly_canonical(path: &Path) -> io::Result<PathBuf> {
    let components: Vec<Component<'_>> = path.components().collect();

    let mut split = components.len();
    while split > 0 {
        let prefix: PathBuf = components[..split].iter().collect();
        if prefix.exists() {
            break;
        }
        split -= 1;
    }

    let mut resolved = if split == 0 {
        PathBuf::new()
    } else {
        components[..split]
            .iter()
            .collect::<PathBuf>()
            .canonicalize()?
    };

    for component in &components[split..] {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }

    Ok(resolved)
}

/// Parent of `dir`; the root is its own parent.
#[must_use]
pub fn parent_dir(dir: &Path) -> PathBuf {
    dir.parent().unwrap_or(dir).to_path_buf()
}

pub fn open_regular(path: &Path) -> FexpResult<fs::File> {
    match fs::metadata(path) {
        Ok(m) if m.is_file() => {}
        _ => return Err(FexpError::NotRegularFile(path.to_path_buf())),
    }
    fs::File::open(path).map_err(|e| FexpError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Copy `from` over `to`, replacing any existing destination.
pub fn copy_file(from: &Path, to: &Path) -> FexpResult<u64> {
    if is_same_file(from, to) {
        return Err(FexpError::SameFile(to.to_path_buf()));
    }
    fs::copy(from, to).map_err(|e| FexpError::Copy { source: e })
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    // Device and inode, so hard links count as the same file too.
    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[derive(Debug)]
pub enum MoveOutcome {
    Renamed,
    /// Rename failed; the file was copied and the source deleted.
    Copied,
    /// Rename failed; the file was copied but the source could not be deleted.
    CopiedSourceKept(io::Error),
}

/// Rename, falling back to copy+delete when the source is a regular file.
pub fn move_path(from: &Path, to: &Path) -> FexpResult<MoveOutcome> {
    match fs::rename(from, to) {
        Ok(()) => Ok(MoveOutcome::Renamed),
        Err(e) => {
            debug!(from = %from.display(), to = %to.display(), error = %e, "rename failed, trying copy");
            copy_fallback(from, to, e, |path: &Path| fs::remove_file(path))
        }
    }
}

/// Second half of a move once the rename has failed. `remove` deletes the
/// source after a successful copy.
fn copy_fallback<R>(
    from: &Path,
    to: &Path,
    rename_err: io::Error,
    remove: R,
) -> FexpResult<MoveOutcome>
where
    R: FnOnce(&Path) -> io::Result<()>,
{
    let failed = |cause: FexpError| FexpError::MoveFailed(Box::new(cause));

    let metadata =
        fs::symlink_metadata(from).map_err(|e| failed(FexpError::Copy { source: e }))?;
    if metadata.is_dir() {
        return Err(failed(FexpError::DirectoryMove(from.to_path_buf())));
    }
    if !metadata.is_file() {
        return Err(failed(FexpError::Rename { source: rename_err }));
    }

    copy_file(from, to).map_err(failed)?;

    match remove(from) {
        Ok(()) => Ok(MoveOutcome::Copied),
        Err(e) => Ok(MoveOutcome::CopiedSourceKept(e)),
    }
}

pub fn remove_tree(path: &Path) -> FexpResult<()> {
    fs::remove_dir_all(path).map_err(|e| FexpError::Remove { source: e })
}

pub fn remove_file(path: &Path) -> FexpResult<()> {
    fs::remove_file(path).map_err(|e| FexpError::Remove { source: e })
}

/// Create `path` if absent. Existing content is never truncated.
pub fn touch(path: &Path) -> FexpResult<()> {
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(drop)
        .map_err(|e| FexpError::Touch {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Create `path` and missing parents. Returns `false` if it was already a directory.
pub fn make_dirs(path: &Path) -> FexpResult<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path).map_err(|e| FexpError::Create { source: e })?;
    Ok(true)
}

/// Replace the nine permission bits of `path`.
pub fn set_permissions(path: &Path, perms: PermissionSet) -> FexpResult<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(perms.mode()))
        .map_err(|e| FexpError::Chmod { source: e })
}

/// Walk below `start` and call `on_match` for every entry whose file name
/// contains `pattern`. Returns the number of matches.
///
/// Errors below the start are skipped; an error on the start itself stops
/// the walk.
pub fn search<F>(start: &Path, pattern: &str, mut on_match: F) -> FexpResult<usize>
where
    F: FnMut(&Path) -> FexpResult<()>,
{
    // walkdir yields nothing for a non-directory start; opening it surfaces the error.
    fs::read_dir(start).map_err(|e| FexpError::SearchStopped { source: e })?;

    let mut matches = 0;
    for entry in WalkDir::new(start).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(FexpError::SearchStopped { source: err.into() });
            }
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if entry.file_name().to_string_lossy().contains(pattern) {
            on_match(entry.path())?;
            matches += 1;
        }
    }
    Ok(matches)
}
