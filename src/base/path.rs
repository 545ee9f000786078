//! Normalized file paths used as index keys.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::Arc;

use smol_str::SmolStr;

/// A case-folded, slash-normalized path.
///
/// `NormalizedPath` is the key type for the symbol index and the project
/// root cache. Two spellings of the same file on a case-insensitive
/// filesystem (`C:\Proj\A.styl` and `c:/proj/a.styl`) produce the same key.
///
/// The lexically cleaned, case-preserving form is kept alongside the key so
/// the filesystem can still be probed and results can be reported with the
/// user's spelling. Equality, hashing and ordering only look at the key.
#[derive(Clone)]
pub struct NormalizedPath {
    key: SmolStr,
    display: Arc<str>,
}

impl NormalizedPath {
    /// Normalize a path.
    ///
    /// Backslashes become `/`, empty and `.` segments are dropped and `..`
    /// removes the preceding segment. No filesystem access is performed.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy().replace('\\', "/");
        let absolute = raw.starts_with('/');

        let mut segments: Vec<&str> = Vec::new();
        for segment in raw.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }

        let mut display = String::with_capacity(raw.len());
        if absolute {
            display.push('/');
        }
        display.push_str(&segments.join("/"));

        Self {
            key: SmolStr::new(display.to_lowercase()),
            display: Arc::from(display),
        }
    }

    /// The case-folded key.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// The cleaned path with its original casing, for filesystem access.
    #[inline]
    pub fn as_path(&self) -> &Path {
        Path::new(&*self.display)
    }

    /// Whether the path is rooted at `/` (drive-letter paths count too).
    pub fn is_absolute(&self) -> bool {
        self.key.starts_with('/') || self.segments().next().is_some_and(|s| s.ends_with(':'))
    }

    /// Iterate over the case-folded path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.key.split('/').filter(|s| !s.is_empty())
    }

    /// Number of segments in the path.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// The final segment, case-folded.
    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }

    /// The containing directory, or `None` for a root or single segment
    /// relative path.
    pub fn parent(&self) -> Option<NormalizedPath> {
        let cut = self.display.rfind('/')?;
        if cut == 0 {
            if self.display.len() == 1 {
                return None;
            }
            return Some(Self::new("/"));
        }
        Some(Self::new(&self.display[..cut]))
    }

    /// Iterate over this path and all of its ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = NormalizedPath> {
        std::iter::successors(Some(self.clone()), |p| p.parent())
    }

    /// Append a segment.
    pub fn join(&self, segment: &str) -> NormalizedPath {
        Self::new(format!("{}/{}", self.display, segment))
    }

    /// Segment-wise prefix test, so `/proj` is not a prefix of `/project`.
    pub fn starts_with(&self, prefix: &NormalizedPath) -> bool {
        let mut ours = self.segments();
        prefix.segments().all(|seg| ours.next() == Some(seg))
    }

    /// Length of the longest shared leading run of segments.
    pub fn common_prefix_len(&self, other: &NormalizedPath) -> usize {
        self.segments()
            .zip(other.segments())
            .take_while(|(a, b)| a == b)
            .count()
    }
}

impl PartialEq for NormalizedPath {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for NormalizedPath {}

impl Hash for NormalizedPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for NormalizedPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NormalizedPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Debug for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NormalizedPath({})", self.key)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<&str> for NormalizedPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}
