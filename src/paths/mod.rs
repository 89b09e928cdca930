//! Relative-path computation across a source/binary tree topology.
//!
//! Generated build files refer to files in two trees: the hand-authored
//! source tree and the generated binary tree. A path may be emitted relative
//! to the directory of the file being written only when both ends live in
//! the same tree; a relative path that silently crossed from one tree into
//! the other would break the moment either tree is relocated. The
//! [`PathRelativizer`] encodes that rule.
//!
//! All paths handled here are absolute, in forward-slash form, with no
//! trailing slash. Passing anything else is a caller bug, not a detected
//! error.

use std::path::Path;

use tracing::debug;

pub mod topology;

pub use topology::{BuildTreeSnapshot, DirectoryChain};

/// How the source-tree top and binary-tree top nest relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopRelation {
    /// Source and binary top are the same directory.
    InSource,
    /// The binary top lives inside the source top.
    BinInSrc,
    /// The source top lives inside the binary top.
    SrcInBin,
    /// Neither tree contains the other.
    Separate,
}

/// Whether `path` is strictly inside the directory `dir`.
///
/// Purely lexical; the comparison respects component boundaries, so
/// `/foo/barbaz` is not inside `/foo/bar`.
pub fn is_subdirectory(path: &str, dir: &str) -> bool {
    if dir == "/" {
        return path.len() > 1 && path.starts_with('/');
    }
    path.len() > dir.len() && path.as_bytes()[dir.len()] == b'/' && path.starts_with(dir)
}

pub(crate) fn eq_or_subdir(path: &str, dir: &str) -> bool {
    path == dir || is_subdirectory(path, dir)
}

/// Whether `path` is absolute: rooted, drive-lettered, or UNC.
pub fn is_full_path(path: &str) -> bool {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        return true;
    }
    matches!(bytes.first(), Some(b'/') | Some(b'\\'))
}

/// Compute the shortest relative path from the directory `local` to
/// `remote`, unconditionally.
///
/// A `remote` that is already relative is returned as-is. Identical paths
/// yield the empty string; callers emit it as `.` or whatever empty token
/// the destination syntax wants. When the two paths share nothing (for
/// example different drives) `remote` is returned absolute.
pub fn force_relative(local: &str, remote: &str) -> String {
    if !is_full_path(remote) {
        return remote.to_string();
    }
    match pathdiff::diff_paths(remote, local) {
        Some(diff) => join_components(&diff),
        None => remote.to_string(),
    }
}

/// Re-join path components with forward slashes regardless of platform.
fn join_components(path: &Path) -> String {
    let mut out = String::new();
    for comp in path.components() {
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(&comp.as_os_str().to_string_lossy());
    }
    out
}

/// Decides when a path may be emitted relative to another, given the
/// topology of the generation scope.
///
/// The topology is established once per scope. `relation` is derived state:
/// it is recomputed whenever the tops change and never set on its own.
#[derive(Debug, Clone)]
pub struct PathRelativizer {
    top_source: String,
    top_binary: String,
    relation: TopRelation,
    current_source: String,
    current_binary: String,
}

impl PathRelativizer {
    /// Create a relativizer for the given tree tops. The current directories
    /// default to the tops themselves.
    pub fn new(top_source: impl Into<String>, top_binary: impl Into<String>) -> Self {
        let top_source = top_source.into();
        let top_binary = top_binary.into();
        let relation = compute_relation(&top_source, &top_binary);
        PathRelativizer {
            current_source: top_source.clone(),
            current_binary: top_binary.clone(),
            top_source,
            top_binary,
            relation,
        }
    }

    /// Create a relativizer from a directory-tree snapshot, walking upward
    /// to find the highest enclosing source and binary directories.
    pub fn from_snapshot<S: BuildTreeSnapshot>(snapshot: &S) -> Self {
        let top_source = topology::top_source(snapshot);
        let top_binary = topology::top_binary(snapshot);
        let relation = compute_relation(&top_source, &top_binary);
        debug!(%top_source, %top_binary, ?relation, "computed relativization topology");
        PathRelativizer {
            current_source: snapshot.current_source().to_string(),
            current_binary: snapshot.current_binary().to_string(),
            top_source,
            top_binary,
            relation,
        }
    }

    /// The highest source directory of the generation scope.
    pub fn top_source(&self) -> &str {
        &self.top_source
    }

    /// The highest binary directory of the generation scope.
    pub fn top_binary(&self) -> &str {
        &self.top_binary
    }

    /// The current topological relation of the two tops.
    pub fn relation(&self) -> TopRelation {
        self.relation
    }

    /// Replace both tops and re-derive the relation.
    pub fn set_tops(&mut self, top_source: impl Into<String>, top_binary: impl Into<String>) {
        self.top_source = top_source.into();
        self.top_binary = top_binary.into();
        self.relation = compute_relation(&self.top_source, &self.top_binary);
    }

    /// Emit `remote` relative to the directory `local` when both live in the
    /// binary tree or both live in the source tree; otherwise return
    /// `remote` unchanged.
    pub fn maybe_relative_to(&self, local: &str, remote: &str) -> String {
        let mut local_in_binary = eq_or_subdir(local, &self.top_binary);
        let mut remote_in_binary = eq_or_subdir(remote, &self.top_binary);
        let mut local_in_source = eq_or_subdir(local, &self.top_source);
        let mut remote_in_source = eq_or_subdir(remote, &self.top_source);

        // When one top nests inside the other, membership in the inner tree
        // must not also count as membership in the outer tree.
        match self.relation {
            TopRelation::Separate => {
                // Checks are independent.
            }
            TopRelation::BinInSrc => {
                local_in_source = local_in_source && !local_in_binary;
                remote_in_source = remote_in_source && !remote_in_binary;
            }
            TopRelation::SrcInBin => {
                local_in_binary = local_in_binary && !local_in_source;
                remote_in_binary = remote_in_binary && !remote_in_source;
            }
            TopRelation::InSource => {
                // Checks are identical.
            }
        }

        let both_in_binary = local_in_binary && remote_in_binary;
        let both_in_source = local_in_source && remote_in_source;

        if both_in_binary || both_in_source {
            force_relative(local, remote)
        } else {
            remote.to_string()
        }
    }

    /// Emit `path` relative to the current binary directory when permitted.
    pub fn maybe_relative_to_current_binary(&self, path: &str) -> String {
        self.maybe_relative_to(&self.current_binary, path)
    }

    /// Emit `path` relative to the top binary directory when permitted.
    pub fn maybe_relative_to_top_binary(&self, path: &str) -> String {
        self.maybe_relative_to(&self.top_binary, path)
    }
}

fn compute_relation(top_source: &str, top_binary: &str) -> TopRelation {
    if top_source == top_binary {
        TopRelation::InSource
    } else if is_subdirectory(top_binary, top_source) {
        TopRelation::BinInSrc
    } else if is_subdirectory(top_source, top_binary) {
        TopRelation::SrcInBin
    } else {
        TopRelation::Separate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_subdirectory_respects_component_boundaries() {
        assert!(is_subdirectory("/a/b", "/a"));
        assert!(is_subdirectory("/a/b/c", "/a/b"));
        assert!(!is_subdirectory("/ab", "/a"));
        assert!(!is_subdirectory("/a", "/a"));
        assert!(!is_subdirectory("/a", "/a/b"));
        assert!(is_subdirectory("/x", "/"));
        assert!(!is_subdirectory("/", "/"));
    }

    #[test]
    fn test_is_full_path() {
        assert!(is_full_path("/usr/lib"));
        assert!(is_full_path("c:/work"));
        assert!(is_full_path("\\\\server\\share"));
        assert!(!is_full_path("relative/x"));
        assert!(!is_full_path(""));
    }

    #[test]
    fn test_force_relative() {
        assert_eq!(force_relative("/a/b/c", "/a/d"), "../../d");
        assert_eq!(force_relative("/proj/src/a", "/proj/src/a/b.h"), "b.h");
        assert_eq!(force_relative("/a", "/a"), "");
        // Already-relative paths pass through untouched.
        assert_eq!(force_relative("/a/b", "sub/x.c"), "sub/x.c");
    }

    #[test]
    fn test_relation_computation() {
        assert_eq!(
            PathRelativizer::new("/proj", "/proj").relation(),
            TopRelation::InSource
        );
        assert_eq!(
            PathRelativizer::new("/proj", "/proj/build").relation(),
            TopRelation::BinInSrc
        );
        assert_eq!(
            PathRelativizer::new("/proj/src", "/proj").relation(),
            TopRelation::SrcInBin
        );
        assert_eq!(
            PathRelativizer::new("/proj/src", "/proj/build").relation(),
            TopRelation::Separate
        );
    }

    #[test]
    fn test_relation_rederived_after_set_tops() {
        let mut relativizer = PathRelativizer::new("/proj", "/proj");
        assert_eq!(relativizer.relation(), TopRelation::InSource);
        relativizer.set_tops("/proj/src", "/proj/build");
        assert_eq!(relativizer.relation(), TopRelation::Separate);
    }

    #[test]
    fn test_in_source_relativizes_inside_the_top() {
        let relativizer = PathRelativizer::new("/proj", "/proj");
        assert_eq!(
            relativizer.maybe_relative_to("/proj/sub/a", "/proj/sub/b/c.h"),
            "../b/c.h"
        );
        // Paths outside the top stay absolute.
        assert_eq!(
            relativizer.maybe_relative_to("/proj/sub", "/other/x"),
            "/other/x"
        );
    }

    #[test]
    fn test_separate_trees_never_cross() {
        let relativizer = PathRelativizer::new("/proj/src", "/proj/build");
        assert_eq!(
            relativizer.maybe_relative_to("/proj/src/a", "/proj/src/a/b.h"),
            "b.h"
        );
        assert_eq!(
            relativizer.maybe_relative_to("/proj/src/a", "/proj/build/x"),
            "/proj/build/x"
        );
        assert_eq!(
            relativizer.maybe_relative_to("/proj/build/a", "/proj/src/x.c"),
            "/proj/src/x.c"
        );
        assert_eq!(
            relativizer.maybe_relative_to("/proj/build/a", "/proj/build/b/y.o"),
            "../b/y.o"
        );
    }

    #[test]
    fn test_bin_in_src_excludes_binary_from_source() {
        let relativizer = PathRelativizer::new("/proj", "/proj/build");
        // One end inside the nested binary tree, the other in the
        // surrounding source tree: no relativization.
        assert_eq!(
            relativizer.maybe_relative_to("/proj/build/sub", "/proj/src/f.c"),
            "/proj/src/f.c"
        );
        assert_eq!(
            relativizer.maybe_relative_to("/proj/src", "/proj/build/out.o"),
            "/proj/build/out.o"
        );
        // Both in the source tree proper.
        assert_eq!(relativizer.maybe_relative_to("/proj/a", "/proj/b"), "../b");
        // Both in the binary tree.
        assert_eq!(
            relativizer.maybe_relative_to("/proj/build/a", "/proj/build/b"),
            "../b"
        );
    }

    #[test]
    fn test_src_in_bin_excludes_source_from_binary() {
        let relativizer = PathRelativizer::new("/proj/src", "/proj");
        assert_eq!(
            relativizer.maybe_relative_to("/proj/src/a", "/proj/x"),
            "/proj/x"
        );
        assert_eq!(
            relativizer.maybe_relative_to("/proj/out/a", "/proj/out/b"),
            "../b"
        );
        assert_eq!(
            relativizer.maybe_relative_to("/proj/src/a", "/proj/src/b"),
            "../b"
        );
    }

    #[test]
    fn test_identical_paths_yield_empty_token() {
        let relativizer = PathRelativizer::new("/proj", "/proj");
        assert_eq!(relativizer.maybe_relative_to("/proj/src/a", "/proj/src/a"), "");
    }

    #[test]
    fn test_relativizing_relative_output_is_a_no_op() {
        let relativizer = PathRelativizer::new("/proj", "/proj");
        let first = relativizer.maybe_relative_to("/proj/a", "/proj/b/c.h");
        assert_eq!(first, "../b/c.h");
        assert_eq!(relativizer.maybe_relative_to("/proj/a", &first), first);
    }
}
