//! The registry of embedded files and the identifiers that name them.

use std::collections::HashSet;
use std::path::Path;

/// One embedded file, as recorded in the lookup table.
#[derive(Debug)]
pub struct FileEntry {
   /// The file's path relative to the traversal root, with forward slashes.
   pub relative_path: String,
   /// The C++ identifier naming the file's byte array.
   pub identifier: String,
   /// The file's length in bytes.
   pub size: usize,
}

/// Collects the entries that make it into the generated table.
///
/// The registry owns the set of identifiers issued during one run, so two files whose paths
/// sanitize to the same name still come out distinct.
#[derive(Default)]
pub struct Registry {
   entries: Vec<FileEntry>,
   issued: HashSet<String>,
}

impl Registry {
   pub fn new() -> Self {
      Self::default()
   }

   /// Issues a unique identifier for the given relative path.
   pub fn issue_identifier(&mut self, relative_path: &str) -> String {
      sanitize(relative_path, &mut self.issued)
   }

   pub fn add(&mut self, entry: FileEntry) {
      self.entries.push(entry);
   }

   pub fn entries(&self) -> &[FileEntry] {
      &self.entries
   }
}

/// Maps an arbitrary path string to a valid C++ identifier, unique within `issued`.
///
/// Letters, digits, and underscores pass through; everything else becomes an underscore. A name
/// that would start with a digit gets one prefixed. Collisions are resolved by prepending
/// underscores until the name is free; each probe is strictly longer, so this always terminates.
pub fn sanitize(raw: &str, issued: &mut HashSet<String>) -> String {
   let sanitized: String = raw
      .chars()
      .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
      .collect();
   let mut unique = if sanitized.starts_with(|c: char| c.is_ascii_digit()) {
      format!("_{}", sanitized)
   } else {
      sanitized
   };
   while issued.contains(&unique) {
      unique = format!("_{}", unique);
   }
   issued.insert(unique.clone());
   unique
}

/// Computes `path` relative to `root`, joined with forward slashes regardless of platform.
///
/// Components that are not valid UTF-8 are replaced lossily.
pub fn relative_slash_path(root: &Path, path: &Path) -> String {
   let relative = path.strip_prefix(root).unwrap_or(path);
   let components: Vec<_> =
      relative.components().map(|c| c.as_os_str().to_string_lossy()).collect();
   components.join("/")
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn sanitize_maps_non_identifier_characters_to_underscores() {
      let mut issued = HashSet::new();
      assert_eq!(sanitize("dir/a.txt", &mut issued), "dir_a_txt");
      assert_eq!(sanitize("with space & dots..", &mut issued), "with_space___dots__");
   }

   #[test]
   fn sanitize_prefixes_leading_digits() {
      let mut issued = HashSet::new();
      assert_eq!(sanitize("8bit.pal", &mut issued), "_8bit_pal");
   }

   #[test]
   fn sanitize_resolves_collisions_by_prepending_underscores() {
      let mut issued = HashSet::new();
      assert_eq!(sanitize("x", &mut issued), "x");
      assert_eq!(sanitize("x", &mut issued), "_x");
      assert_eq!(sanitize("x", &mut issued), "__x");
      // "a.b" and "a/b" sanitize to the same name and must still come out distinct.
      assert_eq!(sanitize("a.b", &mut issued), "a_b");
      assert_eq!(sanitize("a/b", &mut issued), "_a_b");
   }

   #[test]
   fn registry_issues_distinct_identifiers_for_colliding_base_names() {
      let mut registry = Registry::new();
      let first = registry.issue_identifier("a/x.txt");
      let second = registry.issue_identifier("b/x.txt");
      assert_ne!(first, second);
   }

   #[test]
   fn relative_paths_use_forward_slashes() {
      let root = Path::new("/assets");
      let path = Path::new("/assets/textures/grass.png");
      assert_eq!(relative_slash_path(root, path), "textures/grass.png");
   }
}
