//! Recursive discovery of regular files under a root directory.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Returns a lazy iterator over the regular files under `root`.
///
/// Directories and special files are never yielded. Symlinks are not followed into directories,
/// but a symlink whose target is a regular file counts as one. The order files come out in is
/// whatever the filesystem enumerates; callers impose their own ordering.
pub fn regular_files(root: &Path) -> impl Iterator<Item = anyhow::Result<PathBuf>> {
   WalkDir::new(root).into_iter().filter_map(|entry| match entry {
      Ok(entry) => entry.path().is_file().then(|| Ok(entry.into_path())),
      Err(error) => Some(Err(error.into())),
   })
}

#[cfg(test)]
mod tests {
   use std::fs;

   use super::*;

   #[test]
   fn finds_nested_files_and_skips_directories() -> anyhow::Result<()> {
      let root = tempfile::tempdir()?;
      fs::write(root.path().join("a.txt"), b"a")?;
      fs::create_dir_all(root.path().join("dir/nested"))?;
      fs::write(root.path().join("dir/nested/b.bin"), b"b")?;

      let mut files: Vec<_> = regular_files(root.path()).collect::<anyhow::Result<_>>()?;
      files.sort();
      assert_eq!(files, vec![root.path().join("a.txt"), root.path().join("dir/nested/b.bin")]);
      Ok(())
   }

   #[test]
   fn missing_root_is_an_error() {
      let mut walk = regular_files(Path::new("/definitely/not/here"));
      assert!(matches!(walk.next(), Some(Err(_))));
   }

   #[test]
   fn empty_root_yields_nothing() -> anyhow::Result<()> {
      let root = tempfile::tempdir()?;
      assert_eq!(regular_files(root.path()).count(), 0);
      Ok(())
   }
}
