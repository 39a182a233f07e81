//! Compiling a directory tree into a C++ resource table.
//!
//! The pipeline is a single pass: [`discover`] walks the input tree and puts the files into
//! their canonical order, then [`generate`] embeds each file's bytes and emits the lookup
//! table the generated `getFile` routine binary-searches over.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::code::Generator;
use crate::registry::{FileEntry, Registry};

pub mod code;
pub mod progress;
pub mod registry;
pub mod walk;

/// A file discovered under the input root, waiting to be embedded.
pub struct SourceFile {
   pub path: PathBuf,
   pub relative_path: String,
}

/// Knobs for [`generate`].
pub struct Options {
   /// Fail the whole run when a file cannot be read, instead of skipping it.
   pub strict: bool,
}

/// What a run did, for the final summary.
pub struct Stats {
   pub embedded: usize,
   pub skipped: usize,
}

/// Walks `input_dir` and returns the files to embed, sorted by relative path.
///
/// The sort compares raw bytes, not locale collation order; the generated binary search does
/// the same, and the two have to agree. Filesystem enumeration order never matters.
pub fn discover(input_dir: &Path) -> anyhow::Result<Vec<SourceFile>> {
   if !input_dir.is_dir() {
      anyhow::bail!("{} is not a directory", input_dir.display());
   }
   let mut files = Vec::new();
   for path in walk::regular_files(input_dir) {
      let path = path.with_context(|| format!("cannot traverse {}", input_dir.display()))?;
      let relative_path = registry::relative_slash_path(input_dir, &path);
      files.push(SourceFile { path, relative_path });
   }
   files.sort_by(|a, b| a.relative_path.as_bytes().cmp(b.relative_path.as_bytes()));
   Ok(files)
}

/// Embeds `files` into `output` as a resource table under the given namespace.
///
/// Files are processed in the order given, which [`discover`] has already made canonical, so
/// running twice over an unchanged tree produces byte-identical output. Each file is read
/// fully, streamed out as a byte array, and dropped; only the registry metadata is kept for
/// the table at the end. An unreadable file is skipped with a warning unless
/// [`Options::strict`] is set. The `progress` callback is called once per file.
pub fn generate(
   files: &[SourceFile],
   output: impl Write,
   namespace: &str,
   options: &Options,
   mut progress: impl FnMut(),
) -> anyhow::Result<Stats> {
   let mut generator = Generator::new(output, namespace);
   generator.prelude()?;

   let mut registry = Registry::new();
   let mut skipped = 0;
   for file in files {
      progress();
      let bytes = match fs::read(&file.path) {
         Ok(bytes) => bytes,
         Err(error) => {
            if options.strict {
               return Err(error).with_context(|| format!("cannot read {}", file.path.display()));
            }
            progress::warning(&format!("cannot read {}: {}", file.path.display(), error));
            skipped += 1;
            continue;
         }
      };
      // Identifiers are only issued for files that actually made it in, so a skipped file
      // doesn't burn a name.
      let identifier = registry.issue_identifier(&file.relative_path);
      let mut array = generator.const_byte_array(&identifier)?;
      for &byte in &bytes {
         array.byte(byte)?;
      }
      generator = array.finish()?;
      generator.size_constant(&identifier, bytes.len())?;
      registry.add(FileEntry {
         relative_path: file.relative_path.clone(),
         identifier,
         size: bytes.len(),
      });
   }

   generator.lookup_table(registry.entries())?;
   let mut writer = generator.epilogue()?;
   writer.flush()?;

   Ok(Stats { embedded: registry.entries().len(), skipped })
}
