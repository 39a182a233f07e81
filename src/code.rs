//! Generation of the C++ resource table.
//!
//! The output format is a contract: downstream builds `#include` the generated file and rely on
//! the parallel `FILE_NAMES`/`FILE_DATA`/`FILE_SIZES` arrays staying index-aligned and sorted,
//! because the emitted `getFile` routine binary-searches over them.

use std::io::{self, Write};
use std::path::Path;

use crate::registry::FileEntry;

/// The generated lookup routine. Comparisons go through `unsigned char` so the search is
/// byte-wise ordinal on every platform, consistent with the sort order of `FILE_NAMES`.
const GET_FILE: &str = r#"const unsigned char* getFile(const char* filename, size_t* size_out) {
    size_t left = 0;
    size_t right = FILE_COUNT;
    while (left < right) {
        size_t mid = left + (right - left) / 2;
        size_t i = 0;
        while (filename[i] != '\0' && FILE_NAMES[mid][i] != '\0' && filename[i] == FILE_NAMES[mid][i]) {
            ++i;
        }
        if (filename[i] == '\0' && FILE_NAMES[mid][i] == '\0') {
            if (size_out) {
                *size_out = FILE_SIZES[mid];
            }
            return FILE_DATA[mid];
        }
        if (static_cast<unsigned char>(filename[i]) < static_cast<unsigned char>(FILE_NAMES[mid][i])) {
            right = mid;
        } else {
            left = mid + 1;
        }
    }
    if (size_out) {
        *size_out = 0;
    }
    return nullptr;
}

"#;

/// Writer for the generated C++ source file.
pub struct Generator<W: Write> {
   writer: W,
   namespace: String,
}

impl<W: Write> Generator<W> {
   pub fn new(writer: W, namespace: &str) -> Self {
      Self { writer, namespace: namespace.to_owned() }
   }

   /// Writes the includes and opens the namespace.
   pub fn prelude(&mut self) -> io::Result<()> {
      write!(self.writer, "#pragma once\n#include <cstddef>\n\n")?;
      write!(self.writer, "namespace {} {{\n\n", self.namespace)
   }

   /// Starts a byte array constant. Bytes are streamed through the returned [`ByteArray`].
   pub fn const_byte_array(mut self, name: &str) -> io::Result<ByteArray<W>> {
      write!(self.writer, "constexpr unsigned char {}[] = {{", name)?;
      Ok(ByteArray { generator: self, count: 0 })
   }

   /// Writes the size constant accompanying the byte array of the same name.
   pub fn size_constant(&mut self, name: &str, size: usize) -> io::Result<()> {
      write!(self.writer, "constexpr size_t {}_SIZE = {};\n\n", name, size)
   }

   /// Writes the three parallel lookup arrays, the entry count, and the `getFile` routine.
   ///
   /// `entries` must already be sorted by relative path; the binary search depends on it.
   pub fn lookup_table(&mut self, entries: &[FileEntry]) -> io::Result<()> {
      write!(self.writer, "constexpr const char* FILE_NAMES[] = {{\n")?;
      for entry in entries {
         write!(self.writer, "    \"{}\",\n", escape(&entry.relative_path))?;
      }
      write!(self.writer, "}};\n\n")?;

      write!(self.writer, "constexpr const unsigned char* FILE_DATA[] = {{\n")?;
      for entry in entries {
         write!(self.writer, "    {},\n", entry.identifier)?;
      }
      write!(self.writer, "}};\n\n")?;

      write!(self.writer, "constexpr const size_t FILE_SIZES[] = {{\n")?;
      for entry in entries {
         write!(self.writer, "    {}_SIZE,\n", entry.identifier)?;
      }
      write!(self.writer, "}};\n\n")?;

      write!(self.writer, "constexpr size_t FILE_COUNT = {};\n\n", entries.len())?;

      self.writer.write_all(GET_FILE.as_bytes())
   }

   /// Closes the namespace and hands the underlying writer back.
   pub fn epilogue(mut self) -> io::Result<W> {
      write!(self.writer, "}} // namespace {}\n", self.namespace)?;
      Ok(self.writer)
   }
}

/// An in-progress byte array constant.
pub struct ByteArray<W: Write> {
   generator: Generator<W>,
   count: usize,
}

impl<W: Write> ByteArray<W> {
   /// Appends one byte, rendered as a two-digit uppercase hex literal. A line break goes in
   /// before every 16th element; that is cosmetic and changes nothing about the parsed value.
   pub fn byte(&mut self, byte: u8) -> io::Result<()> {
      if self.count > 0 {
         write!(self.generator.writer, ", ")?;
      }
      if self.count % 16 == 0 {
         write!(self.generator.writer, "\n    ")?;
      }
      write!(self.generator.writer, "0x{:02X}", byte)?;
      self.count += 1;
      Ok(())
   }

   /// Terminates the array and gives the generator back.
   pub fn finish(mut self) -> io::Result<Generator<W>> {
      write!(self.generator.writer, "\n}};\n")?;
      Ok(self.generator)
   }
}

/// Derives the namespace name from the output file's base name, uppercased. Characters that
/// would not be legal in an identifier become underscores.
pub fn namespace(output_file: &Path) -> String {
   let stem = output_file.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
   let mut name = String::from("BRESOURCECC_");
   for c in stem.chars() {
      if c.is_ascii_alphanumeric() || c == '_' {
         name.push(c.to_ascii_uppercase());
      } else {
         name.push('_');
      }
   }
   name
}

/// Escapes quotes and backslashes for use in a C++ string literal.
fn escape(literal: &str) -> String {
   let mut escaped = String::with_capacity(literal.len());
   for c in literal.chars() {
      if c == '"' || c == '\\' {
         escaped.push('\\');
      }
      escaped.push(c);
   }
   escaped
}
