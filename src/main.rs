use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use bresourcecc::{code, progress, Options};
use pbr::ProgressBar;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "bresourcecc")]
struct Args {
   /// The directory whose files will be embedded.
   input_dir: PathBuf,

   /// The output C++ source file.
   output_file: PathBuf,

   /// Fails the whole run when a file cannot be read, instead of skipping it.
   #[structopt(long)]
   strict: bool,
}

fn main() -> anyhow::Result<()> {
   let args = Args::from_args();

   progress::task("Scanning input directory");
   let files = bresourcecc::discover(&args.input_dir)?;
   println!("{} files found", files.len());

   let output = File::create(&args.output_file)
      .with_context(|| format!("cannot open {} for writing", args.output_file.display()))?;
   let namespace = code::namespace(&args.output_file);

   progress::task("Embedding files");
   let mut progress_bar = ProgressBar::new(files.len() as u64);
   let stats = bresourcecc::generate(
      &files,
      BufWriter::new(output),
      &namespace,
      &Options { strict: args.strict },
      || {
         progress_bar.inc();
      },
   )?;
   progress_bar.finish();

   if stats.skipped > 0 {
      println!("Embedded {} files, skipped {}", stats.embedded, stats.skipped);
   } else {
      println!("Embedded {} files", stats.embedded);
   }

   Ok(())
}
