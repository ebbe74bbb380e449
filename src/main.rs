mod convert;
mod parser;
mod submit;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;

use convert::Conversion;

#[derive(Parser)]
#[command(name = "doc2json", about = "Convert labeling-instruction docs into structured JSON")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one document to a pretty-printed JSON record
    Convert {
        /// Input document (reads stdin when omitted)
        input: Option<PathBuf>,
        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Fail instead of warning when the record is incomplete
        #[arg(long)]
        strict: bool,
    },
    /// Convert one document and POST it to the sheet-generator webhook
    Submit {
        /// Input document (reads stdin when omitted)
        input: Option<PathBuf>,
        /// Webhook URL (falls back to the WEBHOOK_URL environment variable)
        #[arg(long)]
        webhook: Option<String>,
    },
    /// Convert every .txt/.md document in a directory
    Batch {
        /// Directory of source documents
        dir: PathBuf,
        /// Write JSON records here instead of beside each input
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Max documents to convert
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { input, output, strict } => {
            let src = read_document(input.as_deref())?;
            let conversion = Conversion::from_document(&src);

            if let Err(reason) = conversion.validate() {
                if strict {
                    return Err(reason.context("document did not produce a valid record"));
                }
                warn!("Record is incomplete: {}", reason);
            }

            let json = serde_json::to_string_pretty(&conversion)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Wrote {}", path.display());
                }
                None => println!("{}", json),
            }
            Ok(())
        }
        Commands::Submit { input, webhook } => {
            let src = read_document(input.as_deref())?;
            let conversion = Conversion::from_document(&src);
            conversion.validate()?;

            let url = match webhook {
                Some(url) => url,
                None => std::env::var("WEBHOOK_URL").map_err(|_| {
                    anyhow!("Pass --webhook or set the WEBHOOK_URL environment variable")
                })?,
            };

            let payload = submit::build_payload(conversion, &src);
            let response = submit::submit(&url, &payload).await?;

            println!("Submitted. The sheet is being generated; this usually takes a couple of minutes.");
            if let Some(sheet_url) = response.sheet_url {
                println!("Sheet: {}", sheet_url);
            }
            Ok(())
        }
        Commands::Batch { dir, out_dir, limit } => batch_convert(&dir, out_dir.as_deref(), limit),
    }
}

struct BatchCounts {
    converted: usize,
    invalid: usize,
    errors: usize,
}

impl BatchCounts {
    fn print(&self) {
        println!(
            "Wrote {} records ({} complete, {} incomplete), {} read errors.",
            self.converted + self.invalid,
            self.converted,
            self.invalid,
            self.errors,
        );
    }
}

fn batch_convert(dir: &Path, out_dir: Option<&Path>, limit: Option<usize>) -> Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("txt") | Some("md")
            )
        })
        .collect();
    files.sort();
    if let Some(n) = limit {
        files.truncate(n);
    }

    if files.is_empty() {
        println!("No .txt or .md documents in {}", dir.display());
        return Ok(());
    }
    if let Some(d) = out_dir {
        std::fs::create_dir_all(d)
            .with_context(|| format!("Failed to create {}", d.display()))?;
    }

    let t0 = Instant::now();
    println!("Converting {} documents...", files.len());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec})")?
            .progress_chars("=> "),
    );

    // Each document is independent; conversions run in parallel and writes
    // happen afterwards on one thread
    let results: Vec<(PathBuf, std::io::Result<Conversion>)> = files
        .par_iter()
        .map(|path| {
            let result = std::fs::read_to_string(path)
                .map(|src| Conversion::from_document(&src.replace("\r\n", "\n")));
            pb.inc(1);
            (path.clone(), result)
        })
        .collect();
    pb.finish_and_clear();

    let mut counts = BatchCounts { converted: 0, invalid: 0, errors: 0 };
    for (path, result) in results {
        match result {
            Ok(conversion) => {
                let out_path = match out_dir {
                    Some(d) => d
                        .join(path.file_stem().unwrap_or_default())
                        .with_extension("json"),
                    None => path.with_extension("json"),
                };
                std::fs::write(&out_path, serde_json::to_string_pretty(&conversion)?)
                    .with_context(|| format!("Failed to write {}", out_path.display()))?;
                if conversion.is_valid() {
                    counts.converted += 1;
                } else {
                    warn!("Incomplete record for {}", path.display());
                    counts.invalid += 1;
                }
            }
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                counts.errors += 1;
            }
        }
    }

    counts.print();
    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("Done in {:.1}s", elapsed.as_secs_f64());
    }
    Ok(())
}

fn read_document(path: Option<&Path>) -> Result<String> {
    let raw = match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read {}", p.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    // The extractors expect \n separators
    Ok(raw.replace("\r\n", "\n"))
}
