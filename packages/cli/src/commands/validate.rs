use anyhow::{anyhow, Result};
use canvas_model::CanvasDocument;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub const DOCUMENT_EXTENSION: &str = ".canvas.json";

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Canvas document or directory of `*.canvas.json` files
    #[arg(default_value = ".")]
    pub input: PathBuf,

    /// Treat legacy and unrecognized blocks as errors
    #[arg(long)]
    pub strict: bool,
}

/// Findings for one document
#[derive(Debug, Default, PartialEq)]
pub struct Report {
    pub blocks: usize,
    pub legacy: Vec<String>,
    pub unrecognized: Vec<(String, String)>,
}

impl Report {
    pub fn warnings(&self) -> usize {
        self.legacy.len() + self.unrecognized.len()
    }
}

pub fn validate(args: ValidateArgs, cwd: &str) -> Result<()> {
    let input = PathBuf::from(cwd).join(&args.input);

    println!("🔍 {} canvas documents", "Validating".green().bold());
    println!("   Input: {}", input.display());
    println!();

    let files = if input.is_file() {
        vec![input.clone()]
    } else if input.is_dir() {
        find_documents(&input)
    } else {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    };

    if files.is_empty() {
        println!("{}", "⚠️  No canvas documents found".yellow());
        return Ok(());
    }

    let mut errors = 0;
    let mut warnings = 0;

    for file in &files {
        let relative = file.strip_prefix(&input).ok().filter(|p| !p.as_os_str().is_empty());
        let name = relative.unwrap_or(file).display();

        match check_file(file) {
            Ok(report) => {
                warnings += report.warnings();
                println!("  {} {} ({} blocks)", "✓".green(), name, report.blocks);
                for id in &report.legacy {
                    println!(
                        "      {} block {} is an obsolete paywall block; use the canvas paywall instead",
                        "warning:".yellow(),
                        id
                    );
                }
                for (id, block_type) in &report.unrecognized {
                    println!(
                        "      {} block {} has unsupported type {:?}",
                        "warning:".yellow(),
                        id,
                        block_type
                    );
                }
            }
            Err(e) => {
                errors += 1;
                eprintln!("  {} {} - {}", "✗".red(), name, e.to_string().red());
            }
        }
    }

    println!();
    println!("   Documents checked: {}", files.len());
    if warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), warnings);
    }

    if errors > 0 {
        return Err(anyhow!("{} invalid document(s)", errors));
    }
    if args.strict && warnings > 0 {
        return Err(anyhow!("{} warning(s) in strict mode", warnings));
    }

    println!("{} All documents are valid", "✅".green());
    Ok(())
}

/// Parse and validate one document
pub fn check_file(path: &Path) -> Result<Report> {
    let json = fs::read_to_string(path)?;
    let document = CanvasDocument::from_json(&json)?;
    debug!(path = %path.display(), blocks = document.blocks.len(), "Validated document");

    Ok(Report {
        blocks: document.blocks.len(),
        legacy: document
            .legacy_paywall_blocks()
            .iter()
            .map(|b| b.id.to_string())
            .collect(),
        unrecognized: document
            .unrecognized_blocks()
            .iter()
            .map(|b| (b.id.to_string(), b.data.type_name().to_string()))
            .collect(),
    })
}

pub fn find_documents(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .map(|n| n.ends_with(DOCUMENT_EXTENSION))
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}
