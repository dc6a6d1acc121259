use crate::commands::validate::DOCUMENT_EXTENSION;
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use canvas_compiler_html::{compile_to_html, CompileOptions};
use canvas_evaluator::{CdnAssets, ContextData, Evaluator};
use canvas_model::CanvasDocument;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Canvas document to render
    pub input: PathBuf,

    /// Record data for the published page (JSON); the editor placeholder
    /// is used when omitted
    #[arg(short, long)]
    pub context: Option<PathBuf>,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Output file (overrides the output directory)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Emit an embeddable fragment instead of a full page
    #[arg(long)]
    pub fragment: bool,

    /// Base URL for relative media paths
    #[arg(long)]
    pub cdn: Option<String>,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = PathBuf::from(cwd).join(&args.input);

    let json = fs::read_to_string(&input)
        .with_context(|| format!("Cannot read {}", input.display()))?;
    let document = CanvasDocument::from_json(&json)
        .with_context(|| format!("Invalid canvas document {}", input.display()))?;

    let context = match &args.context {
        Some(path) => {
            let path = PathBuf::from(cwd).join(path);
            let json = fs::read_to_string(&path)
                .with_context(|| format!("Cannot read {}", path.display()))?;
            ContextData::from_json(&json)
                .with_context(|| format!("Invalid context {}", path.display()))?
        }
        None => ContextData::placeholder(),
    };

    let evaluator = match &args.cdn {
        Some(base) => Evaluator::with_asset_resolver(CdnAssets::new(base.clone())),
        None => Evaluator::new(),
    };

    let vdom = evaluator.render_canvas(&document, &context);

    let title = if context.resource.title.is_empty() {
        document_name(&input)
    } else {
        context.resource.title.clone()
    };
    let options = if args.fragment {
        CompileOptions {
            title,
            ..CompileOptions::fragment()
        }
    } else {
        config.html_options(&title)
    };
    let html = compile_to_html(&vdom, options).map_err(|e| anyhow!(e))?;

    if args.stdout {
        println!("{}", html);
        return Ok(());
    }

    let output_file = match &args.out {
        Some(out) => PathBuf::from(cwd).join(out),
        None => {
            let out_dir = match &args.out_dir {
                Some(out) => PathBuf::from(cwd).join(out),
                None => config.get_out_dir(cwd),
            };
            out_dir.join(format!("{}.html", document_name(&input)))
        }
    };
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, html)?;

    info!(output = %output_file.display(), blocks = document.blocks.len(), "Rendered canvas");
    println!(
        "  {} {} → {}",
        "✓".green(),
        args.input.display(),
        output_file.display()
    );
    Ok(())
}

/// `pages/home.canvas.json` → `home`
fn document_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("canvas");
    file_name
        .strip_suffix(DOCUMENT_EXTENSION)
        .or_else(|| file_name.strip_suffix(".json"))
        .unwrap_or(file_name)
        .to_string()
}
