use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use canvas_editor::{EditorSurface, Point};
use canvas_model::{BlockType, CanvasDocument};
use clap::Args;
use colored::Colorize;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory for canvas documents
    #[arg(short, long, default_value = "canvases")]
    pub canvas_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing canvas project...".bright_blue().bold());

    let canvas_dir = PathBuf::from(cwd).join(&args.canvas_dir);
    if !canvas_dir.exists() {
        fs::create_dir_all(&canvas_dir)?;
        println!("  {} Created {}/", "✓".green(), args.canvas_dir);
    }

    let config = Config::default();

    let example_file = canvas_dir.join("example.canvas.json");
    if !example_file.exists() {
        let document = example_document(&config)?;
        fs::write(&example_file, document.to_json_pretty()?)?;
        println!("  {} Created example.canvas.json", "✓".green());
    }

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: canvas validate {}", args.canvas_dir);
    println!("  2. Run: canvas render {}/example.canvas.json", args.canvas_dir);
    println!("  3. Check output in {}/", config.output.out_dir);

    Ok(())
}

/// Starter resource page laid out through the editor surface
fn example_document(config: &Config) -> Result<CanvasDocument> {
    let mut surface = EditorSurface::new("example").with_config(config.editor_config());

    surface.add_block(BlockType::Title, Some(Point::new(40.0, 40.0)))?;
    let intro = surface.add_block(BlockType::Text, Some(Point::new(40.0, 140.0)))?;
    surface.update_data(
        intro.as_str(),
        "text",
        json!({ "content": "Describe what families will do with this resource." }),
    )?;
    surface.add_block(BlockType::Image, Some(Point::new(480.0, 140.0)))?;
    surface.add_block(BlockType::MaterialList, Some(Point::new(40.0, 420.0)))?;
    surface.add_block(BlockType::PurchaseCta, Some(Point::new(480.0, 420.0)))?;

    Ok(surface.document())
}
