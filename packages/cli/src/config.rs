use canvas_compiler_html::CompileOptions;
use canvas_editor::{EditorConfig, HistoryConfig};
use canvas_model::CanvasConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "canvas.config.json";

/// Canvas project configuration file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Undo log sizing
    pub history: HistoryConfig,

    /// Defaults for new canvases
    pub canvas: CanvasSettings,

    /// HTML output options
    pub output: OutputOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasSettings {
    pub width: f64,
    pub min_height: f64,
    pub grid_size: Option<f64>,
    pub snap_to_grid: bool,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        let canvas = CanvasConfig::default();
        Self {
            width: canvas.width,
            min_height: canvas.min_height,
            grid_size: canvas.grid_size,
            snap_to_grid: canvas.snap_to_grid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputOptions {
    pub pretty: bool,
    pub full_page: bool,
    pub out_dir: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            full_page: true,
            out_dir: "dist".to_string(),
        }
    }
}

impl Config {
    /// Load config from a directory, falling back to defaults
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Canvas settings for a new document
    pub fn canvas_config(&self) -> CanvasConfig {
        CanvasConfig {
            width: self.canvas.width,
            min_height: self.canvas.min_height,
            grid_size: self.canvas.grid_size,
            snap_to_grid: self.canvas.snap_to_grid,
            ..Default::default()
        }
    }

    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            history: self.history.clone(),
            canvas: self.canvas_config(),
        }
    }

    pub fn html_options(&self, title: &str) -> CompileOptions {
        CompileOptions {
            pretty: self.output.pretty,
            full_page: self.output.full_page,
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Get absolute path to output directory
    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.output.out_dir)
    }
}
