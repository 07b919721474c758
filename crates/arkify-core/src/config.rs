use crate::error::Result;
use crate::paths;
use crate::types::{PanelId, PlanFormat};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// OutputConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_image_suffix")]
    pub image_suffix: String,
    #[serde(default)]
    pub format: PlanFormat,
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_currency() -> String {
    crate::kpi::DEFAULT_CURRENCY.to_string()
}

fn default_image_suffix() -> String {
    "-phase1".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            currency: default_currency(),
            image_suffix: default_image_suffix(),
            format: PlanFormat::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// LayoutConfig
// ---------------------------------------------------------------------------

/// Grid geometry. The first row is the header; data panels fill the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,
    #[serde(default = "default_grid_dim")]
    pub columns: u32,
    #[serde(default = "default_grid_dim")]
    pub rows: u32,
    #[serde(default = "default_max_tech_stack")]
    pub max_tech_stack: usize,
}

fn default_canvas_width() -> u32 {
    900
}

fn default_canvas_height() -> u32 {
    1200
}

fn default_grid_dim() -> u32 {
    3
}

fn default_max_tech_stack() -> usize {
    4
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            columns: default_grid_dim(),
            rows: default_grid_dim(),
            max_tech_stack: default_max_tech_stack(),
        }
    }
}

impl LayoutConfig {
    pub fn panel_width(&self) -> u32 {
        self.canvas_width.checked_div(self.columns).unwrap_or(0)
    }

    pub fn panel_height(&self) -> u32 {
        self.canvas_height.checked_div(self.rows).unwrap_or(0)
    }

    /// Cells available below the header row.
    pub fn data_cells(&self) -> usize {
        (self.columns as usize) * (self.rows.saturating_sub(1) as usize)
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default = "default_future_dust")]
    pub future_dust: String,
    #[serde(default = "default_electric_green")]
    pub electric_green: String,
    #[serde(default = "default_cosmic_white")]
    pub cosmic_white: String,
    #[serde(default = "default_deep_space")]
    pub deep_space: String,
    #[serde(default = "default_expected_grey")]
    pub expected_grey: String,
    #[serde(default = "default_cosmic_white")]
    pub text: String,
    #[serde(default = "default_text_dim")]
    pub text_dim: String,
}

fn default_future_dust() -> String {
    "#4A4E69".to_string()
}

fn default_electric_green() -> String {
    "#06FFA5".to_string()
}

fn default_cosmic_white() -> String {
    "#F2F4F8".to_string()
}

fn default_deep_space() -> String {
    "#22223B".to_string()
}

fn default_expected_grey() -> String {
    "#6B7280".to_string()
}

fn default_text_dim() -> String {
    "#9A8C98".to_string()
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            future_dust: default_future_dust(),
            electric_green: default_electric_green(),
            cosmic_white: default_cosmic_white(),
            deep_space: default_deep_space(),
            expected_grey: default_expected_grey(),
            text: default_cosmic_white(),
            text_dim: default_text_dim(),
        }
    }
}

impl Palette {
    pub fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("future_dust", self.future_dust.as_str()),
            ("electric_green", self.electric_green.as_str()),
            ("cosmic_white", self.cosmic_white.as_str()),
            ("deep_space", self.deep_space.as_str()),
            ("expected_grey", self.expected_grey.as_str()),
            ("text", self.text.as_str()),
            ("text_dim", self.text_dim.as_str()),
        ]
    }
}

static HEX_COLOR_RE: OnceLock<Regex> = OnceLock::new();

fn hex_color_re() -> &'static Regex {
    HEX_COLOR_RE.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap())
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub palette: Palette,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            output: OutputConfig::default(),
            layout: LayoutConfig::default(),
            palette: Palette::default(),
        }
    }
}

impl Config {
    /// Load `.arkify/config.yaml`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        for (name, value) in self.palette.entries() {
            if !hex_color_re().is_match(value) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("palette.{name} '{value}' is not a #RRGGBB colour"),
                });
            }
        }

        let layout = &self.layout;
        if layout.columns == 0 || layout.rows < 2 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "layout grid {}x{} leaves no room below the header",
                    layout.columns, layout.rows
                ),
            });
        } else {
            if layout.canvas_width % layout.columns != 0 {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "canvas_width {} is not divisible by {} columns",
                        layout.canvas_width, layout.columns
                    ),
                });
            }
            if layout.canvas_height % layout.rows != 0 {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "canvas_height {} is not divisible by {} rows",
                        layout.canvas_height, layout.rows
                    ),
                });
            }
            let data_panels = PanelId::all().len() - 1;
            if layout.data_cells() < data_panels {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "grid has {} data cells; up to {} panels may be dropped",
                        layout.data_cells(),
                        data_panels - layout.data_cells()
                    ),
                });
            }
        }

        if layout.max_tech_stack == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "layout.max_tech_stack is 0: the tech stack panel will be empty"
                    .to_string(),
            });
        }

        if self.output.dir.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "output.dir is empty".to_string(),
            });
        }

        if self.output.currency.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "output.currency is empty: costs will print without a symbol"
                    .to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
