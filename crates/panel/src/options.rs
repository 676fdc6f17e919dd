use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Width pair requested from the host for the panel and the canvas.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PanelWidths {
    pub panel: String,
    pub canvas: String,
}

impl PanelWidths {
    fn new(panel: &str, canvas: &str) -> Self {
        PanelWidths {
            panel: panel.to_string(),
            canvas: canvas.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PanelOptions {
    /// Builder class prefix. The selection marker is `{prefix}selected`.
    pub style_prefix: String,
    /// Read the host's canonical export instead of the live element.
    pub clear_data: bool,
    /// Append the component script as an inline `<script>` block.
    pub edit_js: bool,
    /// Enables delete-selection on the style surface.
    pub clean_css_btn: bool,
    /// Leave the host layout alone on show/hide.
    pub preserve_width: bool,
    pub open_state: PanelWidths,
    pub closed_state: PanelWidths,
    // Labels for the shell; the core never reads them.
    pub panel_id: String,
    pub html_btn_text: String,
    pub css_btn_text: String,
    pub clean_css_btn_text: String,
    pub init_delay_ms: u64,
    pub refresh_delay_ms: u64,
    pub section_toggle_delay_ms: u64,
}

impl Default for PanelOptions {
    fn default() -> Self {
        PanelOptions {
            style_prefix: "gjs-".to_string(),
            clear_data: false,
            edit_js: false,
            clean_css_btn: true,
            preserve_width: false,
            open_state: PanelWidths::new("35%", "65%"),
            closed_state: PanelWidths::new("15%", "85%"),
            panel_id: "views-container".to_string(),
            html_btn_text: "Apply".to_string(),
            css_btn_text: "Apply".to_string(),
            clean_css_btn_text: "Delete".to_string(),
            init_delay_ms: 100,
            refresh_delay_ms: 320,
            section_toggle_delay_ms: 300,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(toml::de::Error),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "failed to parse panel options: {err}"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid panel option `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl PanelOptions {
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let options: PanelOptions = toml::from_str(src)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.style_prefix.is_empty() {
            return Err(ConfigError::Invalid {
                field: "style_prefix",
                reason: "must not be empty".to_string(),
            });
        }
        if self.style_prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid {
                field: "style_prefix",
                reason: format!("{:?} contains whitespace", self.style_prefix),
            });
        }
        for (field, widths) in [
            ("open_state", &self.open_state),
            ("closed_state", &self.closed_state),
        ] {
            if widths.panel.trim().is_empty() || widths.canvas.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "panel and canvas widths must be set".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Class the host puts on the selected element.
    pub fn marker_class(&self) -> String {
        format!("{}selected", self.style_prefix)
    }

    pub fn init_delay(&self) -> Duration {
        Duration::from_millis(self.init_delay_ms)
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }

    pub fn section_toggle_delay(&self) -> Duration {
        Duration::from_millis(self.section_toggle_delay_ms)
    }
}
