//! Colors and styles for human-mode output.

use console::Style;

use crate::validate::Severity;

/// Centralizes the styles used by [`super::HumanOutput`].
#[derive(Debug, Clone)]
pub struct Palette {
    pub accent: Style,
    pub success: Style,
    pub error: Style,
    pub warning: Style,
    pub muted: Style,

    pub header: Style,
    pub label: Style,
    pub value: Style,
    pub widget_name: Style,
    pub path: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            accent: Style::new().color256(33),
            success: Style::new().green(),
            error: Style::new().red(),
            warning: Style::new().color256(214),
            muted: Style::new().color256(245),
            header: Style::new().bold().color256(33),
            label: Style::new().dim(),
            value: Style::new().bold(),
            widget_name: Style::new().bold().color256(214),
            path: Style::new().italic().color256(245),
        }
    }
}

impl Palette {
    /// Tag and style for a validation message.
    pub fn severity(&self, severity: Severity) -> (&'static str, &Style) {
        match severity {
            Severity::Success => ("[OK]", &self.success),
            Severity::Info => ("[INFO]", &self.accent),
            Severity::Warning => ("[WARN]", &self.warning),
            Severity::Error => ("[ERR]", &self.error),
        }
    }
}
