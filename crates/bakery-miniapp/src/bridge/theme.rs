//! Host color tokens and the palette derived from them.
use serde::{Deserialize, Serialize};

/// Color tokens as reported by the host. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeParams {
    #[serde(default)]
    pub bg_color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default)]
    pub hint_color: Option<String>,
    #[serde(default)]
    pub link_color: Option<String>,
    #[serde(default)]
    pub button_color: Option<String>,
    #[serde(default)]
    pub button_text_color: Option<String>,
    #[serde(default)]
    pub secondary_bg_color: Option<String>,
}

/// The seven colors the presentation layer uses, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemePalette {
    pub bg_color: String,
    pub text_color: String,
    pub hint_color: String,
    pub link_color: String,
    pub button_color: String,
    pub button_text_color: String,
    pub secondary_bg_color: String,
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self {
            bg_color: "#ffffff".into(),
            text_color: "#000000".into(),
            hint_color: "#999999".into(),
            link_color: "#2678b6".into(),
            button_color: "#2678b6".into(),
            button_text_color: "#ffffff".into(),
            secondary_bg_color: "#f1f1f1".into(),
        }
    }
}

impl From<&ThemeParams> for ThemePalette {
    fn from(params: &ThemeParams) -> Self {
        let defaults = ThemePalette::default();
        let pick = |token: &Option<String>, fallback: String| match token {
            Some(color) if !color.trim().is_empty() => color.clone(),
            _ => fallback,
        };
        Self {
            bg_color: pick(&params.bg_color, defaults.bg_color),
            text_color: pick(&params.text_color, defaults.text_color),
            hint_color: pick(&params.hint_color, defaults.hint_color),
            link_color: pick(&params.link_color, defaults.link_color),
            button_color: pick(&params.button_color, defaults.button_color),
            button_text_color: pick(&params.button_text_color, defaults.button_text_color),
            secondary_bg_color: pick(&params.secondary_bg_color, defaults.secondary_bg_color),
        }
    }
}

impl ThemePalette {
    /// `(name, value)` pairs named `--tg-theme-<token>`, in token order.
    pub fn css_variables(&self) -> Vec<(String, String)> {
        [
            ("bg_color", &self.bg_color),
            ("text_color", &self.text_color),
            ("hint_color", &self.hint_color),
            ("link_color", &self.link_color),
            ("button_color", &self.button_color),
            ("button_text_color", &self.button_text_color),
            ("secondary_bg_color", &self.secondary_bg_color),
        ]
        .into_iter()
        .map(|(token, value)| {
            (
                format!("--tg-theme-{}", token.replace('_', "-")),
                value.clone(),
            )
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tokens_fall_back_to_defaults() {
        let params = ThemeParams {
            bg_color: Some("#1c1c1d".into()),
            text_color: Some("".into()),
            ..ThemeParams::default()
        };
        let palette = ThemePalette::from(&params);

        assert_eq!(palette.bg_color, "#1c1c1d");
        assert_eq!(palette.text_color, "#000000");
        assert_eq!(palette.secondary_bg_color, "#f1f1f1");
    }

    #[test]
    fn test_css_variable_names() {
        let vars = ThemePalette::default().css_variables();

        assert_eq!(vars.len(), 7);
        assert_eq!(vars[0], ("--tg-theme-bg-color".into(), "#ffffff".into()));
        assert_eq!(
            vars[6],
            ("--tg-theme-secondary-bg-color".into(), "#f1f1f1".into())
        );
    }
}
