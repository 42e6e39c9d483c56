//! Font descriptor for text shapes.

/// Font used by text shapes.
///
/// Describes family, weight, style and size, and converts to a Pango font
/// description when a layout is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Font family name (e.g., "Sans", "Monospace", "JetBrains Mono")
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light" or numeric 100-900)
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,

    /// Size in points
    pub size: f64,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "normal".to_string(),
            style: "normal".to_string(),
            size: 10.0,
        }
    }
}

impl Font {
    /// Creates a regular font of the given family and size.
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = "bold".to_string();
        self
    }

    pub fn italic(mut self) -> Self {
        self.style = "italic".to_string();
        self
    }

    /// Converts this font to a Pango font description string.
    ///
    /// Format: "Family Style Weight Size"
    /// Example: "Sans Bold 32" or "Monospace Italic 24"
    pub fn to_pango_string(&self) -> String {
        let mut parts = vec![self.family.clone()];

        if !self.style.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.style));
        }

        if !self.weight.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.weight));
        }

        parts.push(format!("{}", self.size));

        parts.join(" ")
    }

    pub(crate) fn description(&self) -> pango::FontDescription {
        pango::FontDescription::from_string(&self.to_pango_string())
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_font_omits_normal_parts() {
        assert_eq!(Font::default().to_pango_string(), "Sans 10");
    }

    #[test]
    fn italic_bold_font_lists_style_before_weight() {
        let font = Font::new("Monospace", 24.0).bold().italic();
        assert_eq!(font.to_pango_string(), "Monospace Italic Bold 24");
    }

    #[test]
    fn custom_weight_is_capitalized() {
        let mut font = Font::new("JetBrains Mono", 16.0);
        font.weight = "light".to_string();
        assert_eq!(font.to_pango_string(), "JetBrains Mono Light 16");
    }

    #[test]
    fn fractional_size_is_kept() {
        let font = Font::new("Sans", 10.5);
        assert_eq!(font.to_pango_string(), "Sans 10.5");
        assert_eq!(font.description().size(), (10.5 * pango::SCALE as f64) as i32);
    }
}
