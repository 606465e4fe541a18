use crossterm::style::{style, Color, Stylize};

/// Colors for terminal output
#[derive(Debug, Clone)]
pub struct Theme {
    /// Apply colors at all
    pub enabled: bool,
    /// Headings and the banner
    pub title: Color,
    /// Input errors and warnings
    pub error: Color,
    /// Binding pin found, lock opened
    pub success: Color,
    /// Feedback and secondary text
    pub info: Color,
    /// Menu keys and highlighted numbers
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark terminal theme
    pub fn dark() -> Self {
        Self {
            enabled: true,
            title: Color::Rgb { r: 130, g: 140, b: 170 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    /// No escape codes, for pipes and tests
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::dark()
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn title(&self, text: &str) -> String {
        if self.enabled {
            style(text).with(self.title).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, self.error)
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, self.success)
    }

    pub fn info(&self, text: &str) -> String {
        self.paint(text, self.info)
    }

    pub fn key(&self, text: &str) -> String {
        self.paint(text, self.key)
    }
}
