use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Page layout handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageOptions {
    pub format: PageFormat,

    /// Margins in millimetres.
    pub margin_top_mm: f64,
    pub margin_right_mm: f64,
    pub margin_bottom_mm: f64,
    pub margin_left_mm: f64,

    /// Print background colours and images.
    pub print_background: bool,

    /// Let the renderer inject its own header/footer (date, URL, page
    /// numbers). Off: the document carries its own.
    pub display_header_footer: bool,

    /// Viewport used for layout before printing.
    pub viewport_width: u32,
    pub viewport_height: u32,

    /// Best-effort wait after content load so web fonts can settle.
    pub settle_delay_ms: u64,

    /// Hard cap on one render, including the settle delay.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFormat {
    A4,
    Letter,
}

impl PageFormat {
    fn css_size(self) -> &'static str {
        match self {
            PageFormat::A4 => "A4",
            PageFormat::Letter => "letter",
        }
    }
}

impl PageOptions {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The `@page` rule that pins size and margins in the document itself.
    pub fn css_page_rule(&self) -> String {
        format!(
            "@page {{ size: {}; margin: {}mm {}mm {}mm {}mm; }}",
            self.format.css_size(),
            self.margin_top_mm,
            self.margin_right_mm,
            self.margin_bottom_mm,
            self.margin_left_mm,
        )
    }
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            format: PageFormat::A4,
            margin_top_mm: 20.0,
            margin_right_mm: 15.0,
            margin_bottom_mm: 20.0,
            margin_left_mm: 15.0,
            print_background: true,
            display_header_footer: false,
            viewport_width: 1200,
            viewport_height: 800,
            settle_delay_ms: 1000,
            timeout_secs: 30,
        }
    }
}
