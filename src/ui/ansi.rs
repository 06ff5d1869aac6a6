// ANSI styling for terminal output.

pub const ESC_BYTE: u8 = 0x1B;

#[macro_export]
macro_rules! csi {
    ($suffix:literal) => {
        concat!("\x1B[", $suffix)
    };
}

pub const STYLE_RESET: &str = crate::csi!("0m");
pub const STYLE_BOLD: &str = crate::csi!("1m");
pub const FG_GREEN: &str = crate::csi!("32m");
pub const FG_RED: &str = crate::csi!("31m");
pub const FG_YELLOW: &str = crate::csi!("33m");
pub const FG_GRAY: &str = crate::csi!("90m");

/// Wraps text in a style when color is on; otherwise returns it unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Painter {
    pub enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Color when stdout is a terminal.
    pub fn for_stdout() -> Self {
        use std::io::IsTerminal;
        Self::new(std::io::stdout().is_terminal())
    }

    pub fn paint(&self, style: &str, text: impl AsRef<str>) -> String {
        if self.enabled {
            format!("{style}{}{STYLE_RESET}", text.as_ref())
        } else {
            text.as_ref().to_string()
        }
    }
}
