use terminal_size::{Width, terminal_size};

use crate::ui::ansi::ESC_BYTE;

const FALLBACK_TERMINAL_WIDTH: usize = 80;

/// Width math that ignores ANSI escape sequences.
#[derive(Debug, Default, Clone)]
pub struct WidthUtil;

impl WidthUtil {
    /// Drop every `ESC [ ... <letter>` sequence.
    pub fn strip_ansi(s: &str) -> String {
        let bytes = s.as_bytes();
        let mut out = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == ESC_BYTE && bytes.get(i + 1) == Some(&b'[') {
                i += 2;
                while i < bytes.len() && !bytes[i].is_ascii_alphabetic() {
                    i += 1;
                }
                i += 1;
                continue;
            }
            out.push(bytes[i]);
            i += 1;
        }
        String::from_utf8_lossy(&out).into_owned()
    }

    pub fn visible_width(&self, s: &str) -> usize {
        Self::strip_ansi(s).chars().count()
    }

    pub fn pad_visible(&self, s: &str, width: usize) -> String {
        let fill = width.saturating_sub(self.visible_width(s));
        format!("{s}{}", " ".repeat(fill))
    }

    pub fn terminal_width(&self) -> usize {
        match terminal_size() {
            Some((Width(w), _)) => w as usize,
            None => FALLBACK_TERMINAL_WIDTH,
        }
    }

    /// Left padding that centers `content_width` columns in the terminal.
    pub fn center_pad(&self, content_width: usize) -> usize {
        self.terminal_width().saturating_sub(content_width) / 2
    }
}
