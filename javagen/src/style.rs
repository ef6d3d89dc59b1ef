//! Terminal styles for the `inspect` output, keyed by what the styled text
//! means rather than by color.

use ansi_term::{Color, Style};
use std::collections::HashMap;

pub const DEFAULT: Style = Style {
    foreground: None,
    background: None,
    is_bold: false,
    is_dimmed: false,
    is_italic: false,
    is_underline: false,
    is_blink: false,
    is_reverse: false,
    is_hidden: false,
    is_strikethrough: false,
};

lazy_static::lazy_static! {
    static ref STYLE_MAP: HashMap<&'static str, Style> = {
        let mut map = HashMap::new();

        map.insert("comment", Color::Cyan.normal());
        map.insert("access", Color::Yellow.normal());
        map.insert("keyword", Color::Blue.bold());
        map.insert("extends", Color::Yellow.bold());

        map.insert("class.name", Color::Green.bold());
        map.insert("member", DEFAULT);
        map.insert("constant", Color::Purple.normal());
        map.insert("line", Color::Cyan.bold());

        map.insert("error", Color::Red.bold());
        map
    };
}

/// Looks up a style by name, falling back to unstyled text for names the map
/// does not know.
pub fn style(name: &str) -> Style {
    STYLE_MAP.get(name).copied().unwrap_or(DEFAULT)
}
