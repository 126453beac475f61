//! Popcorn theme for PopcornTUI
//!
//! Color palette and style helpers for the TUI: dark slate panels with
//! violet accents and golden rating stars.

use ratatui::style::{Color, Modifier, Style};

/// Popcorn color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #212529 (slate)
    pub const BACKGROUND: Color = Color::Rgb(0x21, 0x25, 0x29);

    /// Primary: #7950f2 (violet)
    pub const PRIMARY: Color = Color::Rgb(0x79, 0x50, 0xf2);

    /// Primary dark: #6741d9 (selection fill)
    pub const PRIMARY_DARK: Color = Color::Rgb(0x67, 0x41, 0xd9);

    /// Secondary: #9775fa (lavender)
    pub const SECONDARY: Color = Color::Rgb(0x97, 0x75, 0xfa);

    /// Star: #fcc419 (gold)
    pub const STAR: Color = Color::Rgb(0xfc, 0xc4, 0x19);

    /// Text: #dee2e6 (light gray)
    pub const TEXT: Color = Color::Rgb(0xde, 0xe2, 0xe6);

    /// Text dark: #adb5bd (metadata)
    pub const TEXT_DARK: Color = Color::Rgb(0xad, 0xb5, 0xbd);

    /// Dim: #868e96 (hints)
    pub const DIM: Color = Color::Rgb(0x86, 0x8e, 0x96);

    /// Success: #51cf66 (green)
    pub const SUCCESS: Color = Color::Rgb(0x51, 0xcf, 0x66);

    /// Error: #fa5252 (red)
    pub const ERROR: Color = Color::Rgb(0xfa, 0x52, 0x52);

    // ═══════════════════════════════════════════════════════════════════════
    // DERIVED COLORS (for UI elements)
    // ═══════════════════════════════════════════════════════════════════════

    /// Slightly lighter background for panels and inputs
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x2b, 0x30, 0x35);

    /// Lighter still, for the summary strip
    pub const BACKGROUND_HOVER: Color = Color::Rgb(0x34, 0x3a, 0x40);

    /// Border color (muted slate)
    pub const BORDER: Color = Color::Rgb(0x49, 0x50, 0x57);

    /// Border color when focused
    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Highlighted row (light text on violet)
    pub fn highlighted() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .bg(Self::PRIMARY_DARK)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed/muted text
    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Metadata text (year, runtime, genre)
    pub fn meta() -> Style {
        Style::default().fg(Self::TEXT_DARK)
    }

    /// Error style
    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// Success style
    pub fn success() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    /// Title/header style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Accent text style (gold)
    pub fn accent() -> Style {
        Style::default()
            .fg(Self::STAR)
            .add_modifier(Modifier::BOLD)
    }

    /// Normal/unfocused border
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Focused border
    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    /// Border for a given focus state
    pub fn border_for(focused: bool) -> Style {
        if focused {
            Self::border_focused()
        } else {
            Self::border()
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // RATING STYLES
    // ═══════════════════════════════════════════════════════════════════════

    /// Filled star
    pub fn star_filled() -> Style {
        Style::default().fg(Self::STAR)
    }

    /// Empty star
    pub fn star_empty() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Catalog rating, colored by score
    pub fn rating(score: f32) -> Style {
        if score >= 7.0 {
            Style::default().fg(Self::SUCCESS)
        } else if score >= 5.0 {
            Style::default().fg(Self::STAR)
        } else {
            Style::default().fg(Self::ERROR)
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // COMPONENT STYLES
    // ═══════════════════════════════════════════════════════════════════════

    /// Style for input fields
    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Keybinding hint style
    pub fn keybind() -> Style {
        Style::default().fg(Self::STAR)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Summary strip of the watched box
    pub fn summary() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_HOVER)
    }

    /// Loading indicator
    pub fn loading() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Primary call to action ("+ Add to list")
    pub fn button() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .bg(Self::PRIMARY_DARK)
            .add_modifier(Modifier::BOLD)
    }

    /// Year/date metadata
    pub fn year() -> Style {
        Style::default().fg(Self::TEXT_DARK)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CONTRAST
// ═══════════════════════════════════════════════════════════════════════════

/// Minimum contrast for body text (WCAG AA)
pub const AA_TEXT: f64 = 4.5;

/// Minimum contrast for bold or large text (WCAG AA)
pub const AA_LARGE: f64 = 3.0;

/// WCAG contrast ratio of two RGB colors, from 1.0 up to 21.0
///
/// `None` for palette/indexed colors, whose actual RGB depends on the terminal.
pub fn contrast(fg: Color, bg: Color) -> Option<f64> {
    let (a, b) = (luminance(fg)?, luminance(bg)?);
    Some((a.max(b) + 0.05) / (a.min(b) + 0.05))
}

/// Relative luminance, https://www.w3.org/TR/WCAG20/#relativeluminancedef
fn luminance(color: Color) -> Option<f64> {
    let Color::Rgb(r, g, b) = color else {
        return None;
    };
    let linear = |c: u8| {
        let c = f64::from(c) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    Some(0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b))
}
