use ratatui::style::{Color, Modifier, Style};

use crate::models::{Phase, WorkClassification};

// ── Color palette ──────────────────────────────────────────────────

pub const BG: Color = Color::Rgb(0x0a, 0x0a, 0x0f);
pub const NEON_CYAN: Color = Color::Rgb(0x00, 0xff, 0xf5);
pub const NEON_MAGENTA: Color = Color::Rgb(0xff, 0x00, 0xff);
pub const NEON_PINK: Color = Color::Rgb(0xff, 0x2d, 0x6f);
pub const NEON_GREEN: Color = Color::Rgb(0x39, 0xff, 0x14);
pub const NEON_ORANGE: Color = Color::Rgb(0xff, 0x6e, 0x27);
pub const ELECTRIC_BLUE: Color = Color::Rgb(0x00, 0xd4, 0xff);
pub const SAFETY_YELLOW: Color = Color::Rgb(0xff, 0xd3, 0x00);
pub const TEXT_DIM: Color = Color::Rgb(0xb0, 0xb0, 0xb0);
pub const TEXT_BRIGHT: Color = Color::Rgb(0xff, 0xff, 0xff);
pub const BORDER_DIM: Color = Color::Rgb(0x00, 0x5f, 0x5f);
pub const BORDER_BRIGHT: Color = Color::Rgb(0x00, 0xff, 0xf5);
pub const GRID: Color = Color::Rgb(0x22, 0x22, 0x2a);

// ── Style presets ──────────────────────────────────────────────────

pub fn panel_border(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(BORDER_BRIGHT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(BORDER_DIM)
    }
}

pub fn phase_style(phase: Phase) -> Style {
    match phase {
        Phase::Contract => Style::default().fg(ELECTRIC_BLUE),
        Phase::Preparation => Style::default().fg(SAFETY_YELLOW),
        Phase::Construction => Style::default().fg(NEON_ORANGE),
        Phase::Completion => Style::default().fg(NEON_GREEN),
    }
}

/// Style of an unsegmented bar.
pub fn classification_style(classification: WorkClassification) -> Style {
    match classification {
        WorkClassification::Construction => Style::default().fg(NEON_ORANGE),
        WorkClassification::Maintenance => Style::default().fg(NEON_CYAN),
        WorkClassification::Fabrication => Style::default().fg(NEON_MAGENTA),
    }
}

pub fn classification_symbol(classification: WorkClassification) -> &'static str {
    match classification {
        WorkClassification::Construction => "▲",
        WorkClassification::Maintenance => "◆",
        WorkClassification::Fabrication => "■",
    }
}

pub fn today_style() -> Style {
    Style::default().fg(NEON_PINK).add_modifier(Modifier::BOLD)
}

pub fn grid_style() -> Style {
    Style::default().fg(GRID)
}

pub fn header_style(highlighted: bool) -> Style {
    if highlighted {
        Style::default()
            .fg(BG)
            .bg(NEON_CYAN)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    }
}

// ── Bar glyphs ─────────────────────────────────────────────────────

pub const BAR_FULL: char = '█';
pub const CLIP_LEFT: char = '◀';
pub const CLIP_RIGHT: char = '▶';
pub const TODAY_MARK: char = '│';
pub const GRID_MARK: char = '┊';

// ── ASCII art header ───────────────────────────────────────────────

pub const HEADER_ART: &str = "\
▐██▌ BUILDLINE ▐██▌";

// ── Tests ──────────────────────────────────────────────────────────
