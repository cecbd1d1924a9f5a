//! Cell styles and the category style registry
//!
//! Every row the layouts produce is tagged with a [`Category`]. The
//! [`StyleRegistry`] turns a category into a concrete [`CellStyle`]
//! (fill, font, border, alignment). The lookup is a closed `match`, so
//! every category always resolves to exactly one style.
//!
//! ## Example
//!
//! ```rust
//! use gridreport_core::style::{Category, StyleRegistry, Theme};
//!
//! let registry = StyleRegistry::new(Theme::default());
//! let phase = registry.style_for(Category::Phase);
//! assert_eq!(phase.fill, Some(0x1565C0));
//! assert!(phase.font.bold);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Style Primitives
// ============================================================================

/// Horizontal alignment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HAlign {
    #[default]
    General,
    Left,
    Center,
    Right,
}

/// Vertical alignment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VAlign {
    #[default]
    Bottom,
    Center,
}

/// Cell alignment: horizontal, vertical, indent level and text rotation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub horizontal: HAlign,
    pub vertical: VAlign,
    /// Indent level (only meaningful for left alignment)
    pub indent: u8,
    /// Text rotation in degrees (0 or 90 in practice)
    pub rotation: i16,
}

impl Alignment {
    /// Centered both ways
    pub const fn center() -> Self {
        Self {
            horizontal: HAlign::Center,
            vertical: VAlign::Center,
            indent: 0,
            rotation: 0,
        }
    }

    /// Left aligned, vertically centered
    pub const fn left() -> Self {
        Self {
            horizontal: HAlign::Left,
            vertical: VAlign::Center,
            indent: 0,
            rotation: 0,
        }
    }

    /// Right aligned, vertically centered
    pub const fn right() -> Self {
        Self {
            horizontal: HAlign::Right,
            vertical: VAlign::Center,
            indent: 0,
            rotation: 0,
        }
    }

    pub const fn indent(mut self, level: u8) -> Self {
        self.indent = level;
        self
    }

    pub const fn rotate(mut self, degrees: i16) -> Self {
        self.rotation = degrees;
        self
    }
}

/// Font weight, size and color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub bold: bool,
    pub size: f64,
    /// RGB color, `None` keeps the application default (black)
    pub color: Option<u32>,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            bold: false,
            size: 11.0,
            color: None,
        }
    }
}

impl Font {
    pub fn sized(size: f64) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn color(mut self, rgb: u32) -> Self {
        self.color = Some(rgb);
        self
    }
}

/// Cell border
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Border {
    #[default]
    None,
    /// Thin black line on all four sides
    Thin,
}

/// Complete style of a single cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellStyle {
    /// Solid background fill (RGB)
    pub fill: Option<u32>,
    pub font: Font,
    pub border: Border,
    pub align: Alignment,
}

impl CellStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(mut self, rgb: u32) -> Self {
        self.fill = Some(rgb);
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn thin_border(mut self) -> Self {
        self.border = Border::Thin;
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }
}

// ============================================================================
// Categories
// ============================================================================

/// Closed set of style categories used by the report layouts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Title,
    Subtitle,
    Header,
    /// Week number header (rotated)
    WeekHeader,
    /// Week start date under the week number
    WeekDate,
    Phase,
    Task,
    Subtask,
    Milestone,
    /// Painted week cell of an activity bar
    Bar,
    /// Week cell holding a milestone glyph
    MilestoneMarker,
    Section,
    Subtotal,
    Total,
    Data,
    SummaryTitle,
    LegendTitle,
    /// Unstyled cell
    Plain,
}

impl Category {
    pub const ALL: [Category; 18] = [
        Category::Title,
        Category::Subtitle,
        Category::Header,
        Category::WeekHeader,
        Category::WeekDate,
        Category::Phase,
        Category::Task,
        Category::Subtask,
        Category::Milestone,
        Category::Bar,
        Category::MilestoneMarker,
        Category::Section,
        Category::Subtotal,
        Category::Total,
        Category::Data,
        Category::SummaryTitle,
        Category::LegendTitle,
        Category::Plain,
    ];

    /// Resolve a textual tag to a category.
    ///
    /// Accepts English tags and the Spanish tags used by the ACEX tables.
    /// Unknown tags resolve to [`Category::Subtask`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "title" | "titulo" => Self::Title,
            "subtitle" | "subtitulo" => Self::Subtitle,
            "header" => Self::Header,
            "week-header" => Self::WeekHeader,
            "week-date" => Self::WeekDate,
            "phase" | "fase" => Self::Phase,
            "task" | "tarea" => Self::Task,
            "milestone" | "hito" => Self::Milestone,
            "bar" | "barra" => Self::Bar,
            "milestone-marker" => Self::MilestoneMarker,
            "section" | "seccion" => Self::Section,
            "subtotal" => Self::Subtotal,
            "total" => Self::Total,
            "data" | "datos" => Self::Data,
            "summary-title" => Self::SummaryTitle,
            "legend-title" => Self::LegendTitle,
            "plain" => Self::Plain,
            _ => Self::Subtask,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Subtitle => "subtitle",
            Self::Header => "header",
            Self::WeekHeader => "week-header",
            Self::WeekDate => "week-date",
            Self::Phase => "phase",
            Self::Task => "task",
            Self::Subtask => "subtask",
            Self::Milestone => "milestone",
            Self::Bar => "bar",
            Self::MilestoneMarker => "milestone-marker",
            Self::Section => "section",
            Self::Subtotal => "subtotal",
            Self::Total => "total",
            Self::Data => "data",
            Self::SummaryTitle => "summary-title",
            Self::LegendTitle => "legend-title",
            Self::Plain => "plain",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Theme & Registry
// ============================================================================

/// Palette and title sizes a registry is built from
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub principal: u32,
    pub dark: u32,
    pub light: u32,
    pub very_light: u32,
    pub header: u32,
    pub milestone: u32,
    pub subtotal: u32,
    pub data: u32,
    pub text: u32,
    pub title_size: f64,
    pub subtitle_size: f64,
}

impl Default for Theme {
    /// ACEX blues, Gantt title sizes
    fn default() -> Self {
        Self {
            principal: 0x1976D2,
            dark: 0x1565C0,
            light: 0x42A5F5,
            very_light: 0xBBDEF7,
            header: 0x0D47A1,
            milestone: 0xFF9800,
            subtotal: 0x64B5F6,
            data: 0xE3F2FD,
            text: 0xFFFFFF,
            title_size: 14.0,
            subtitle_size: 10.0,
        }
    }
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title_size(mut self, size: f64) -> Self {
        self.title_size = size;
        self
    }

    pub fn subtitle_size(mut self, size: f64) -> Self {
        self.subtitle_size = size;
        self
    }
}

/// Category to style lookup
#[derive(Clone, Debug, Default)]
pub struct StyleRegistry {
    theme: Theme,
}

impl StyleRegistry {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Style for a category. Total over [`Category`].
    pub fn style_for(&self, category: Category) -> CellStyle {
        let t = &self.theme;
        let white = |size: f64| Font::sized(size).color(t.text);

        match category {
            Category::Title => CellStyle::new()
                .fill(t.principal)
                .font(white(t.title_size).bold())
                .align(Alignment::center()),
            Category::Subtitle => CellStyle::new()
                .fill(t.light)
                .font(white(t.subtitle_size))
                .align(Alignment::center()),
            Category::Header => CellStyle::new()
                .fill(t.header)
                .font(white(11.0).bold())
                .thin_border()
                .align(Alignment::center()),
            Category::WeekHeader => CellStyle::new()
                .fill(t.header)
                .font(white(11.0).bold())
                .thin_border()
                .align(Alignment::center().rotate(90)),
            Category::WeekDate => CellStyle::new()
                .fill(t.light)
                .font(white(8.0))
                .thin_border()
                .align(Alignment::center()),
            Category::Phase => CellStyle::new()
                .fill(t.dark)
                .font(white(10.0).bold())
                .thin_border()
                .align(Alignment::center()),
            Category::Task => CellStyle::new()
                .fill(t.principal)
                .font(Font::sized(9.0))
                .thin_border()
                .align(Alignment::center()),
            Category::Subtask => CellStyle::new()
                .fill(t.light)
                .font(white(9.0))
                .thin_border()
                .align(Alignment::center()),
            Category::Milestone => CellStyle::new()
                .fill(t.milestone)
                .font(white(9.0).bold())
                .thin_border()
                .align(Alignment::center()),
            Category::Bar => CellStyle::new().fill(t.principal).thin_border(),
            Category::MilestoneMarker => CellStyle::new()
                .fill(t.milestone)
                .font(white(14.0).bold())
                .thin_border()
                .align(Alignment::center()),
            Category::Section => CellStyle::new()
                .fill(t.principal)
                .font(white(12.0).bold())
                .thin_border()
                .align(Alignment::center()),
            Category::Subtotal => CellStyle::new()
                .fill(t.subtotal)
                .font(white(11.0).bold())
                .thin_border()
                .align(Alignment::center()),
            Category::Total => CellStyle::new()
                .fill(t.header)
                .font(white(14.0).bold())
                .thin_border()
                .align(Alignment::center()),
            Category::Data => CellStyle::new()
                .fill(t.data)
                .font(Font::sized(10.0))
                .thin_border()
                .align(Alignment::left()),
            Category::SummaryTitle => CellStyle::new()
                .fill(t.light)
                .font(white(11.0).bold())
                .thin_border()
                .align(Alignment::center()),
            Category::LegendTitle => CellStyle::new().font(Font::sized(10.0).bold()),
            Category::Plain => CellStyle::new(),
        }
    }

    /// Light background that replaces the fill of task rows
    pub fn background(&self) -> u32 {
        self.theme.very_light
    }

    /// Legend swatch: the category fill behind a 14pt white glyph
    pub fn swatch(&self, category: Category) -> CellStyle {
        let base = self.style_for(category);
        CellStyle {
            fill: base.fill,
            font: Font::sized(14.0).color(self.theme.text),
            ..CellStyle::default()
        }
    }
}
