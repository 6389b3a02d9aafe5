//! Semantic style descriptions
//!
//! A [`StyleDescriptor`] is a plain value: cloning it is how the registry takes
//! a defensive copy, and comparing two of them field by field is how callers
//! reason about equality. Every section is optional; a zero-valued section
//! (all flags off, empty strings, zero sizes) is treated as absent both when
//! keying and when the style is materialized.

/// Complete semantic style of a cell or range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StyleDescriptor {
    pub font: FontSpec,
    pub fill: FillSpec,
    pub border: BorderSpec,
    pub alignment: AlignmentSpec,
    /// Number format string, e.g. `"0.00%"`. Empty means General.
    pub number_format: String,
    pub protection: Option<Protection>,
}

/// Font settings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FontSpec {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Size in points, 0 means "engine default"
    pub size: i32,
    pub color: String,
    pub family: String,
}

impl FontSpec {
    pub fn is_empty(&self) -> bool {
        !self.bold
            && !self.italic
            && !self.underline
            && self.size == 0
            && self.color.is_empty()
            && self.family.is_empty()
    }
}

/// Background fill
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FillSpec {
    /// Fill type tag, e.g. `"pattern"` or `"gradient"`
    pub kind: String,
    pub color: String,
}

impl FillSpec {
    pub fn is_empty(&self) -> bool {
        self.kind.is_empty() && self.color.is_empty()
    }
}

/// One edge of a cell border
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BorderEdge {
    /// Line style tag, e.g. `"thin"`, `"double"`
    pub style: String,
    pub color: String,
}

impl BorderEdge {
    pub fn new<S: Into<String>, C: Into<String>>(style: S, color: C) -> Self {
        Self {
            style: style.into(),
            color: color.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.style.is_empty() && self.color.is_empty()
    }
}

/// Which edge of a border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl BorderSide {
    /// Sides in canonical keying order.
    pub const ALL: [BorderSide; 4] = [
        BorderSide::Top,
        BorderSide::Bottom,
        BorderSide::Left,
        BorderSide::Right,
    ];

    pub(crate) fn tag(self) -> char {
        match self {
            BorderSide::Top => 't',
            BorderSide::Bottom => 'b',
            BorderSide::Left => 'l',
            BorderSide::Right => 'r',
        }
    }
}

/// Cell border, one edge per side plus a fallback color
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BorderSpec {
    pub top: BorderEdge,
    pub bottom: BorderEdge,
    pub left: BorderEdge,
    pub right: BorderEdge,
    /// Applied to every drawn side that has no color of its own
    pub color: String,
}

impl BorderSpec {
    pub fn side(&self, side: BorderSide) -> &BorderEdge {
        match side {
            BorderSide::Top => &self.top,
            BorderSide::Bottom => &self.bottom,
            BorderSide::Left => &self.left,
            BorderSide::Right => &self.right,
        }
    }

    pub fn side_mut(&mut self, side: BorderSide) -> &mut BorderEdge {
        match side {
            BorderSide::Top => &mut self.top,
            BorderSide::Bottom => &mut self.bottom,
            BorderSide::Left => &mut self.left,
            BorderSide::Right => &mut self.right,
        }
    }

    /// Color the engine should draw `side` with.
    ///
    /// Returns `None` when the side has no line style, since nothing is drawn
    /// there. Otherwise returns the side's own color, or the fallback color if
    /// the side has none (which may itself be empty).
    ///
    /// ```
    /// use stylecache_core::{BorderEdge, BorderSide, BorderSpec};
    ///
    /// let border = BorderSpec {
    ///     top: BorderEdge::new("thin", ""),
    ///     bottom: BorderEdge::new("thick", "#00FF00"),
    ///     color: "#FF0000".to_string(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(border.effective_color(BorderSide::Top), Some("#FF0000"));
    /// assert_eq!(border.effective_color(BorderSide::Bottom), Some("#00FF00"));
    /// assert_eq!(border.effective_color(BorderSide::Left), None);
    /// ```
    pub fn effective_color(&self, side: BorderSide) -> Option<&str> {
        let edge = self.side(side);
        if edge.style.is_empty() {
            return None;
        }
        if edge.color.is_empty() {
            Some(self.color.as_str())
        } else {
            Some(edge.color.as_str())
        }
    }

    /// A border is empty when no side has a line style.
    ///
    /// A fallback color alone draws nothing, so it does not count.
    pub fn is_empty(&self) -> bool {
        BorderSide::ALL
            .iter()
            .all(|&side| self.side(side).style.is_empty())
    }
}

/// Text alignment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AlignmentSpec {
    /// e.g. `"left"`, `"center"`, `"right"`
    pub horizontal: String,
    /// e.g. `"top"`, `"center"`, `"bottom"`
    pub vertical: String,
    pub wrap_text: bool,
    /// Text rotation in degrees
    pub rotation: i32,
}

impl AlignmentSpec {
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty() && !self.wrap_text && self.rotation == 0
    }
}

/// Cell protection flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Protection {
    pub locked: bool,
    pub hidden: bool,
}

impl StyleDescriptor {
    /// Creates an empty descriptor (no formatting at all).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.font.italic = italic;
        self
    }

    pub fn underline(mut self, underline: bool) -> Self {
        self.font.underline = underline;
        self
    }

    /// Set font size in points
    pub fn font_size(mut self, size: i32) -> Self {
        self.font.size = size;
        self
    }

    pub fn font_color<S: Into<String>>(mut self, color: S) -> Self {
        self.font.color = color.into();
        self
    }

    pub fn font_family<S: Into<String>>(mut self, family: S) -> Self {
        self.font.family = family.into();
        self
    }

    /// Set the fill type tag and color
    pub fn fill<K: Into<String>, C: Into<String>>(mut self, kind: K, color: C) -> Self {
        self.fill = FillSpec {
            kind: kind.into(),
            color: color.into(),
        };
        self
    }

    /// Set one border edge. An empty `color` defers to the fallback color.
    pub fn border_side<S: Into<String>, C: Into<String>>(
        mut self,
        side: BorderSide,
        style: S,
        color: C,
    ) -> Self {
        *self.border.side_mut(side) = BorderEdge::new(style, color);
        self
    }

    /// Set the fallback border color
    pub fn border_color<S: Into<String>>(mut self, color: S) -> Self {
        self.border.color = color.into();
        self
    }

    pub fn horizontal<S: Into<String>>(mut self, align: S) -> Self {
        self.alignment.horizontal = align.into();
        self
    }

    pub fn vertical<S: Into<String>>(mut self, align: S) -> Self {
        self.alignment.vertical = align.into();
        self
    }

    pub fn wrap_text(mut self, wrap: bool) -> Self {
        self.alignment.wrap_text = wrap;
        self
    }

    /// Set text rotation in degrees
    pub fn rotation(mut self, degrees: i32) -> Self {
        self.alignment.rotation = degrees;
        self
    }

    pub fn number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = format.into();
        self
    }

    pub fn protection(mut self, locked: bool, hidden: bool) -> Self {
        self.protection = Some(Protection { locked, hidden });
        self
    }

    /// `true` when every section is absent or zero-valued.
    pub fn is_empty(&self) -> bool {
        self.font.is_empty()
            && self.fill.is_empty()
            && self.border.is_empty()
            && self.alignment.is_empty()
            && self.number_format.is_empty()
            && self.protection.is_none()
    }
}
