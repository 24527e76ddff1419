#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Fill,
    AsIs,
}

/// Horizontal placement of the header/footer content row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalPosition {
    Left,
    Right,
    Center,
    /// Right on even pages, left on odd ones.
    Smart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalPosition {
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NumberStyle {
    #[default]
    Arabic,
    Roman,
    Letter,
}

impl NumberStyle {
    pub fn name(self) -> &'static str {
        match self {
            NumberStyle::Arabic => "arabic",
            NumberStyle::Roman => "roman",
            NumberStyle::Letter => "letter",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderBand {
    pub height: usize,
    pub row: usize, // 1-based, within the band
    pub horizontal: HorizontalPosition,
    pub vertical: VerticalPosition,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageNumbering {
    pub counter: usize,
    pub style: NumberStyle,
    pub prefix: String,
}

impl Default for PageNumbering {
    fn default() -> Self {
        Self {
            counter: 1,
            style: NumberStyle::Arabic,
            prefix: String::new(),
        }
    }
}

/// Run configuration. Directives adjust the live geometry afterwards; these are the
/// starting values plus the behaviors that no directive controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub width: usize,
    pub height: usize,
    /// Seed for fill-justification gap placement. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Whether `?feed` / `?feed_lines` blank lines count against the page budget.
    pub feed_consumes_budget: bool,
    /// Whether the `?par` indent applies to every following paragraph or only the next.
    pub indent_persists: bool,
}

pub const MIN_PAGE_DIMENSION: usize = 20;

impl Default for Options {
    fn default() -> Self {
        Self {
            width: 72,
            height: 40,
            seed: None,
            feed_consumes_budget: true,
            indent_persists: true,
        }
    }
}

impl Options {
    pub(crate) fn validate(&self) -> Result<(), crate::Error> {
        if self.width < MIN_PAGE_DIMENSION || self.height < MIN_PAGE_DIMENSION {
            return Err(crate::Error::Options(format!(
                "page size {}x{} is below the {MIN_PAGE_DIMENSION}x{MIN_PAGE_DIMENSION} minimum",
                self.height, self.width
            )));
        }
        Ok(())
    }
}
