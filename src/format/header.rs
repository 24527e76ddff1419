use crate::model::{HeaderBand, HorizontalPosition, VerticalPosition};

use super::layout::{align_center, align_right, rule};

/// Lines of a header/footer band for one page, rule included, in print order.
/// `label` is the already rendered page number.
pub(super) fn render_band(band: &HeaderBand, label: &str, page: usize, width: usize) -> Vec<String> {
    let content = if band.text.is_empty() {
        label.to_string()
    } else {
        format!("{} {label}", band.text)
    };
    let placed = place(&content, band.horizontal, page, width);

    let rows = (1..=band.height).map(|row| {
        if row == band.row {
            placed.clone()
        } else {
            String::new()
        }
    });

    // The rule always faces the body text.
    match band.vertical {
        VerticalPosition::Top => rows.chain(std::iter::once(rule(width))).collect(),
        VerticalPosition::Bottom => std::iter::once(rule(width)).chain(rows).collect(),
    }
}

fn place(content: &str, position: HorizontalPosition, page: usize, width: usize) -> String {
    let position = match position {
        HorizontalPosition::Smart if page % 2 == 0 => HorizontalPosition::Right,
        HorizontalPosition::Smart => HorizontalPosition::Left,
        other => other,
    };
    match position {
        HorizontalPosition::Right => align_right(content, width),
        HorizontalPosition::Center => align_center(content, width),
        _ => content.to_string(),
    }
}
