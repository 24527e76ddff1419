use crate::error::DirectiveError;
use crate::model::NumberStyle;

pub(crate) const PLACEHOLDER: &str = "??";

const ROMAN_MAX: usize = 3999;
/// Two-letter ceiling: 26 single letters plus 26^2 pairs, the last being "zz".
const LETTER_MAX: usize = 26 + 26 * 26;

const ROMAN_SYMBOLS: [(usize, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Render a page number in the given style, with `prefix` and a space in front when set.
pub fn page_label(page: usize, style: NumberStyle, prefix: &str) -> Result<String, DirectiveError> {
    let number = match style {
        NumberStyle::Arabic => page.to_string(),
        NumberStyle::Roman => to_roman(page)?,
        NumberStyle::Letter => to_letters(page)?,
    };
    if prefix.is_empty() {
        Ok(number)
    } else {
        Ok(format!("{prefix} {number}"))
    }
}

/// Like [`page_label`], but an unrenderable number becomes the placeholder. The error
/// comes back alongside so the caller can report it.
pub fn page_label_or_placeholder(
    page: usize,
    style: NumberStyle,
    prefix: &str,
) -> (String, Option<DirectiveError>) {
    match page_label(page, style, prefix) {
        Ok(label) => (label, None),
        Err(e) => {
            let label = if prefix.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                format!("{prefix} {PLACEHOLDER}")
            };
            (label, Some(e))
        }
    }
}

fn to_roman(mut n: usize) -> Result<String, DirectiveError> {
    if n == 0 || n > ROMAN_MAX {
        return Err(DirectiveError::PageNumberOverflow {
            style: NumberStyle::Roman.name(),
            value: n,
            max: ROMAN_MAX,
        });
    }
    let mut out = String::new();
    for &(value, symbol) in &ROMAN_SYMBOLS {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    Ok(out)
}

// Bijective base 26: no zero digit, so every digit is taken after subtracting one.
fn to_letters(mut n: usize) -> Result<String, DirectiveError> {
    if n == 0 || n > LETTER_MAX {
        return Err(DirectiveError::PageNumberOverflow {
            style: NumberStyle::Letter.name(),
            value: n,
            max: LETTER_MAX,
        });
    }
    let mut digits = Vec::new();
    while n > 0 {
        n -= 1;
        digits.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    digits.reverse();
    Ok(digits.into_iter().map(char::from).collect())
}
