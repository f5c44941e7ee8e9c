//! Display helpers shared by the HTML views.

use chrono::NaiveDate;

/// Placeholder shown for an absent value.
pub const ABSENT: &str = "-";

/// Format an optional calendar date as `dd-MM-yyyy`, or `-` when absent.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use console::domain::format::display_date;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 9);
/// assert_eq!(display_date(date), "09-03-2024");
/// assert_eq!(display_date(None), "-");
/// ```
#[must_use]
pub fn display_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| ABSENT.to_owned(), |d| d.format("%d-%m-%Y").to_string())
}

/// Show an optional text value, or `-` when absent or blank.
#[must_use]
pub fn display_text(value: Option<&str>) -> &str {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => ABSENT,
    }
}

/// Render a boolean flag in the console's language.
#[must_use]
pub const fn display_flag(value: bool) -> &'static str {
    if value { "Sí" } else { "No" }
}

/// Trim a form value, mapping blank input to `None`.
#[must_use]
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  ana ", Some("ana"))]
    #[case("   ", None)]
    #[case("", None)]
    fn non_blank_trims(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(non_blank(raw).as_deref(), expected);
    }

    #[test]
    fn display_text_hides_blank_values() {
        assert_eq!(display_text(Some(" ")), ABSENT);
        assert_eq!(display_text(Some("600 123 123")), "600 123 123");
        assert_eq!(display_text(None), ABSENT);
    }

    #[test]
    fn flags_render_in_spanish() {
        assert_eq!(display_flag(true), "Sí");
        assert_eq!(display_flag(false), "No");
    }
}
