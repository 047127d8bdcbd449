//! Permissive numeric extraction for score and epoch fields.
//!
//! Notes are hand-typed, so values arrive as `0.841`, `Avg AUC 0.89`,
//! `84.1%` or `~30 (early stopping)`. The first number wins; whatever else the
//! text carried is reported back so callers can keep it.

use regex::Regex;
use std::sync::LazyLock;

static DECIMAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]*\.?[0-9]+)(\s*%)?").expect("Invalid decimal regex")
});

static INTEGER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("Invalid integer regex"));

/// Outcome of a permissive parse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parsed<T> {
    /// Extracted value, `None` when the text holds no usable number
    pub value: Option<T>,
    /// True when the trimmed text was exactly the number
    pub clean: bool,
}

impl<T> Parsed<T> {
    fn none() -> Self {
        Self {
            value: None,
            clean: false,
        }
    }

    /// Whether the raw text holds information beyond the extracted value.
    pub fn has_annotation(&self) -> bool {
        !self.clean
    }
}

/// Extract the first decimal; a trailing `%` scales it into `[0, 1]`.
pub fn parse_decimal(raw: &str) -> Parsed<f64> {
    let text = raw.trim();
    let Some(caps) = DECIMAL_REGEX.captures(text) else {
        return Parsed::none();
    };
    let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
        return Parsed::none();
    };
    let Ok(mut value) = number.as_str().parse::<f64>() else {
        return Parsed::none();
    };
    if !value.is_finite() {
        return Parsed::none();
    }
    let percent = caps.get(2).is_some();
    if percent {
        value /= 100.0;
    }
    Parsed {
        value: Some(value),
        clean: !percent && whole.as_str() == text,
    }
}

/// Extract the first run of digits.
pub fn parse_integer(raw: &str) -> Parsed<u32> {
    let text = raw.trim();
    let Some(found) = INTEGER_REGEX.find(text) else {
        return Parsed::none();
    };
    match found.as_str().parse::<u32>() {
        Ok(value) => Parsed {
            value: Some(value),
            clean: found.as_str() == text,
        },
        Err(_) => Parsed::none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_decimal_is_clean() {
        let p = parse_decimal(" 0.841 ");
        assert_eq!(p.value, Some(0.841));
        assert!(p.clean);
    }

    #[test]
    fn test_annotated_decimal() {
        let p = parse_decimal("0.841 (avg)");
        assert_eq!(p.value, Some(0.841));
        assert!(p.has_annotation());

        let p = parse_decimal("Avg AUC 0.89");
        assert_eq!(p.value, Some(0.89));
        assert!(p.has_annotation());
    }

    #[test]
    fn test_leading_dot_decimal() {
        assert_eq!(parse_decimal(".61").value, Some(0.61));
    }

    #[test]
    fn test_percent_is_scaled() {
        let p = parse_decimal("84.1%");
        assert!((p.value.unwrap() - 0.841).abs() < 1e-12);
        assert!(!p.clean);
        let p = parse_decimal("61 %");
        assert!((p.value.unwrap() - 0.61).abs() < 1e-12);
    }

    #[test]
    fn test_no_number() {
        assert_eq!(parse_decimal("n/a").value, None);
        assert_eq!(parse_decimal("").value, None);
        assert!(parse_decimal("n/a").has_annotation());
    }

    #[test]
    fn test_integer() {
        assert_eq!(parse_integer("30"), Parsed { value: Some(30), clean: true });
        let p = parse_integer("~30 (early stopping)");
        assert_eq!(p.value, Some(30));
        assert!(!p.clean);
    }

    #[test]
    fn test_unparseable_integer_is_empty() {
        assert_eq!(parse_integer("many").value, None);
        // Overflows u32
        assert_eq!(parse_integer("99999999999").value, None);
    }
}
