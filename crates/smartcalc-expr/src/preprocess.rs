//! Bound-variable extraction and substitution
//!
//! An expression may end in `| x = <value>`. The value is extracted, the
//! `|...` suffix removed, and every standalone `x` in the remaining text is
//! replaced by the value's decimal rendering.

use crate::token::VARIABLE;
use lazy_regex::regex;
use log::trace;

/// Result of preprocessing a raw expression
#[derive(Debug, Clone, PartialEq)]
pub struct Preprocessed {
    /// Text exactly as supplied
    pub raw: String,
    /// Text with the binding suffix removed, `x` left in place
    pub stripped: String,
    /// Text with `x` replaced by the bound value
    pub substituted: String,
    /// Bound value of `x`, if a binding suffix was present
    pub bound: Option<f64>,
}

/// Extract a `| x = <value>` binding and substitute it.
///
/// Without a binding (or with a binding for any other name) the text passes
/// through unchanged and `bound` is `None`.
pub fn preprocess(raw: &str) -> Preprocessed {
    let binding = regex!(r"\|\s*x\s*=\s*([-+]?\d*\.?\d+)");

    let bound = binding
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok());

    let Some(value) = bound else {
        return Preprocessed {
            raw: raw.to_string(),
            stripped: raw.to_string(),
            substituted: raw.to_string(),
            bound: None,
        };
    };

    let stripped = match raw.find('|') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    let substituted = substitute_variable(stripped, value);
    trace!("bound {} = {}: '{}' -> '{}'", VARIABLE, value, raw, substituted);

    Preprocessed {
        raw: raw.to_string(),
        stripped: stripped.to_string(),
        substituted,
        bound: Some(value),
    }
}

/// Replace every standalone `x` letter run in `text` with `value`.
pub fn substitute_variable(text: &str, value: f64) -> String {
    let rendered = render_value(value);
    regex!(r"[A-Za-z]+")
        .replace_all(text, |caps: &regex::Captures<'_>| {
            if &caps[0] == VARIABLE {
                rendered.clone()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

// Negative values are parenthesised so `x^2` stays `(-3)^2`.
fn render_value(value: f64) -> String {
    if value.is_sign_negative() && value != 0.0 {
        format!("({})", value)
    } else {
        format!("{}", value.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_binding_passes_through() {
        let p = preprocess("sin(2) + 1");
        assert_eq!(p.substituted, "sin(2) + 1");
        assert_eq!(p.stripped, "sin(2) + 1");
        assert_eq!(p.bound, None);
    }

    #[test]
    fn test_binding_is_substituted() {
        let p = preprocess("sin(x) * cos(x) | x = 45");
        assert_eq!(p.bound, Some(45.0));
        assert_eq!(p.stripped, "sin(x) * cos(x) ");
        assert_eq!(p.substituted, "sin(45) * cos(45) ");
    }

    #[test]
    fn test_fractional_and_signed_values() {
        assert_eq!(preprocess("ln(x) | x = 2.71828182846").bound, Some(2.71828182846));
        assert_eq!(preprocess("x|x=.5").bound, Some(0.5));
        assert_eq!(preprocess("x^2 | x = -3").substituted, "(-3)^2 ");
        assert_eq!(preprocess("x | x = +2").substituted, "2 ");
    }

    #[test]
    fn test_only_standalone_variable_is_replaced() {
        let p = preprocess("exp(x) + xx | x = 1");
        assert_eq!(p.substituted, "exp(1) + xx ");
    }

    #[test]
    fn test_wrong_variable_name_does_not_bind() {
        let p = preprocess("x + 5 | y = 10");
        assert_eq!(p.bound, None);
        assert_eq!(p.substituted, "x + 5 | y = 10");
    }

    #[test]
    fn test_variable_symbol_is_case_sensitive() {
        assert_eq!(preprocess("X | X = 1").bound, None);
    }
}
