//! The value a player submits for the current image.

use std::fmt;
use std::str::FromStr;

use serde::de::IgnoredAny;
use serde_json::Number;

/// A prediction forwarded verbatim to the server as a JSON number.
///
/// Holds the literal as typed, so `1e3` goes out as `1e3` and values outside
/// `f64` range are not rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction(String);

impl Prediction {
    pub fn new(value: impl Into<Number>) -> Self {
        Self(value.into().to_string())
    }

    /// The JSON number literal.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Request body with the value spliced in as a raw token.
    pub fn body(&self) -> String {
        format!(r#"{{"prediction": {}}}"#, self.0)
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input that is neither a JSON number nor one of the label words.
#[derive(Debug, thiserror::Error)]
#[error("not a prediction: {input:?} (expected a number, `real` or `fake`)")]
pub struct ParsePredictionError {
    input: String,
}

impl FromStr for Prediction {
    type Err = ParsePredictionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "real" | "r" => return Ok(Self::new(1)),
            "fake" | "f" => return Ok(Self::new(0)),
            _ => {}
        }
        // A JSON value starting with `-` or a digit can only be a number;
        // skipping it checks the syntax without converting it.
        let numeric_start = s.starts_with(|c: char| c == '-' || c.is_ascii_digit());
        if numeric_start && serde_json::from_str::<IgnoredAny>(s).is_ok() {
            return Ok(Self(s.to_string()));
        }
        Err(ParsePredictionError {
            input: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_embeds_integer_unquoted() {
        assert_eq!(Prediction::new(3).body(), r#"{"prediction": 3}"#);
    }

    #[test]
    fn body_embeds_negative_and_fractional() {
        let p: Prediction = "-0.25".parse().unwrap();
        assert_eq!(p.body(), r#"{"prediction": -0.25}"#);
    }

    #[test]
    fn body_keeps_exponent_literal() {
        let p: Prediction = "1e3".parse().unwrap();
        assert_eq!(p.body(), r#"{"prediction": 1e3}"#);
    }

    #[test]
    fn accepts_numbers_beyond_f64_range() {
        let p: Prediction = "1E400".parse().unwrap();
        assert_eq!(p.body(), r#"{"prediction": 1E400}"#);
    }

    #[test]
    fn rejects_malformed_numbers() {
        for input in ["01", "1.", "-", "1e", "+1", "1 2", "-true"] {
            assert!(input.parse::<Prediction>().is_err(), "accepted {input}");
        }
    }

    #[test]
    fn body_is_valid_json() {
        let body = Prediction::new(42u64).body();
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["prediction"], 42);
    }

    #[test]
    fn label_words_map_to_numbers() {
        assert_eq!("real".parse::<Prediction>().unwrap(), Prediction::new(1));
        assert_eq!("FAKE".parse::<Prediction>().unwrap(), Prediction::new(0));
        assert_eq!(" r ".parse::<Prediction>().unwrap(), Prediction::new(1));
    }

    #[test]
    fn rejects_non_numeric_input() {
        let err = "maybe".parse::<Prediction>().unwrap_err();
        assert!(err.to_string().contains("maybe"));
        assert!("\"3\"".parse::<Prediction>().is_err());
        assert!("".parse::<Prediction>().is_err());
    }

    #[test]
    fn display_matches_raw_token() {
        assert_eq!(Prediction::new(7).to_string(), "7");
    }
}
