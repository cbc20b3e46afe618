//! Numeric condition filters: an operator plus one or two comparison values.

use crate::locale::Locale;
use crate::value::{format_number, CellValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator of a condition filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "is-equal-to")]
    IsEqualTo,
    #[serde(rename = "is-between")]
    IsBetween,
    #[serde(rename = "is-greater-than")]
    IsGreaterThan,
    #[serde(rename = "is-less-than")]
    IsLessThan,
}

impl Condition {
    pub fn all() -> &'static [Condition] {
        &[
            Condition::IsEqualTo,
            Condition::IsBetween,
            Condition::IsGreaterThan,
            Condition::IsLessThan,
        ]
    }

    /// Wire name, e.g. `is-between`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::IsEqualTo => "is-equal-to",
            Condition::IsBetween => "is-between",
            Condition::IsGreaterThan => "is-greater-than",
            Condition::IsLessThan => "is-less-than",
        }
    }

    /// Parse a wire name. The empty string and unknown names mean "no
    /// condition".
    pub fn from_wire(s: &str) -> Option<Condition> {
        match s {
            "is-equal-to" => Some(Condition::IsEqualTo),
            "is-between" => Some(Condition::IsBetween),
            "is-greater-than" => Some(Condition::IsGreaterThan),
            "is-less-than" => Some(Condition::IsLessThan),
            _ => None,
        }
    }

    pub fn label<'l>(&self, locale: &'l Locale) -> &'l str {
        match self {
            Condition::IsEqualTo => locale.condition_is_equal_to,
            Condition::IsBetween => locale.condition_is_between,
            Condition::IsGreaterThan => locale.condition_is_greater_than,
            Condition::IsLessThan => locale.condition_is_less_than,
        }
    }

    /// Whether the second operand takes part in the comparison.
    pub fn uses_second_operand(&self) -> bool {
        matches!(self, Condition::IsBetween)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One comparison value. Values typed into a number input arrive as raw text
/// and are coerced at evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Number(f64),
    Text(String),
}

impl Default for Operand {
    fn default() -> Self {
        Operand::Text(String::new())
    }
}

impl Operand {
    /// Numeric value with browser `Number()` semantics: surrounding whitespace
    /// is ignored, blank text is zero, anything unparsable is NaN.
    pub fn coerce(&self) -> f64 {
        match self {
            Operand::Number(n) => *n,
            Operand::Text(s) => string_to_number(s),
        }
    }

    /// Falsy operands (blank text, zero, NaN) are omitted from filter labels.
    pub fn is_blank(&self) -> bool {
        match self {
            Operand::Number(n) => *n == 0.0 || n.is_nan(),
            Operand::Text(s) => s.is_empty(),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Operand::Number(n) => format_number(*n),
            Operand::Text(s) => s.clone(),
        }
    }
}

/// `Number(text)`: decimal literals, signed `Infinity`, and unsigned
/// `0x`/`0o`/`0b` integers. Rust-only spellings such as `inf` or `1_0` are NaN.
fn string_to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return radix_integer(&trimmed[2..], radix);
    }
    let decimal_chars = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !decimal_chars {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn radix_integer(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Number(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Text(value.to_string())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::Text(value)
    }
}

/// Condition filter value stored in a number column's filter slot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConditionFilter {
    #[serde(with = "condition_wire")]
    pub condition: Option<Condition>,
    pub value: [Operand; 2],
}

impl ConditionFilter {
    pub fn new(
        condition: Option<Condition>,
        first: impl Into<Operand>,
        second: impl Into<Operand>,
    ) -> Self {
        Self {
            condition,
            value: [first.into(), second.into()],
        }
    }

    pub fn equal_to(value: impl Into<Operand>) -> Self {
        Self::new(Some(Condition::IsEqualTo), value, "")
    }

    pub fn between(min: impl Into<Operand>, max: impl Into<Operand>) -> Self {
        Self::new(Some(Condition::IsBetween), min, max)
    }

    pub fn greater_than(value: impl Into<Operand>) -> Self {
        Self::new(Some(Condition::IsGreaterThan), value, "")
    }

    pub fn less_than(value: impl Into<Operand>) -> Self {
        Self::new(Some(Condition::IsLessThan), value, "")
    }

    /// A filter without a condition lets every row through.
    pub fn is_active(&self) -> bool {
        self.condition.is_some()
    }

    /// Evaluate against a cell. Non-numeric cells never satisfy an active
    /// condition.
    pub fn matches(&self, cell: &CellValue) -> bool {
        if !self.is_active() {
            return true;
        }
        match cell {
            CellValue::Number(n) => number_condition(*n, self),
            CellValue::Null | CellValue::Text(_) => false,
        }
    }

    /// Between filter whose lower bound exceeds the upper bound.
    pub fn is_inverted_range(&self) -> bool {
        self.condition == Some(Condition::IsBetween)
            && self.value[0].coerce() > self.value[1].coerce()
    }
}

/// The numeric condition predicate.
///
/// Bounds of `is-between` are inclusive and are not reordered: an inverted
/// range matches nothing. A missing condition matches everything.
pub fn number_condition(row_value: f64, filter: &ConditionFilter) -> bool {
    let min = filter.value[0].coerce();
    let max = filter.value[1].coerce();
    match filter.condition {
        Some(Condition::IsEqualTo) => row_value == min,
        Some(Condition::IsBetween) => row_value >= min && row_value <= max,
        Some(Condition::IsGreaterThan) => row_value > min,
        Some(Condition::IsLessThan) => row_value < min,
        None => true,
    }
}

/// Serializes a missing condition as the empty string.
mod condition_wire {
    use super::Condition;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        condition: &Option<Condition>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(condition.map(|c| c.as_str()).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Condition>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Condition::from_wire(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greater_than_is_strict() {
        let filter = ConditionFilter::greater_than(100.0);
        assert!(number_condition(150.0, &filter));
        assert!(!number_condition(100.0, &filter));
        assert!(!number_condition(50.0, &filter));
    }

    #[test]
    fn test_less_than_is_strict() {
        let filter = ConditionFilter::less_than(10.0);
        assert!(number_condition(9.99, &filter));
        assert!(!number_condition(10.0, &filter));
    }

    #[test]
    fn test_between_is_inclusive() {
        let filter = ConditionFilter::between(10.0, 20.0);
        assert!(number_condition(10.0, &filter));
        assert!(number_condition(20.0, &filter));
        assert!(!number_condition(20.01, &filter));
    }

    #[test]
    fn test_inverted_between_matches_nothing() {
        let filter = ConditionFilter::between(20.0, 10.0);
        assert!(filter.is_inverted_range());
        for v in [5.0, 10.0, 15.0, 20.0, 25.0] {
            assert!(!number_condition(v, &filter));
        }
    }

    #[test]
    fn test_string_operands_are_coerced() {
        let filter = ConditionFilter::equal_to("42");
        assert!(number_condition(42.0, &filter));
        let filter = ConditionFilter::between(" 1.5 ", "3");
        assert!(number_condition(2.0, &filter));
    }

    #[test]
    fn test_blank_operand_coerces_to_zero() {
        let filter = ConditionFilter::greater_than("");
        assert!(number_condition(0.5, &filter));
        assert!(!number_condition(0.0, &filter));
    }

    #[test]
    fn test_unparsable_operand_never_matches() {
        let filter = ConditionFilter::equal_to("abc");
        assert!(!number_condition(0.0, &filter));
        assert!(!number_condition(f64::NAN, &filter));
    }

    #[test]
    fn test_coerce_follows_number_spellings() {
        let coerce = |s: &str| Operand::from(s).coerce();
        assert_eq!(coerce("0x10"), 16.0);
        assert_eq!(coerce("0b101"), 5.0);
        assert_eq!(coerce("0o17"), 15.0);
        assert_eq!(coerce(" -Infinity "), f64::NEG_INFINITY);
        assert_eq!(coerce("1e3"), 1000.0);
        assert_eq!(coerce(".5"), 0.5);
        for rejected in ["inf", "infinity", "NaN", "-0x10", "0x", "1_000", "12px"] {
            assert!(coerce(rejected).is_nan(), "{rejected} should be NaN");
        }
    }

    #[test]
    fn test_missing_condition_passes_everything() {
        let filter = ConditionFilter::default();
        assert!(number_condition(-1e9, &filter));
        assert!(filter.matches(&CellValue::Null));
    }

    #[test]
    fn test_non_numeric_cell_fails_active_condition() {
        let filter = ConditionFilter::greater_than(0.0);
        assert!(!filter.matches(&CellValue::Null));
        assert!(!filter.matches(&CellValue::from("12")));
        assert!(filter.matches(&CellValue::from(12.0)));
    }

    #[test]
    fn test_wire_format() {
        let filter = ConditionFilter::new(Some(Condition::IsGreaterThan), 100.0, "");
        let json = serde_json::to_string(&filter).unwrap();
        assert_eq!(json, r#"{"condition":"is-greater-than","value":[100.0,""]}"#);

        let parsed: ConditionFilter =
            serde_json::from_str(r#"{"condition":"","value":["",""]}"#).unwrap();
        assert_eq!(parsed.condition, None);
        assert!(!parsed.is_active());
    }

    #[test]
    fn test_labels_follow_locale() {
        use crate::locale::{EN, PT};
        assert_eq!(Condition::IsBetween.label(&EN), "is between");
        assert_eq!(Condition::IsLessThan.label(&PT), "é menor que");
    }
}
