//! Field declarations and the immutable constraint spec built from them.

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Number, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::check::{Accepted, check};
use crate::error::ValidationErrors;

/// Expected JSON type of a field after coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// JSON string.
    String,
    /// Any JSON number.
    Number,
    /// JSON integer. Whole floats such as `3.0` are not integers.
    Integer,
    /// JSON boolean.
    Boolean,
    /// JSON array.
    Array,
    /// JSON object.
    Object,
}

impl FieldKind {
    pub(crate) fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }

    pub(crate) const fn described(self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Number => "a number",
            Self::Integer => "an integer",
            Self::Boolean => "a boolean",
            Self::Array => "an array",
            Self::Object => "an object",
        }
    }
}

/// Explicit conversion applied to a raw value before any rule runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Numeric strings become numbers (`"42"` to `42`, `"4.5"` to `4.5`).
    Number,
    /// `"true"` and `"false"` become booleans.
    Boolean,
}

impl Coercion {
    /// Apply the coercion, returning the input unchanged when it does not fit.
    pub(crate) fn apply(self, raw: &Value) -> Value {
        let Some(text) = raw.as_str() else {
            return raw.clone();
        };
        let text = text.trim();
        match self {
            Self::Number => {
                if let Ok(integer) = text.parse::<i64>() {
                    return Value::Number(integer.into());
                }
                text.parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map_or_else(|| raw.clone(), Value::Number)
            }
            Self::Boolean => match text {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => raw.clone(),
            },
        }
    }
}

/// String formats understood by [`FieldSpec::format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `local@domain.tld` shaped address.
    Email,
    /// Hyphenated or simple UUID.
    Uuid,
    /// `YYYY-MM-DD` calendar date.
    Date,
}

impl Format {
    fn accepts(self, text: &str) -> bool {
        match self {
            Self::Email => email_regex().is_some_and(|regex| regex.is_match(text)),
            Self::Uuid => Uuid::try_parse(text).is_ok(),
            // Same parser the typed `NaiveDate` fields deserialise with.
            Self::Date => text.parse::<NaiveDate>().is_ok(),
        }
    }

    fn violation(self, field: &str) -> String {
        match self {
            Self::Email => format!("{field} must be a valid email address"),
            Self::Uuid => format!("{field} must be a valid UUID"),
            Self::Date => format!("{field} must be an ISO-8601 date"),
        }
    }
}

static EMAIL_RE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

/// The compiled email pattern, or `None` if it failed to compile.
///
/// [`ConstraintSpecBuilder::build`] refuses email rules in that case, so a
/// built spec never evaluates an email rule without it.
fn email_regex() -> Option<&'static Regex> {
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"))
        .as_ref()
        .ok()
}

#[derive(Debug, Clone)]
enum Rule {
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    OneOf(Vec<Value>),
    Format(Format),
    Pattern(Regex),
}

impl Rule {
    fn evaluate(&self, field: &str, value: &Value) -> Result<(), String> {
        match self {
            Self::MinLength(min) => match measure(value, Measure::Trimmed) {
                Some((length, _)) if length >= *min => Ok(()),
                Some((_, unit)) => Err(format!(
                    "{field} must be at least {min} {}",
                    unit.counted(*min)
                )),
                None => Err(format!("{field} must be a string")),
            },
            Self::MaxLength(max) => match measure(value, Measure::Raw) {
                Some((length, _)) if length <= *max => Ok(()),
                Some((_, unit)) => Err(format!(
                    "{field} must not exceed {max} {}",
                    unit.counted(*max)
                )),
                None => Err(format!("{field} must be a string")),
            },
            Self::Min(min) => match value.as_f64() {
                Some(number) if number >= *min => Ok(()),
                Some(_) => Err(format!("{field} must not be less than {min}")),
                None => Err(format!("{field} must be a number")),
            },
            Self::Max(max) => match value.as_f64() {
                Some(number) if number <= *max => Ok(()),
                Some(_) => Err(format!("{field} must not be greater than {max}")),
                None => Err(format!("{field} must be a number")),
            },
            Self::OneOf(allowed) => {
                if allowed.contains(value) {
                    Ok(())
                } else {
                    Err(format!("{field} must be one of: {}", list_allowed(allowed)))
                }
            }
            Self::Format(format) => match value.as_str() {
                Some(text) if format.accepts(text) => Ok(()),
                _ => Err(format.violation(field)),
            },
            Self::Pattern(regex) => match value.as_str() {
                Some(text) if regex.is_match(text) => Ok(()),
                _ => Err(format!("{field} has an invalid format")),
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Measure {
    /// Surrounding whitespace does not count towards a minimum.
    Trimmed,
    Raw,
}

#[derive(Debug, Clone, Copy)]
enum Unit {
    Character,
    Item,
}

impl Unit {
    const fn counted(self, count: usize) -> &'static str {
        match (self, count) {
            (Self::Character, 1) => "character",
            (Self::Character, _) => "characters",
            (Self::Item, 1) => "item",
            (Self::Item, _) => "items",
        }
    }
}

fn measure(value: &Value, mode: Measure) -> Option<(usize, Unit)> {
    match (value, mode) {
        (Value::String(text), Measure::Trimmed) => {
            Some((text.trim().chars().count(), Unit::Character))
        }
        (Value::String(text), Measure::Raw) => Some((text.chars().count(), Unit::Character)),
        (Value::Array(items), _) => Some((items.len(), Unit::Item)),
        _ => None,
    }
}

fn list_allowed(allowed: &[Value]) -> String {
    allowed
        .iter()
        .map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Declaration of one accepted field and its rules.
///
/// Rules run in declaration order after the optional coercion and type check;
/// the first failing rule is the one reported for the field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    required: bool,
    kind: Option<FieldKind>,
    coercion: Option<Coercion>,
    rules: Vec<Rule>,
}

impl FieldSpec {
    /// Declare a field that must be present and non-null.
    pub fn required(name: impl Into<String>) -> Self {
        Self::declare(name.into(), true)
    }

    /// Declare a field that may be absent or null.
    pub fn optional(name: impl Into<String>) -> Self {
        Self::declare(name.into(), false)
    }

    fn declare(name: String, required: bool) -> Self {
        Self {
            name,
            required,
            kind: None,
            coercion: None,
            rules: Vec::new(),
        }
    }

    /// Require the value to have the given JSON type.
    #[must_use]
    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Convert string input before checking it.
    #[must_use]
    pub fn coerce(mut self, coercion: Coercion) -> Self {
        self.coercion = Some(coercion);
        self
    }

    /// Minimum number of characters (strings) or items (arrays).
    ///
    /// Strings are measured without surrounding whitespace, so a blank value
    /// never satisfies a positive minimum.
    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.rules.push(Rule::MinLength(min));
        self
    }

    /// Maximum number of characters (strings) or items (arrays).
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.rules.push(Rule::MaxLength(max));
        self
    }

    /// Inclusive lower bound for numbers.
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.rules.push(Rule::Min(min));
        self
    }

    /// Inclusive upper bound for numbers.
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.rules.push(Rule::Max(max));
        self
    }

    /// Restrict the value to an enumerated set.
    #[must_use]
    pub fn one_of<I, V>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.rules
            .push(Rule::OneOf(allowed.into_iter().map(Into::into).collect()));
        self
    }

    /// Require a well-known string format.
    #[must_use]
    pub fn format(mut self, format: Format) -> Self {
        self.rules.push(Rule::Format(format));
        self
    }

    /// Require the string value to match `regex`.
    #[must_use]
    pub fn pattern(mut self, regex: Regex) -> Self {
        self.rules.push(Rule::Pattern(regex));
        self
    }

    /// Field name as it appears in the input object.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Whether the field must be supplied.
    pub const fn is_required(&self) -> bool {
        self.required
    }

    pub(crate) const fn expected_kind(&self) -> Option<FieldKind> {
        self.kind
    }

    pub(crate) const fn coercion(&self) -> Option<Coercion> {
        self.coercion
    }

    pub(crate) fn evaluate_rules(&self, value: &Value) -> Result<(), String> {
        self.rules
            .iter()
            .try_for_each(|rule| rule.evaluate(&self.name, value))
    }

    fn formats_are_available(&self) -> Result<(), SpecError> {
        let wants_email = self
            .rules
            .iter()
            .any(|rule| matches!(rule, Rule::Format(Format::Email)));
        if wants_email && email_regex().is_none() {
            return Err(SpecError::UnavailableFormat {
                field: self.name.clone(),
            });
        }
        Ok(())
    }

    fn bounds_are_consistent(&self) -> Result<(), SpecError> {
        let mut min_length = None;
        let mut max_length = None;
        let mut min = None;
        let mut max = None;
        for rule in &self.rules {
            match rule {
                Rule::MinLength(value) => min_length = Some(*value),
                Rule::MaxLength(value) => max_length = Some(*value),
                Rule::Min(value) => min = Some(*value),
                Rule::Max(value) => max = Some(*value),
                Rule::OneOf(_) | Rule::Format(_) | Rule::Pattern(_) => {}
            }
        }
        if let (Some(low), Some(high)) = (min_length, max_length)
            && low > high
        {
            return Err(SpecError::InvertedLengthBounds {
                field: self.name.clone(),
            });
        }
        if let (Some(low), Some(high)) = (min, max)
            && low > high
        {
            return Err(SpecError::InvertedRange {
                field: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// Errors raised while building a [`ConstraintSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// A field was declared with an empty name.
    #[error("field names must not be empty")]
    EmptyFieldName,
    /// The same field was declared twice.
    #[error("field `{field}` is declared more than once")]
    DuplicateField {
        /// Offending field name.
        field: String,
    },
    /// `min_length` exceeds `max_length`.
    #[error("field `{field}` declares a minimum length above its maximum length")]
    InvertedLengthBounds {
        /// Offending field name.
        field: String,
    },
    /// `min` exceeds `max`.
    #[error("field `{field}` declares a minimum above its maximum")]
    InvertedRange {
        /// Offending field name.
        field: String,
    },
    /// A pattern handed to [`FieldSpec::pattern`] failed to compile.
    #[error("pattern failed to compile: {reason}")]
    InvalidPattern {
        /// Compiler diagnostic.
        reason: String,
    },
    /// A format rule whose matcher could not be prepared.
    #[error("field `{field}` declares a format that is unavailable")]
    UnavailableFormat {
        /// Offending field name.
        field: String,
    },
}

impl From<regex::Error> for SpecError {
    fn from(error: regex::Error) -> Self {
        Self::InvalidPattern {
            reason: error.to_string(),
        }
    }
}

/// Immutable set of field declarations for one input shape.
#[derive(Debug, Clone)]
pub struct ConstraintSpec {
    fields: Vec<FieldSpec>,
}

impl ConstraintSpec {
    /// Start declaring a spec.
    pub fn builder() -> ConstraintSpecBuilder {
        ConstraintSpecBuilder { fields: Vec::new() }
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        self.fields.as_slice()
    }

    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Run the checker against `input`.
    ///
    /// # Errors
    /// Returns every violation found when the input does not satisfy the spec.
    pub fn check(&self, input: &Value) -> Result<Accepted, ValidationErrors> {
        check(input, self)
    }

    /// Run the checker and deserialise the accepted value into `T`.
    ///
    /// # Errors
    /// Returns the checker's violations, or a single violation naming the
    /// path that failed to deserialise.
    pub fn accept<T>(&self, input: &Value) -> Result<T, ValidationErrors>
    where
        T: DeserializeOwned,
    {
        self.check(input)?.deserialize()
    }
}

/// Builder collecting field declarations.
#[derive(Debug)]
pub struct ConstraintSpecBuilder {
    fields: Vec<FieldSpec>,
}

impl ConstraintSpecBuilder {
    /// Append a field declaration.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Validate the declarations and freeze them.
    ///
    /// # Errors
    /// Returns [`SpecError`] when a name is empty or duplicated, when a
    /// field declares inverted bounds, or when a format rule cannot be
    /// evaluated.
    pub fn build(self) -> Result<ConstraintSpec, SpecError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(SpecError::EmptyFieldName);
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SpecError::DuplicateField {
                    field: field.name.clone(),
                });
            }
            field.bounds_are_consistent()?;
            field.formats_are_available()?;
        }
        Ok(ConstraintSpec {
            fields: self.fields,
        })
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.described())
    }
}
