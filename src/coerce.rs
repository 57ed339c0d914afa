//! Value coercion for declared route parameters.
//!
//! Raw request values arrive as strings. Coercion converts them to the
//! parameter's declared [`ParamType`] as a [`serde_json::Value`]:
//!
//! | Declared type       | Raw value        | Result                     |
//! |---------------------|------------------|----------------------------|
//! | `string` / `any`    | `" abc "`        | `"abc"`                    |
//! | `number`            | `"42"` / `"7.5"` | `42` / `7.5`               |
//! | `boolean`           | `"TRUE"`         | `true`                     |
//! | any, optional       | missing / `null` | absent (`None`)            |
//! | any, required       | missing / `null` | [`HttpError`] 404          |
//!
//! Failures on optional parameters are absorbed into an absent value; this
//! module is the only place that produces an [`HttpError`] from bad data.

use serde_json::{Number, Value};
use std::collections::HashMap;
use tracing::warn;

use crate::http_error::HttpError;
use crate::template::{ParamType, ParameterDescriptor, RouteTemplate};

/// Coerce a raw value according to a parameter descriptor.
///
/// # Returns
///
/// * `Ok(Some(value))` - the typed value
/// * `Ok(None)` - the parameter is optional and the value is missing or invalid
///
/// # Errors
///
/// Returns a 404 [`HttpError`] when a required value is missing, blank,
/// `null`, or does not parse as the declared type.
pub fn coerce_value(
    param: &ParameterDescriptor,
    raw: Option<&str>,
) -> Result<Option<Value>, HttpError> {
    let value = match raw.map(str::trim) {
        Some(v) if !v.is_empty() && !v.eq_ignore_ascii_case("null") => v,
        _ => {
            if param.is_optional() {
                return Ok(None);
            }
            warn!(param = %param.key(), "Required route param is missing");
            return Err(HttpError::not_found());
        }
    };

    let parsed = match param.value_type() {
        ParamType::String | ParamType::Any => return Ok(Some(Value::String(value.to_string()))),
        ParamType::Number => parse_number(value),
        ParamType::Boolean => parse_boolean(value),
    };

    match parsed {
        Some(v) => Ok(Some(v)),
        None if param.is_optional() => Ok(None),
        None => {
            warn!(
                param = %param.key(),
                value_type = %param.value_type(),
                value = %value,
                "Route param value does not match declared type"
            );
            Err(HttpError::not_found())
        }
    }
}

/// Decimal values parse as floats. Integers stay integers while they fit in
/// `i64` or `u64` and widen to a float beyond that.
fn parse_number(value: &str) -> Option<Value> {
    let as_float = || {
        value
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
    };
    if value.contains('.') {
        return as_float();
    }
    value
        .parse::<i64>()
        .map(Value::from)
        .or_else(|_| value.parse::<u64>().map(Value::from))
        .ok()
        .or_else(as_float)
}

fn parse_boolean(value: &str) -> Option<Value> {
    match value.to_lowercase().as_str() {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        _ => None,
    }
}

impl ParameterDescriptor {
    /// Coerce a raw value for this parameter. See [`coerce_value`].
    ///
    /// # Errors
    ///
    /// Returns a 404 [`HttpError`] for a missing or invalid required value.
    pub fn coerce(&self, raw: Option<&str>) -> Result<Option<Value>, HttpError> {
        coerce_value(self, raw)
    }
}

impl RouteTemplate {
    /// Coerce every declared parameter from a map of raw values.
    ///
    /// Keys in `raw_values` are matched case-insensitively. The result keeps
    /// the template's parameter order and uses each parameter's declared key.
    ///
    /// # Errors
    ///
    /// Returns the first [`HttpError`] raised by a required parameter.
    pub fn coerce_values(
        &self,
        raw_values: &HashMap<String, String>,
    ) -> Result<Vec<(String, Option<Value>)>, HttpError> {
        let lowered: HashMap<String, &str> = raw_values
            .iter()
            .map(|(k, v)| (k.trim().to_lowercase(), v.as_str()))
            .collect();

        self.parameters()
            .iter()
            .map(|param| {
                let raw = lowered.get(&param.key().to_lowercase()).copied();
                Ok((param.key().to_string(), param.coerce(raw)?))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{parse_token, TokenLocation};
    use http::StatusCode;
    use serde_json::json;

    fn param(token: &str, location: TokenLocation) -> ParameterDescriptor {
        parse_token(token, location).unwrap()
    }

    #[test]
    fn test_string_is_trimmed() {
        let p = param("name:string", TokenLocation::Path);
        assert_eq!(p.coerce(Some("  abc ")).unwrap(), Some(json!("abc")));
    }

    #[test]
    fn test_any_keeps_text() {
        let p = param("slug", TokenLocation::Path);
        assert_eq!(p.coerce(Some("42")).unwrap(), Some(json!("42")));
    }

    #[test]
    fn test_integer_and_float() {
        let p = param("id:number", TokenLocation::Path);
        assert_eq!(p.coerce(Some("42")).unwrap(), Some(json!(42)));
        assert_eq!(p.coerce(Some("7.5")).unwrap(), Some(json!(7.5)));
        assert_eq!(p.coerce(Some("-3")).unwrap(), Some(json!(-3)));
    }

    #[test]
    fn test_integer_beyond_i64() {
        let p = param("id:number", TokenLocation::Path);
        assert_eq!(
            p.coerce(Some("9223372036854775808")).unwrap(),
            Some(json!(9_223_372_036_854_775_808_u64))
        );
        assert_eq!(
            p.coerce(Some("18446744073709551616")).unwrap(),
            Some(json!(18_446_744_073_709_551_616_f64))
        );
        assert_eq!(p.coerce(Some("NaN")).unwrap_err().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_boolean_case_insensitive() {
        let p = param("all:boolean", TokenLocation::Query);
        assert_eq!(p.coerce(Some("TRUE")).unwrap(), Some(json!(true)));
        assert_eq!(p.coerce(Some("false")).unwrap(), Some(json!(false)));
    }

    #[test]
    fn test_required_missing_is_not_found() {
        let p = param("id:number", TokenLocation::Path);
        for raw in [None, Some(""), Some("   "), Some("NULL")] {
            let err = p.coerce(raw).unwrap_err();
            assert_eq!(err.status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn test_optional_missing_is_absent() {
        let p = param("name?:string", TokenLocation::Query);
        assert_eq!(p.coerce(None).unwrap(), None);
        assert_eq!(p.coerce(Some("null")).unwrap(), None);
    }

    #[test]
    fn test_invalid_required_number() {
        let p = param("id:number", TokenLocation::Path);
        let err = p.coerce(Some("abc")).unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(p.coerce(Some("1.2.3")).is_err());
        assert!(p.coerce(Some("NaN")).is_err());
    }

    #[test]
    fn test_invalid_optional_number_is_absent() {
        let p = param("page?:number", TokenLocation::Query);
        assert_eq!(p.coerce(Some("abc")).unwrap(), None);
    }

    #[test]
    fn test_invalid_boolean() {
        let required = param("all:boolean", TokenLocation::Query);
        assert!(required.coerce(Some("yes")).is_err());
        let optional = param("all?:boolean", TokenLocation::Query);
        assert_eq!(optional.coerce(Some("yes")).unwrap(), None);
    }
}
