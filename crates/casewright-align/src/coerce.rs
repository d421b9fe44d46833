use casewright_schema::pattern::ValueType;
use serde_json::{Number, Value};

/// Converts `value` to `to`, or `None` when no sensible reading exists.
///
/// - str: scalars print, containers serialize as JSON
/// - int: integers, truncated finite floats, integer strings, bools as 0/1
/// - float: numbers, numeric strings, bools as 0.0/1.0
/// - bool: bools, non-zero numbers, `true/yes/1` and `false/no/0/""` strings,
///   non-empty containers
/// - dict / list: only the same shape
pub fn coerce(value: &Value, to: ValueType) -> Option<Value> {
    match to {
        ValueType::Str => Some(Value::String(match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            other => other.to_string(),
        })),
        ValueType::Int => to_int(value).map(Value::from),
        ValueType::Float => to_float(value)
            .and_then(Number::from_f64)
            .map(Value::Number),
        ValueType::Bool => to_bool(value).map(Value::Bool),
        ValueType::Dict => value.is_object().then(|| value.clone()),
        ValueType::List => value.is_array().then(|| value.clone()),
    }
}

fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn to_float(value: &Value) -> Option<f64> {
    let f = match value {
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    f.is_finite().then_some(f)
}

fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" | "" => Some(false),
            _ => None,
        },
        Value::Array(a) => Some(!a.is_empty()),
        Value::Object(o) => Some(!o.is_empty()),
        Value::Null => Some(false),
    }
}
