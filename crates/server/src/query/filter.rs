use super::RESERVED_PARAMS;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug)]
pub enum QueryError {
    UnknownOperator(String),
    MalformedCondition(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::UnknownOperator(op) => write!(f, "Unknown comparison operator: {op}"),
            QueryError::MalformedCondition(key) => {
                write!(f, "Malformed filter parameter: {key}")
            }
        }
    }
}

impl std::error::Error for QueryError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

impl Comparison {
    fn parse(token: &str) -> Result<Self, QueryError> {
        match token {
            "gt" => Ok(Comparison::Gt),
            "gte" => Ok(Comparison::Gte),
            "lt" => Ok(Comparison::Lt),
            "lte" => Ok(Comparison::Lte),
            "in" => Ok(Comparison::In),
            other => Err(QueryError::UnknownOperator(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Condition {
    pub field: String,
    pub op: Comparison,
    pub value: Value,
}

impl Condition {
    fn matches(&self, document: &Value) -> bool {
        let Some(actual) = document.get(&self.field) else {
            return false;
        };
        match self.op {
            Comparison::Eq => values_equal(actual, &self.value),
            Comparison::In => self
                .value
                .as_array()
                .map(|candidates| {
                    candidates
                        .iter()
                        .any(|candidate| values_equal(actual, candidate))
                })
                .unwrap_or(false),
            Comparison::Gt => matches!(compare_values(actual, &self.value), Some(Ordering::Greater)),
            Comparison::Gte => matches!(
                compare_values(actual, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Comparison::Lt => matches!(compare_values(actual, &self.value), Some(Ordering::Less)),
            Comparison::Lte => matches!(
                compare_values(actual, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
        }
    }
}

/// A conjunction of field conditions, built from request query parameters.
/// `field=v` is equality; `field[op]=v` applies a comparison operator.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, QueryError> {
        let mut conditions = Vec::new();
        for (key, raw) in params {
            if RESERVED_PARAMS.contains(&key.as_str()) {
                continue;
            }
            let condition = match key.split_once('[') {
                Some((field, rest)) => {
                    let token = rest
                        .strip_suffix(']')
                        .ok_or_else(|| QueryError::MalformedCondition(key.clone()))?;
                    if field.is_empty() {
                        return Err(QueryError::MalformedCondition(key.clone()));
                    }
                    let op = Comparison::parse(token)?;
                    let value = if op == Comparison::In {
                        Value::Array(raw.split(',').map(parse_scalar).collect())
                    } else {
                        parse_scalar(raw)
                    };
                    Condition {
                        field: field.to_string(),
                        op,
                        value,
                    }
                }
                None => Condition {
                    field: key.clone(),
                    op: Comparison::Eq,
                    value: parse_scalar(raw),
                },
            };
            conditions.push(condition);
        }
        Ok(Filter { conditions })
    }

    /// Single equality condition, used for reference lookups.
    pub fn equals(field: &str, value: impl Into<Value>) -> Self {
        Filter {
            conditions: vec![Condition {
                field: field.to_string(),
                op: Comparison::Eq,
                value: value.into(),
            }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, document: &Value) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.matches(document))
    }
}

fn parse_scalar(raw: &str) -> Value {
    if let Ok(int) = raw.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = raw.parse::<f64>() {
        return Value::from(float);
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return x.partial_cmp(&y);
    }
    match (a.as_str(), b.as_str()) {
        (Some(x), Some(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
