use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Number, Value};

use crate::models::{CaseStatus, CourtLevel, Jurisdiction, UrgencyLevel};

/// A value that can shape a query key.
///
/// Parts are limited to scalars whose JSON form is total and injective, so two
/// different parameters can never collapse onto one key.
pub trait KeyPart {
    fn key_value(&self) -> Value;
}

macro_rules! integer_parts {
    ($($t:ty),*) => {
        $(impl KeyPart for $t {
            fn key_value(&self) -> Value {
                Value::from(*self)
            }
        })*
    };
}

integer_parts!(i32, i64, u32, u64, usize);

impl KeyPart for bool {
    fn key_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl KeyPart for f64 {
    fn key_value(&self) -> Value {
        // NaN and infinities have no JSON number; keep them distinct from null.
        Number::from_f64(*self)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(self.to_string()))
    }
}

impl KeyPart for str {
    fn key_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl KeyPart for String {
    fn key_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl KeyPart for NaiveDate {
    fn key_value(&self) -> Value {
        Value::String(self.format("%Y-%m-%d").to_string())
    }
}

impl KeyPart for NaiveDateTime {
    fn key_value(&self) -> Value {
        Value::String(self.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }
}

macro_rules! enum_parts {
    ($($t:ty),*) => {
        $(impl KeyPart for $t {
            fn key_value(&self) -> Value {
                Value::String(self.as_str().to_string())
            }
        })*
    };
}

enum_parts!(CaseStatus, UrgencyLevel, Jurisdiction, CourtLevel);

impl<T: KeyPart> KeyPart for Option<T> {
    fn key_value(&self) -> Value {
        match self {
            Some(value) => value.key_value(),
            None => Value::Null,
        }
    }
}

impl<T: KeyPart + ?Sized> KeyPart for &T {
    fn key_value(&self) -> Value {
        (**self).key_value()
    }
}

/// Identity of a cached query: a resource name plus every parameter that shapes
/// the result, in declaration order.
///
/// Two keys are equal exactly when their canonical JSON forms are equal, so keys
/// built from equal values always share a cache slot.
#[derive(Debug, Clone)]
pub struct QueryKey {
    resource: String,
    parts: Vec<Value>,
    canonical: String,
}

impl QueryKey {
    pub fn new(resource: impl Into<String>) -> Self {
        let resource = resource.into();
        let canonical = canonical(&resource, &[]);
        Self {
            resource,
            parts: Vec::new(),
            canonical,
        }
    }

    /// Append a parameter. `None` is kept as `null` so positions stay stable.
    pub fn with<T: KeyPart>(mut self, part: T) -> Self {
        self.parts.push(part.key_value());
        self.canonical = canonical(&self.resource, &self.parts);
        self
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn parts(&self) -> &[Value] {
        &self.parts
    }

    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

fn canonical(resource: &str, parts: &[Value]) -> String {
    let mut all = Vec::with_capacity(parts.len() + 1);
    all.push(Value::String(resource.to_string()));
    all.extend(parts.iter().cloned());
    Value::Array(all).to_string()
}

impl PartialEq for QueryKey {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for QueryKey {}

impl Hash for QueryKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}
