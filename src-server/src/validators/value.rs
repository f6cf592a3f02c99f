// FICHIER : src-server/src/validators/value.rs

//! Valeurs typées à l'exécution sur lesquelles opèrent les validateurs.
//!
//! Le JSON n'autorise que des clés chaînes ; `FieldValue::Map` accepte des clés
//! quelconques pour que les appels programmatiques (CLI, tests, couches
//! internes) puissent soumettre `{123: "123"}` et obtenir l'erreur de type
//! attendue plutôt qu'une coercition silencieuse.

use super::ValidationError;
use serde_json::{Map, Number, Value};
use std::fmt;

/// Descripteurs de type acceptés par `TypeValidator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Dict,
    List,
    Str,
    Int,
    Float,
    Bool,
    Null,
}

impl JsonType {
    pub const ALL: [JsonType; 7] = [
        JsonType::Dict,
        JsonType::List,
        JsonType::Str,
        JsonType::Int,
        JsonType::Float,
        JsonType::Bool,
        JsonType::Null,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            JsonType::Dict => "dict",
            JsonType::List => "list",
            JsonType::Str => "str",
            JsonType::Int => "int",
            JsonType::Float => "float",
            JsonType::Bool => "bool",
            JsonType::Null => "NoneType",
        }
    }

    pub fn from_name(name: &str) -> Option<JsonType> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn matches(&self, value: &FieldValue) -> bool {
        value.json_type() == *self
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<FieldValue>),
    /// Paires ordonnées (ordre d'insertion conservé), clés de type libre.
    Map(Vec<(FieldValue, FieldValue)>),
}

impl FieldValue {
    pub fn empty_map() -> Self {
        FieldValue::Map(Vec::new())
    }

    pub fn str(s: impl Into<String>) -> Self {
        FieldValue::Str(s.into())
    }

    /// Construit une table à clés chaînes, pratique pour les appels Rust.
    pub fn map_of<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        FieldValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (FieldValue::Str(k.into()), v.into()))
                .collect(),
        )
    }

    pub fn json_type(&self) -> JsonType {
        match self {
            FieldValue::Null => JsonType::Null,
            FieldValue::Bool(_) => JsonType::Bool,
            FieldValue::Int(_) => JsonType::Int,
            FieldValue::Float(_) => JsonType::Float,
            FieldValue::Str(_) => JsonType::Str,
            FieldValue::List(_) => JsonType::List,
            FieldValue::Map(_) => JsonType::Dict,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(FieldValue, FieldValue)]> {
        match self {
            FieldValue::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Conversion stricte vers le JSON stocké. Échoue sur une clé non chaîne.
    pub fn to_json(&self) -> Result<Value, ValidationError> {
        Ok(match self {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Int(i) => Value::Number((*i).into()),
            FieldValue::Float(f) => match Number::from_f64(*f) {
                Some(n) => Value::Number(n),
                None => {
                    return Err(ValidationError::new(format!(
                        "Value {} is not a valid JSON number",
                        self
                    )))
                }
            },
            FieldValue::Str(s) => Value::String(s.clone()),
            FieldValue::List(items) => Value::Array(
                items
                    .iter()
                    .map(FieldValue::to_json)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            FieldValue::Map(entries) => {
                let mut obj = Map::new();
                for (k, v) in entries {
                    let FieldValue::Str(key) = k else {
                        return Err(ValidationError::new(format!(
                            "Value: {} must be of type str",
                            k
                        )));
                    };
                    obj.insert(key.clone(), v.to_json()?);
                }
                Value::Object(obj)
            }
        })
    }

    /// Conversion tolérante pour le contexte structuré des erreurs :
    /// les clés non chaînes sont rendues sous leur forme affichable.
    pub fn to_json_lossy(&self) -> Value {
        match self {
            FieldValue::Float(f) => Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(f.to_string())),
            FieldValue::List(items) => {
                Value::Array(items.iter().map(FieldValue::to_json_lossy).collect())
            }
            FieldValue::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_json_lossy()))
                    .collect(),
            ),
            other => other.to_json().unwrap_or(Value::Null),
        }
    }

    /// Représentation littérale (chaînes entre apostrophes), façon `repr`.
    pub fn repr(&self) -> String {
        match self {
            FieldValue::Null => "None".to_string(),
            FieldValue::Bool(true) => "True".to_string(),
            FieldValue::Bool(false) => "False".to_string(),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Float(f) => format!("{:?}", f),
            FieldValue::Str(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            FieldValue::List(items) => {
                let inner: Vec<String> = items.iter().map(FieldValue::repr).collect();
                format!("[{}]", inner.join(", "))
            }
            FieldValue::Map(entries) => {
                let inner: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k.repr(), v.repr()))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
        }
    }
}

/// Les chaînes s'affichent brutes, le reste sous forme littérale.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            other => f.write_str(&other.repr()),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Int(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => FieldValue::Str(s),
            Value::Array(items) => FieldValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(obj) => FieldValue::Map(
                obj.into_iter()
                    .map(|(k, v)| (FieldValue::Str(k), v.into()))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_type_names_round_trip() {
        for t in JsonType::ALL {
            assert_eq!(JsonType::from_name(t.name()), Some(t));
        }
        assert_eq!(JsonType::from_name("this is not a type"), None);
    }

    #[test]
    fn test_from_json_keeps_document_order_and_kinds() {
        let v: FieldValue = json!({"la": "Rorate", "n": 3, "f": 1.5, "l": [true, null]}).into();
        let entries = v.as_map().unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries
            .iter()
            .any(|(k, v)| k.as_str() == Some("n") && *v == FieldValue::Int(3)));
        assert!(entries
            .iter()
            .any(|(k, v)| k.as_str() == Some("f") && *v == FieldValue::Float(1.5)));
    }

    #[test]
    fn test_to_json_rejects_non_string_keys() {
        let v = FieldValue::Map(vec![(FieldValue::Int(123), FieldValue::str("123"))]);
        let err = v.to_json().unwrap_err();
        assert!(err.message.contains("must be of type str"));
        assert_eq!(v.to_json_lossy(), json!({"123": "123"}));
    }

    #[test]
    fn test_display_and_repr() {
        assert_eq!(FieldValue::str("not a map").to_string(), "not a map");
        assert_eq!(FieldValue::Int(5).to_string(), "5");
        assert_eq!(
            FieldValue::List(vec![FieldValue::str("a"), FieldValue::Int(1)]).to_string(),
            "['a', 1]"
        );
        assert_eq!(
            FieldValue::map_of([("5", FieldValue::Int(5))]).to_string(),
            "{'5': 5}"
        );
        assert_eq!(FieldValue::Null.to_string(), "None");
        assert_eq!(FieldValue::Float(2.0).to_string(), "2.0");
    }
}
