// FICHIER : src-server/src/validators/types.rs

use super::{ConfigurationError, FieldValidator, FieldValue, JsonType, ValidationError};

/// Vérifie le type d'exécution d'une valeur contre un ensemble autorisé.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeValidator {
    types: Vec<JsonType>,
}

impl TypeValidator {
    pub fn new(t: JsonType) -> Self {
        Self { types: vec![t] }
    }

    /// Types multiples, dans l'ordre fourni (pas de dédoublonnage).
    pub fn with_types<I>(types: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = JsonType>,
    {
        let types: Vec<JsonType> = types.into_iter().collect();
        if types.is_empty() {
            return Err(ConfigurationError::NoTypes);
        }
        Ok(Self { types })
    }

    /// Construction depuis des noms de types (`"str"`, `"int"`, ...).
    /// Tout nom qui ne désigne pas un type est une erreur de configuration.
    pub fn from_names<I, S>(names: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let types = names
            .into_iter()
            .map(|n| {
                let n = n.as_ref();
                JsonType::from_name(n).ok_or_else(|| ConfigurationError::NotAType(n.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::with_types(types)
    }

    pub fn types(&self) -> &[JsonType] {
        &self.types
    }

    fn type_names(&self) -> String {
        self.types
            .iter()
            .map(JsonType::name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn must_be_of_type(&self, value: &FieldValue) -> Result<(), ValidationError> {
        if self.types.iter().any(|t| t.matches(value)) {
            return Ok(());
        }
        Err(ValidationError::with_value(
            format!("Value {} must be of type {}", value, self.type_names()),
            value,
        ))
    }
}

impl FieldValidator for TypeValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), ValidationError> {
        self.must_be_of_type(value)
    }
}

/// Applique le contrôle de type à chaque clé d'une table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeysTypeValidator(TypeValidator);

impl KeysTypeValidator {
    pub fn new(inner: TypeValidator) -> Self {
        Self(inner)
    }

    pub fn types(&self) -> &[JsonType] {
        self.0.types()
    }
}

impl FieldValidator for KeysTypeValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), ValidationError> {
        let entries = value
            .as_map()
            .ok_or_else(|| ValidationError::not_a_mapping(value))?;
        for (key, _) in entries {
            self.0.must_be_of_type(key)?;
        }
        Ok(())
    }
}

/// Applique le contrôle de type à chaque valeur d'une table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuesTypeValidator(TypeValidator);

impl ValuesTypeValidator {
    pub fn new(inner: TypeValidator) -> Self {
        Self(inner)
    }

    pub fn types(&self) -> &[JsonType] {
        self.0.types()
    }
}

impl FieldValidator for ValuesTypeValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), ValidationError> {
        let entries = value
            .as_map()
            .ok_or_else(|| ValidationError::not_a_mapping(value))?;
        for (_, v) in entries {
            self.0.must_be_of_type(v)?;
        }
        Ok(())
    }
}
