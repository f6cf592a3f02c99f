// FICHIER : src-server/src/validators/pipeline.rs

use super::{
    FieldValidator, FieldValue, JsonType, KeysTypeValidator, TypeValidator, ValidKeyValidator,
    ValidationError, ValuesTypeValidator, VALID_LANGUAGES,
};

/// Chaîne ordonnée de validateurs, composée dans la définition du champ et
/// invoquée explicitement par les chemins d'écriture et de lecture.
/// Fail-fast : le premier échec est retourné, les étapes suivantes ne
/// s'exécutent pas.
#[derive(Debug, Default)]
pub struct ValidationPipeline {
    stages: Vec<Box<dyn FieldValidator>>,
}

impl ValidationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then<V: FieldValidator + 'static>(mut self, validator: V) -> Self {
        self.stages.push(Box::new(validator));
        self
    }

    /// Chaîne du texte multilingue :
    /// table → clés `str` → valeurs `str` → clés dans `VALID_LANGUAGES`.
    pub fn language_text() -> Self {
        Self::new()
            .then(TypeValidator::new(JsonType::Dict))
            .then(KeysTypeValidator::new(TypeValidator::new(JsonType::Str)))
            .then(ValuesTypeValidator::new(TypeValidator::new(JsonType::Str)))
            .then(ValidKeyValidator::new(VALID_LANGUAGES))
    }

    pub fn run(&self, value: &FieldValue) -> Result<(), ValidationError> {
        for stage in &self.stages {
            stage.validate(value)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl FieldValidator for ValidationPipeline {
    fn validate(&self, value: &FieldValue) -> Result<(), ValidationError> {
        self.run(value)
    }
}
