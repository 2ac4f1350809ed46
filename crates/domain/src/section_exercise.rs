use chrono::{DateTime, Utc};
use derive_more::{Deref, Display, Into};
use uuid::Uuid;

use crate::{
    CreateError, DaySectionID, DeleteError, Equipment, EquipmentID, Exercise, ExerciseID,
    ReadError, UpdateError,
};

#[allow(async_fn_in_trait)]
pub trait SectionExerciseService {
    async fn get_section_exercises(
        &self,
        day_section_id: DaySectionID,
    ) -> Result<Vec<SectionExerciseTree>, ReadError>;
    /// Creates the primary exercise and its alternatives as one operation.
    /// The primary is persisted first, the alternatives reference its
    /// generated id.
    async fn create_section_exercise(
        &self,
        day_section_id: DaySectionID,
        exercise_id: ExerciseID,
        exercise_order: ExerciseOrder,
        equipment_id: Option<EquipmentID>,
        prescription: Prescription,
        notes: Option<String>,
        alternatives: Vec<AlternativeSpec>,
    ) -> Result<CreatedSectionExercise, CreateError>;
    /// Attaches a further alternative to an existing primary. The parent must
    /// not be an alternative itself.
    async fn create_alternative(
        &self,
        parent_id: SectionExerciseID,
        alternative: AlternativeSpec,
    ) -> Result<SectionExercise, CreateError>;
    async fn modify_section_exercise(
        &self,
        id: SectionExerciseID,
        exercise_id: Option<ExerciseID>,
        exercise_order: Option<ExerciseOrder>,
        equipment_id: Option<EquipmentID>,
        prescription: Option<Prescription>,
        notes: Option<String>,
    ) -> Result<SectionExercise, UpdateError>;
    /// Removes exactly the addressed row. Alternatives of a deleted primary
    /// are left in place and disappear from the section tree.
    async fn delete_section_exercise(
        &self,
        id: SectionExerciseID,
    ) -> Result<SectionExerciseID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait SectionExerciseRepository {
    /// Top-level rows of the section, each with its alternatives and the
    /// joined exercise and equipment records.
    async fn read_section_exercises(
        &self,
        day_section_id: DaySectionID,
    ) -> Result<Vec<SectionExerciseTree>, ReadError>;
    /// All rows of the section, alternatives and orphans included.
    async fn read_section_exercise_rows(
        &self,
        day_section_id: DaySectionID,
    ) -> Result<Vec<SectionExercise>, ReadError>;
    async fn read_section_exercise(
        &self,
        id: SectionExerciseID,
    ) -> Result<SectionExercise, ReadError>;
    async fn create_section_exercise(
        &self,
        new: NewSectionExercise,
    ) -> Result<SectionExercise, CreateError>;
    async fn modify_section_exercise(
        &self,
        id: SectionExerciseID,
        exercise_id: Option<ExerciseID>,
        exercise_order: Option<ExerciseOrder>,
        equipment_id: Option<EquipmentID>,
        prescription: Option<Prescription>,
        notes: Option<String>,
    ) -> Result<SectionExercise, UpdateError>;
    async fn delete_section_exercise(
        &self,
        id: SectionExerciseID,
    ) -> Result<SectionExerciseID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionExercise {
    pub id: SectionExerciseID,
    pub day_section_id: DaySectionID,
    pub exercise_id: ExerciseID,
    pub parent_id: Option<SectionExerciseID>,
    pub exercise_order: ExerciseOrder,
    pub equipment_id: Option<EquipmentID>,
    pub prescription: Prescription,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SectionExercise {
    #[must_use]
    pub fn is_alternative(&self) -> bool {
        self.parent_id.is_some()
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SectionExerciseID(Uuid);

impl SectionExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for SectionExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SectionExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Prescribed dose of an exercise. All fields are optional, a prescription
/// may be rep-based, time-based or both.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Prescription {
    pub sets: Option<Sets>,
    pub reps: Option<String>,
    pub duration_seconds: Option<u32>,
    pub rest_seconds: Option<u32>,
}

#[derive(Deref, Display, Into, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sets(u32);

impl Sets {
    pub fn new(value: u32) -> Result<Self, SetsError> {
        if value < 1 {
            return Err(SetsError::OutOfRange);
        }
        Ok(Self(value))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetsError {
    #[error("Sets must be 1 or greater")]
    OutOfRange,
}

#[derive(Deref, Display, Into, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseOrder(u32);

impl ExerciseOrder {
    pub fn new(value: u32) -> Result<Self, ExerciseOrderError> {
        if value < 1 {
            return Err(ExerciseOrderError::OutOfRange);
        }
        Ok(Self(value))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExerciseOrderError {
    #[error("Exercise order must be 1 or greater")]
    OutOfRange,
}

/// Substitute submitted together with a primary exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternativeSpec {
    pub exercise_id: ExerciseID,
    pub prescription: Prescription,
    pub notes: Option<String>,
}

/// Row to be inserted by a repository. `parent_id` is set for alternatives
/// only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSectionExercise {
    pub day_section_id: DaySectionID,
    pub exercise_id: ExerciseID,
    pub parent_id: Option<SectionExerciseID>,
    pub exercise_order: ExerciseOrder,
    pub equipment_id: Option<EquipmentID>,
    pub prescription: Prescription,
    pub notes: Option<String>,
}

/// One-level eager-loaded read model: a top-level exercise with its
/// alternatives and the referenced catalog records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionExerciseTree {
    pub primary: SectionExercise,
    pub exercise: Exercise,
    pub equipment: Option<Equipment>,
    pub alternatives: Vec<AlternativeExercise>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternativeExercise {
    pub alternative: SectionExercise,
    pub exercise: Exercise,
}

/// Result of creating a primary together with its alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSectionExercise {
    pub primary: SectionExercise,
    pub alternatives: Vec<SectionExercise>,
}

impl CreatedSectionExercise {
    #[must_use]
    pub fn row_count(&self) -> usize {
        1 + self.alternatives.len()
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SectionExerciseError {
    #[error("An alternative exercise cannot have alternatives of its own")]
    NestedAlternative,
    #[error("Creation failed and {remaining} persisted rows could not be removed")]
    PartialCreate { remaining: usize },
}
