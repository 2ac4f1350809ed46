use std::slice::Iter;

use chrono::{DateTime, Utc};
use derive_more::{Deref, Display, Into};
use uuid::Uuid;

use crate::{CreateError, DeleteError, ReadError, UpdateError, WorkoutDayID};

#[allow(async_fn_in_trait)]
pub trait DaySectionService {
    async fn get_day_sections(
        &self,
        workout_day_id: WorkoutDayID,
    ) -> Result<Vec<DaySection>, ReadError>;
    async fn create_day_section(
        &self,
        workout_day_id: WorkoutDayID,
        section_type: SectionType,
        section_order: SectionOrder,
        rounds: Rounds,
        rest_between_rounds_seconds: u32,
        description: Option<String>,
    ) -> Result<DaySection, CreateError>;
    async fn modify_day_section(
        &self,
        id: DaySectionID,
        section_type: Option<SectionType>,
        section_order: Option<SectionOrder>,
        rounds: Option<Rounds>,
        rest_between_rounds_seconds: Option<u32>,
        description: Option<String>,
    ) -> Result<DaySection, UpdateError>;
    async fn delete_day_section(&self, id: DaySectionID) -> Result<DaySectionID, DeleteError>;

    /// Order for a section appended via the form: one past the last existing
    /// section of the day.
    async fn next_section_order(
        &self,
        workout_day_id: WorkoutDayID,
    ) -> Result<SectionOrder, ReadError> {
        Ok(next_section_order(
            &self.get_day_sections(workout_day_id).await?,
        ))
    }
}

#[allow(async_fn_in_trait)]
pub trait DaySectionRepository {
    async fn read_day_sections(
        &self,
        workout_day_id: WorkoutDayID,
    ) -> Result<Vec<DaySection>, ReadError>;
    async fn create_day_section(
        &self,
        workout_day_id: WorkoutDayID,
        section_type: SectionType,
        section_order: SectionOrder,
        rounds: Rounds,
        rest_between_rounds_seconds: u32,
        description: Option<String>,
    ) -> Result<DaySection, CreateError>;
    async fn modify_day_section(
        &self,
        id: DaySectionID,
        section_type: Option<SectionType>,
        section_order: Option<SectionOrder>,
        rounds: Option<Rounds>,
        rest_between_rounds_seconds: Option<u32>,
        description: Option<String>,
    ) -> Result<DaySection, UpdateError>;
    async fn delete_day_section(&self, id: DaySectionID) -> Result<DaySectionID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySection {
    pub id: DaySectionID,
    pub workout_day_id: WorkoutDayID,
    pub section_type: SectionType,
    pub section_order: SectionOrder,
    pub rounds: Rounds,
    pub rest_between_rounds_seconds: u32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DaySectionID(Uuid);

impl DaySectionID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for DaySectionID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for DaySectionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum SectionType {
    #[display("Warm-up")]
    WarmUp,
    #[display("Main Workout")]
    MainWorkout,
    #[display("Recovery")]
    Recovery,
    #[display("Cooldown")]
    Cooldown,
}

impl SectionType {
    pub fn iter() -> Iter<'static, SectionType> {
        static SECTION_TYPES: [SectionType; 4] = [
            SectionType::WarmUp,
            SectionType::MainWorkout,
            SectionType::Recovery,
            SectionType::Cooldown,
        ];
        SECTION_TYPES.iter()
    }
}

impl TryFrom<&str> for SectionType {
    type Error = SectionTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Warm-up" => Ok(SectionType::WarmUp),
            "Main Workout" => Ok(SectionType::MainWorkout),
            "Recovery" => Ok(SectionType::Recovery),
            "Cooldown" => Ok(SectionType::Cooldown),
            _ => Err(SectionTypeError::Unknown(value.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SectionTypeError {
    #[error("Unknown section type: {0}")]
    Unknown(String),
}

#[derive(Deref, Display, Into, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SectionOrder(u32);

impl SectionOrder {
    pub fn new(value: u32) -> Result<Self, SectionOrderError> {
        if value < 1 {
            return Err(SectionOrderError::OutOfRange);
        }
        Ok(Self(value))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SectionOrderError {
    #[error("Section order must be 1 or greater")]
    OutOfRange,
}

#[derive(Deref, Display, Into, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rounds(u32);

impl Rounds {
    pub fn new(value: u32) -> Result<Self, RoundsError> {
        if value < 1 {
            return Err(RoundsError::OutOfRange);
        }
        Ok(Self(value))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RoundsError {
    #[error("Rounds must be 1 or greater")]
    OutOfRange,
}

/// New sections append at the end. The order stays editable afterwards, so
/// contiguity is not guaranteed.
#[must_use]
pub fn next_section_order(sections: &[DaySection]) -> SectionOrder {
    SectionOrder(
        sections
            .iter()
            .map(|s| *s.section_order)
            .max()
            .unwrap_or(0)
            + 1,
    )
}
