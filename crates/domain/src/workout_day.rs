use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use derive_more::{Deref, Display, Into};
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, PlanID, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait WorkoutDayService {
    async fn get_workout_days(&self, plan_id: PlanID) -> Result<Vec<WorkoutDay>, ReadError>;
    async fn get_workout_day(&self, id: WorkoutDayID) -> Result<WorkoutDay, ReadError>;
    async fn create_workout_day(
        &self,
        plan_id: PlanID,
        week_number: WeekNumber,
        day_number: DayNumber,
        name: Name,
        duration_minutes: Option<u32>,
    ) -> Result<WorkoutDay, CreateError>;
    async fn modify_workout_day(
        &self,
        id: WorkoutDayID,
        week_number: Option<WeekNumber>,
        day_number: Option<DayNumber>,
        name: Option<Name>,
        duration_minutes: Option<u32>,
    ) -> Result<WorkoutDay, UpdateError>;
    async fn delete_workout_day(&self, id: WorkoutDayID) -> Result<WorkoutDayID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutDayRepository {
    async fn read_workout_days(&self, plan_id: PlanID) -> Result<Vec<WorkoutDay>, ReadError>;
    async fn read_workout_day(&self, id: WorkoutDayID) -> Result<WorkoutDay, ReadError>;
    async fn create_workout_day(
        &self,
        plan_id: PlanID,
        week_number: WeekNumber,
        day_number: DayNumber,
        name: Name,
        duration_minutes: Option<u32>,
    ) -> Result<WorkoutDay, CreateError>;
    async fn modify_workout_day(
        &self,
        id: WorkoutDayID,
        week_number: Option<WeekNumber>,
        day_number: Option<DayNumber>,
        name: Option<Name>,
        duration_minutes: Option<u32>,
    ) -> Result<WorkoutDay, UpdateError>;
    async fn delete_workout_day(&self, id: WorkoutDayID) -> Result<WorkoutDayID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutDay {
    pub id: WorkoutDayID,
    pub plan_id: PlanID,
    pub week_number: WeekNumber,
    pub day_number: DayNumber,
    pub name: Name,
    pub duration_minutes: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl WorkoutDay {
    /// Addressing key of the day within its plan.
    #[must_use]
    pub fn position(&self) -> (WeekNumber, DayNumber) {
        (self.week_number, self.day_number)
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutDayID(Uuid);

impl WorkoutDayID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutDayID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutDayID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Deref, Display, Into, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WeekNumber(u32);

impl WeekNumber {
    pub fn new(value: u32) -> Result<Self, WeekNumberError> {
        if value < 1 {
            return Err(WeekNumberError::OutOfRange);
        }
        Ok(Self(value))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeekNumberError {
    #[error("Week number must be 1 or greater")]
    OutOfRange,
}

#[derive(Deref, Display, Into, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DayNumber(u32);

impl DayNumber {
    pub fn new(value: u32) -> Result<Self, DayNumberError> {
        if value < 1 {
            return Err(DayNumberError::OutOfRange);
        }
        Ok(Self(value))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DayNumberError {
    #[error("Day number must be 1 or greater")]
    OutOfRange,
}

/// Derived view of a plan's days keyed by week, days within a week ordered by
/// day number. Not persisted state.
#[must_use]
pub fn group_by_week(days: &[WorkoutDay]) -> BTreeMap<WeekNumber, Vec<WorkoutDay>> {
    let mut result: BTreeMap<WeekNumber, Vec<WorkoutDay>> = BTreeMap::new();
    for day in days {
        result.entry(day.week_number).or_default().push(day.clone());
    }
    for days in result.values_mut() {
        days.sort_by_key(|d| d.day_number);
    }
    result
}
