use std::slice::Iter;

use chrono::{DateTime, Utc};
use derive_more::{Deref, Display};
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait PlanService {
    async fn get_plans(&self) -> Result<Vec<Plan>, ReadError>;
    async fn get_plan(&self, id: PlanID) -> Result<Plan, ReadError>;
    async fn create_plan(
        &self,
        name: Name,
        goal: PlanGoal,
        description: Option<String>,
    ) -> Result<Plan, CreateError>;
    async fn modify_plan(
        &self,
        id: PlanID,
        name: Option<Name>,
        goal: Option<PlanGoal>,
        description: Option<String>,
    ) -> Result<Plan, UpdateError>;
    async fn delete_plan(&self, id: PlanID) -> Result<PlanID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait PlanRepository {
    async fn read_plans(&self) -> Result<Vec<Plan>, ReadError>;
    async fn read_plan(&self, id: PlanID) -> Result<Plan, ReadError>;
    async fn create_plan(
        &self,
        name: Name,
        goal: PlanGoal,
        description: Option<String>,
    ) -> Result<Plan, CreateError>;
    async fn modify_plan(
        &self,
        id: PlanID,
        name: Option<Name>,
        goal: Option<PlanGoal>,
        description: Option<String>,
    ) -> Result<Plan, UpdateError>;
    async fn delete_plan(&self, id: PlanID) -> Result<PlanID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub id: PlanID,
    pub name: Name,
    pub goal: PlanGoal,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlanID(Uuid);

impl PlanID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for PlanID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for PlanID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Combination of difficulty category and training focus.
///
/// A beginner plan is always a general plan. The pairing can only be
/// constructed through `new`, so an invalid combination cannot be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanGoal {
    category: PlanCategory,
    focus: PlanFocus,
}

impl PlanGoal {
    pub fn new(category: PlanCategory, focus: PlanFocus) -> Result<Self, PlanGoalError> {
        if category == PlanCategory::Beginner && focus != PlanFocus::General {
            return Err(PlanGoalError::BeginnerFocus(focus));
        }

        Ok(Self { category, focus })
    }

    #[must_use]
    pub fn category(self) -> PlanCategory {
        self.category
    }

    #[must_use]
    pub fn focus(self) -> PlanFocus {
        self.focus
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PlanGoalError {
    #[error("A beginner plan must have the general focus (got {0})")]
    BeginnerFocus(PlanFocus),
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum PlanCategory {
    #[display("Beginner")]
    Beginner,
    #[display("Intermediate")]
    Intermediate,
    #[display("Advanced")]
    Advanced,
}

impl PlanCategory {
    pub fn iter() -> Iter<'static, PlanCategory> {
        static CATEGORIES: [PlanCategory; 3] = [
            PlanCategory::Beginner,
            PlanCategory::Intermediate,
            PlanCategory::Advanced,
        ];
        CATEGORIES.iter()
    }
}

impl TryFrom<&str> for PlanCategory {
    type Error = PlanCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Beginner" => Ok(PlanCategory::Beginner),
            "Intermediate" => Ok(PlanCategory::Intermediate),
            "Advanced" => Ok(PlanCategory::Advanced),
            _ => Err(PlanCategoryError::Unknown(value.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PlanCategoryError {
    #[error("Unknown plan category: {0}")]
    Unknown(String),
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum PlanFocus {
    #[display("General")]
    General,
    #[display("Fat Burning")]
    FatBurning,
    #[display("Muscle Building")]
    MuscleBuilding,
    #[display("Combo Plan")]
    ComboPlan,
}

impl PlanFocus {
    pub fn iter() -> Iter<'static, PlanFocus> {
        static FOCUSES: [PlanFocus; 4] = [
            PlanFocus::General,
            PlanFocus::FatBurning,
            PlanFocus::MuscleBuilding,
            PlanFocus::ComboPlan,
        ];
        FOCUSES.iter()
    }
}

impl TryFrom<&str> for PlanFocus {
    type Error = PlanFocusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "General" => Ok(PlanFocus::General),
            "Fat Burning" => Ok(PlanFocus::FatBurning),
            "Muscle Building" => Ok(PlanFocus::MuscleBuilding),
            "Combo Plan" => Ok(PlanFocus::ComboPlan),
            _ => Err(PlanFocusError::Unknown(value.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PlanFocusError {
    #[error("Unknown plan focus: {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(PlanCategory::Beginner, PlanFocus::General, true)]
    #[case(PlanCategory::Beginner, PlanFocus::FatBurning, false)]
    #[case(PlanCategory::Beginner, PlanFocus::MuscleBuilding, false)]
    #[case(PlanCategory::Beginner, PlanFocus::ComboPlan, false)]
    #[case(PlanCategory::Intermediate, PlanFocus::General, true)]
    #[case(PlanCategory::Intermediate, PlanFocus::ComboPlan, true)]
    #[case(PlanCategory::Advanced, PlanFocus::MuscleBuilding, true)]
    fn test_plan_goal_new(
        #[case] category: PlanCategory,
        #[case] focus: PlanFocus,
        #[case] valid: bool,
    ) {
        let result = PlanGoal::new(category, focus);
        if valid {
            let goal = result.unwrap();
            assert_eq!(goal.category(), category);
            assert_eq!(goal.focus(), focus);
        } else {
            assert_eq!(result, Err(PlanGoalError::BeginnerFocus(focus)));
        }
    }

    #[rstest]
    #[case(PlanCategory::Beginner, "Beginner")]
    #[case(PlanCategory::Intermediate, "Intermediate")]
    #[case(PlanCategory::Advanced, "Advanced")]
    fn test_plan_category_display(#[case] category: PlanCategory, #[case] string: &str) {
        assert_eq!(category.to_string(), string);
        assert_eq!(PlanCategory::try_from(string), Ok(category));
    }

    #[rstest]
    #[case(PlanFocus::General, "General")]
    #[case(PlanFocus::FatBurning, "Fat Burning")]
    #[case(PlanFocus::MuscleBuilding, "Muscle Building")]
    #[case(PlanFocus::ComboPlan, "Combo Plan")]
    fn test_plan_focus_display(#[case] focus: PlanFocus, #[case] string: &str) {
        assert_eq!(focus.to_string(), string);
        assert_eq!(PlanFocus::try_from(string), Ok(focus));
    }

    #[test]
    fn test_plan_category_unknown() {
        assert_eq!(
            PlanCategory::try_from("Expert"),
            Err(PlanCategoryError::Unknown("Expert".to_string()))
        );
    }

    #[test]
    fn test_plan_focus_unknown() {
        assert_eq!(
            PlanFocus::try_from("Cardio"),
            Err(PlanFocusError::Unknown("Cardio".to_string()))
        );
    }

    #[test]
    fn test_plan_id_nil() {
        assert!(PlanID::nil().is_nil());
        assert_eq!(PlanID::nil(), PlanID::default());
    }
}
