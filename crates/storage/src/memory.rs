//! In-memory store
//!
//! Keeps all tables in process memory. Rows get generated ids and creation
//! timestamps on insert, foreign keys are checked, and alternatives of
//! alternatives are rejected. Serves as the substitutable counterpart of the
//! REST-backed storage in tests and local tooling.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use robur_domain as domain;
use uuid::Uuid;

/// Clones share the same tables.
#[derive(Default, Clone)]
pub struct Memory {
    tables: Arc<Mutex<Tables>>,
}

#[derive(Default)]
struct Tables {
    plans: BTreeMap<domain::PlanID, domain::Plan>,
    workout_days: BTreeMap<domain::WorkoutDayID, domain::WorkoutDay>,
    day_sections: BTreeMap<domain::DaySectionID, domain::DaySection>,
    section_exercises: BTreeMap<domain::SectionExerciseID, domain::SectionExercise>,
    exercises: BTreeMap<domain::ExerciseID, domain::Exercise>,
    equipment: BTreeMap<domain::EquipmentID, domain::Equipment>,
}

impl Memory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, domain::StorageError> {
        self.tables
            .lock()
            .map_err(|_| domain::StorageError::Other("table mutex poisoned".into()))
    }
}

impl domain::PlanRepository for Memory {
    async fn read_plans(&self) -> Result<Vec<domain::Plan>, domain::ReadError> {
        Ok(self.tables()?.plans.values().cloned().collect())
    }

    async fn read_plan(&self, id: domain::PlanID) -> Result<domain::Plan, domain::ReadError> {
        self.tables()?
            .plans
            .get(&id)
            .cloned()
            .ok_or(domain::ReadError::NotFound)
    }

    async fn create_plan(
        &self,
        name: domain::Name,
        goal: domain::PlanGoal,
        description: Option<String>,
    ) -> Result<domain::Plan, domain::CreateError> {
        let plan = domain::Plan {
            id: Uuid::new_v4().into(),
            name,
            goal,
            description,
            created_at: Utc::now(),
        };
        self.tables()?.plans.insert(plan.id, plan.clone());
        Ok(plan)
    }

    async fn modify_plan(
        &self,
        id: domain::PlanID,
        name: Option<domain::Name>,
        goal: Option<domain::PlanGoal>,
        description: Option<String>,
    ) -> Result<domain::Plan, domain::UpdateError> {
        let mut tables = self.tables()?;
        let plan = tables
            .plans
            .get_mut(&id)
            .ok_or(domain::UpdateError::NotFound)?;
        if let Some(name) = name {
            plan.name = name;
        }
        if let Some(goal) = goal {
            plan.goal = goal;
        }
        if let Some(description) = description {
            plan.description = Some(description);
        }
        Ok(plan.clone())
    }

    async fn delete_plan(&self, id: domain::PlanID) -> Result<domain::PlanID, domain::DeleteError> {
        self.tables()?
            .plans
            .remove(&id)
            .map(|_| id)
            .ok_or(domain::DeleteError::NotFound)
    }
}

impl domain::WorkoutDayRepository for Memory {
    async fn read_workout_days(
        &self,
        plan_id: domain::PlanID,
    ) -> Result<Vec<domain::WorkoutDay>, domain::ReadError> {
        Ok(self
            .tables()?
            .workout_days
            .values()
            .filter(|d| d.plan_id == plan_id)
            .cloned()
            .collect())
    }

    async fn read_workout_day(
        &self,
        id: domain::WorkoutDayID,
    ) -> Result<domain::WorkoutDay, domain::ReadError> {
        self.tables()?
            .workout_days
            .get(&id)
            .cloned()
            .ok_or(domain::ReadError::NotFound)
    }

    async fn create_workout_day(
        &self,
        plan_id: domain::PlanID,
        week_number: domain::WeekNumber,
        day_number: domain::DayNumber,
        name: domain::Name,
        duration_minutes: Option<u32>,
    ) -> Result<domain::WorkoutDay, domain::CreateError> {
        let mut tables = self.tables()?;
        if !tables.plans.contains_key(&plan_id) {
            return Err(domain::CreateError::NotFound);
        }
        let workout_day = domain::WorkoutDay {
            id: Uuid::new_v4().into(),
            plan_id,
            week_number,
            day_number,
            name,
            duration_minutes,
            created_at: Utc::now(),
        };
        tables.workout_days.insert(workout_day.id, workout_day.clone());
        Ok(workout_day)
    }

    async fn modify_workout_day(
        &self,
        id: domain::WorkoutDayID,
        week_number: Option<domain::WeekNumber>,
        day_number: Option<domain::DayNumber>,
        name: Option<domain::Name>,
        duration_minutes: Option<u32>,
    ) -> Result<domain::WorkoutDay, domain::UpdateError> {
        let mut tables = self.tables()?;
        let workout_day = tables
            .workout_days
            .get_mut(&id)
            .ok_or(domain::UpdateError::NotFound)?;
        if let Some(week_number) = week_number {
            workout_day.week_number = week_number;
        }
        if let Some(day_number) = day_number {
            workout_day.day_number = day_number;
        }
        if let Some(name) = name {
            workout_day.name = name;
        }
        if let Some(duration_minutes) = duration_minutes {
            workout_day.duration_minutes = Some(duration_minutes);
        }
        Ok(workout_day.clone())
    }

    async fn delete_workout_day(
        &self,
        id: domain::WorkoutDayID,
    ) -> Result<domain::WorkoutDayID, domain::DeleteError> {
        self.tables()?
            .workout_days
            .remove(&id)
            .map(|_| id)
            .ok_or(domain::DeleteError::NotFound)
    }
}

impl domain::DaySectionRepository for Memory {
    async fn read_day_sections(
        &self,
        workout_day_id: domain::WorkoutDayID,
    ) -> Result<Vec<domain::DaySection>, domain::ReadError> {
        Ok(self
            .tables()?
            .day_sections
            .values()
            .filter(|s| s.workout_day_id == workout_day_id)
            .cloned()
            .collect())
    }

    async fn create_day_section(
        &self,
        workout_day_id: domain::WorkoutDayID,
        section_type: domain::SectionType,
        section_order: domain::SectionOrder,
        rounds: domain::Rounds,
        rest_between_rounds_seconds: u32,
        description: Option<String>,
    ) -> Result<domain::DaySection, domain::CreateError> {
        let mut tables = self.tables()?;
        if !tables.workout_days.contains_key(&workout_day_id) {
            return Err(domain::CreateError::NotFound);
        }
        let day_section = domain::DaySection {
            id: Uuid::new_v4().into(),
            workout_day_id,
            section_type,
            section_order,
            rounds,
            rest_between_rounds_seconds,
            description,
            created_at: Utc::now(),
        };
        tables.day_sections.insert(day_section.id, day_section.clone());
        Ok(day_section)
    }

    async fn modify_day_section(
        &self,
        id: domain::DaySectionID,
        section_type: Option<domain::SectionType>,
        section_order: Option<domain::SectionOrder>,
        rounds: Option<domain::Rounds>,
        rest_between_rounds_seconds: Option<u32>,
        description: Option<String>,
    ) -> Result<domain::DaySection, domain::UpdateError> {
        let mut tables = self.tables()?;
        let day_section = tables
            .day_sections
            .get_mut(&id)
            .ok_or(domain::UpdateError::NotFound)?;
        if let Some(section_type) = section_type {
            day_section.section_type = section_type;
        }
        if let Some(section_order) = section_order {
            day_section.section_order = section_order;
        }
        if let Some(rounds) = rounds {
            day_section.rounds = rounds;
        }
        if let Some(rest) = rest_between_rounds_seconds {
            day_section.rest_between_rounds_seconds = rest;
        }
        if let Some(description) = description {
            day_section.description = Some(description);
        }
        Ok(day_section.clone())
    }

    async fn delete_day_section(
        &self,
        id: domain::DaySectionID,
    ) -> Result<domain::DaySectionID, domain::DeleteError> {
        self.tables()?
            .day_sections
            .remove(&id)
            .map(|_| id)
            .ok_or(domain::DeleteError::NotFound)
    }
}

impl domain::SectionExerciseRepository for Memory {
    async fn read_section_exercises(
        &self,
        day_section_id: domain::DaySectionID,
    ) -> Result<Vec<domain::SectionExerciseTree>, domain::ReadError> {
        let tables = self.tables()?;
        let mut trees = vec![];
        for primary in tables
            .section_exercises
            .values()
            .filter(|r| r.day_section_id == day_section_id && !r.is_alternative())
        {
            let mut alternatives = vec![];
            for row in tables
                .section_exercises
                .values()
                .filter(|r| r.parent_id == Some(primary.id))
            {
                alternatives.push(domain::AlternativeExercise {
                    alternative: row.clone(),
                    exercise: exercise(&tables, row.exercise_id)?,
                });
            }
            trees.push(domain::SectionExerciseTree {
                primary: primary.clone(),
                exercise: exercise(&tables, primary.exercise_id)?,
                equipment: match primary.equipment_id {
                    Some(id) => Some(equipment(&tables, id)?),
                    None => None,
                },
                alternatives,
            });
        }
        Ok(trees)
    }

    async fn read_section_exercise_rows(
        &self,
        day_section_id: domain::DaySectionID,
    ) -> Result<Vec<domain::SectionExercise>, domain::ReadError> {
        Ok(self
            .tables()?
            .section_exercises
            .values()
            .filter(|r| r.day_section_id == day_section_id)
            .cloned()
            .collect())
    }

    async fn read_section_exercise(
        &self,
        id: domain::SectionExerciseID,
    ) -> Result<domain::SectionExercise, domain::ReadError> {
        self.tables()?
            .section_exercises
            .get(&id)
            .cloned()
            .ok_or(domain::ReadError::NotFound)
    }

    async fn create_section_exercise(
        &self,
        new: domain::NewSectionExercise,
    ) -> Result<domain::SectionExercise, domain::CreateError> {
        let mut tables = self.tables()?;
        if !tables.day_sections.contains_key(&new.day_section_id)
            || !tables.exercises.contains_key(&new.exercise_id)
        {
            return Err(domain::CreateError::NotFound);
        }
        if let Some(equipment_id) = new.equipment_id {
            if !tables.equipment.contains_key(&equipment_id) {
                return Err(domain::CreateError::NotFound);
            }
        }
        if let Some(parent_id) = new.parent_id {
            let parent = tables
                .section_exercises
                .get(&parent_id)
                .ok_or(domain::CreateError::NotFound)?;
            if parent.is_alternative() {
                return Err(domain::CreateError::Validation(
                    domain::ValidationError::Other(
                        domain::SectionExerciseError::NestedAlternative.into(),
                    ),
                ));
            }
        }
        let row = domain::SectionExercise {
            id: Uuid::new_v4().into(),
            day_section_id: new.day_section_id,
            exercise_id: new.exercise_id,
            parent_id: new.parent_id,
            exercise_order: new.exercise_order,
            equipment_id: new.equipment_id,
            prescription: new.prescription,
            notes: new.notes,
            created_at: Utc::now(),
        };
        tables.section_exercises.insert(row.id, row.clone());
        Ok(row)
    }

    async fn modify_section_exercise(
        &self,
        id: domain::SectionExerciseID,
        exercise_id: Option<domain::ExerciseID>,
        exercise_order: Option<domain::ExerciseOrder>,
        equipment_id: Option<domain::EquipmentID>,
        prescription: Option<domain::Prescription>,
        notes: Option<String>,
    ) -> Result<domain::SectionExercise, domain::UpdateError> {
        let mut tables = self.tables()?;
        if let Some(exercise_id) = exercise_id {
            if !tables.exercises.contains_key(&exercise_id) {
                return Err(domain::UpdateError::NotFound);
            }
        }
        if let Some(equipment_id) = equipment_id {
            if !tables.equipment.contains_key(&equipment_id) {
                return Err(domain::UpdateError::NotFound);
            }
        }
        let row = tables
            .section_exercises
            .get_mut(&id)
            .ok_or(domain::UpdateError::NotFound)?;
        if let Some(exercise_id) = exercise_id {
            row.exercise_id = exercise_id;
        }
        if let Some(exercise_order) = exercise_order {
            row.exercise_order = exercise_order;
        }
        if let Some(equipment_id) = equipment_id {
            row.equipment_id = Some(equipment_id);
        }
        if let Some(prescription) = prescription {
            row.prescription = prescription;
        }
        if let Some(notes) = notes {
            row.notes = Some(notes);
        }
        Ok(row.clone())
    }

    async fn delete_section_exercise(
        &self,
        id: domain::SectionExerciseID,
    ) -> Result<domain::SectionExerciseID, domain::DeleteError> {
        self.tables()?
            .section_exercises
            .remove(&id)
            .map(|_| id)
            .ok_or(domain::DeleteError::NotFound)
    }
}

impl domain::ExerciseRepository for Memory {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        Ok(self.tables()?.exercises.values().cloned().collect())
    }

    async fn read_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::Exercise, domain::ReadError> {
        self.tables()?
            .exercises
            .get(&id)
            .cloned()
            .ok_or(domain::ReadError::NotFound)
    }

    async fn create_exercise(
        &self,
        name: domain::Name,
        description: Option<String>,
        video_url: Option<String>,
        thumbnail_url: Option<String>,
    ) -> Result<domain::Exercise, domain::CreateError> {
        let exercise = domain::Exercise {
            id: Uuid::new_v4().into(),
            name,
            description,
            video_url,
            thumbnail_url,
            created_at: Utc::now(),
        };
        self.tables()?.exercises.insert(exercise.id, exercise.clone());
        Ok(exercise)
    }

    async fn modify_exercise(
        &self,
        id: domain::ExerciseID,
        name: Option<domain::Name>,
        description: Option<String>,
        video_url: Option<String>,
        thumbnail_url: Option<String>,
    ) -> Result<domain::Exercise, domain::UpdateError> {
        let mut tables = self.tables()?;
        let exercise = tables
            .exercises
            .get_mut(&id)
            .ok_or(domain::UpdateError::NotFound)?;
        if let Some(name) = name {
            exercise.name = name;
        }
        if let Some(description) = description {
            exercise.description = Some(description);
        }
        if let Some(video_url) = video_url {
            exercise.video_url = Some(video_url);
        }
        if let Some(thumbnail_url) = thumbnail_url {
            exercise.thumbnail_url = Some(thumbnail_url);
        }
        Ok(exercise.clone())
    }

    async fn delete_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::ExerciseID, domain::DeleteError> {
        self.tables()?
            .exercises
            .remove(&id)
            .map(|_| id)
            .ok_or(domain::DeleteError::NotFound)
    }
}

impl domain::EquipmentRepository for Memory {
    async fn read_equipment(&self) -> Result<Vec<domain::Equipment>, domain::ReadError> {
        Ok(self.tables()?.equipment.values().cloned().collect())
    }

    async fn create_equipment(
        &self,
        name: domain::Name,
    ) -> Result<domain::Equipment, domain::CreateError> {
        let equipment = domain::Equipment {
            id: Uuid::new_v4().into(),
            name,
            created_at: Utc::now(),
        };
        self.tables()?.equipment.insert(equipment.id, equipment.clone());
        Ok(equipment)
    }

    async fn modify_equipment(
        &self,
        id: domain::EquipmentID,
        name: domain::Name,
    ) -> Result<domain::Equipment, domain::UpdateError> {
        let mut tables = self.tables()?;
        let equipment = tables
            .equipment
            .get_mut(&id)
            .ok_or(domain::UpdateError::NotFound)?;
        equipment.name = name;
        Ok(equipment.clone())
    }

    async fn delete_equipment(
        &self,
        id: domain::EquipmentID,
    ) -> Result<domain::EquipmentID, domain::DeleteError> {
        self.tables()?
            .equipment
            .remove(&id)
            .map(|_| id)
            .ok_or(domain::DeleteError::NotFound)
    }
}

fn exercise(
    tables: &Tables,
    id: domain::ExerciseID,
) -> Result<domain::Exercise, domain::ReadError> {
    tables
        .exercises
        .get(&id)
        .cloned()
        .ok_or_else(|| domain::ReadError::Other("referenced exercise missing from catalog".into()))
}

fn equipment(
    tables: &Tables,
    id: domain::EquipmentID,
) -> Result<domain::Equipment, domain::ReadError> {
    tables
        .equipment
        .get(&id)
        .cloned()
        .ok_or_else(|| domain::ReadError::Other("referenced equipment missing from catalog".into()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use robur_domain::{
        DaySectionRepository, ExerciseRepository, PlanRepository, SectionExerciseRepository,
        WorkoutDayRepository,
    };

    use crate::tests::data;

    use super::*;

    #[tokio::test]
    async fn test_create_workout_day_without_plan() {
        let memory = Memory::new();

        assert!(matches!(
            memory
                .create_workout_day(
                    domain::PlanID::nil(),
                    data::week(1),
                    data::day(1),
                    data::name("Day 1"),
                    None,
                )
                .await,
            Err(domain::CreateError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_create_section_exercise_without_section() {
        let memory = Memory::new();
        let exercise = memory
            .create_exercise(data::name("Push-up"), None, None, None)
            .await
            .unwrap();

        assert!(matches!(
            memory
                .create_section_exercise(data::new_section_exercise(
                    domain::DaySectionID::nil(),
                    exercise.id,
                    None,
                ))
                .await,
            Err(domain::CreateError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_create_section_exercise_nested_alternative() {
        let memory = Memory::new();
        let section = data::seed_section(&memory).await;
        let exercise = memory
            .create_exercise(data::name("Push-up"), None, None, None)
            .await
            .unwrap();
        let primary = memory
            .create_section_exercise(data::new_section_exercise(section.id, exercise.id, None))
            .await
            .unwrap();
        let alternative = memory
            .create_section_exercise(data::new_section_exercise(
                section.id,
                exercise.id,
                Some(primary.id),
            ))
            .await
            .unwrap();

        assert!(matches!(
            memory
                .create_section_exercise(data::new_section_exercise(
                    section.id,
                    exercise.id,
                    Some(alternative.id),
                ))
                .await,
            Err(domain::CreateError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_read_section_exercises_tree() {
        let memory = Memory::new();
        let section = data::seed_section(&memory).await;
        let push_up = memory
            .create_exercise(data::name("Push-up"), None, None, None)
            .await
            .unwrap();
        let knee_push_up = memory
            .create_exercise(data::name("Knee Push-up"), None, None, None)
            .await
            .unwrap();
        let primary = memory
            .create_section_exercise(data::new_section_exercise(section.id, push_up.id, None))
            .await
            .unwrap();
        memory
            .create_section_exercise(data::new_section_exercise(
                section.id,
                knee_push_up.id,
                Some(primary.id),
            ))
            .await
            .unwrap();

        let trees = memory.read_section_exercises(section.id).await.unwrap();

        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].primary, primary);
        assert_eq!(trees[0].exercise, push_up);
        assert_eq!(trees[0].equipment, None);
        assert_eq!(trees[0].alternatives.len(), 1);
        assert_eq!(trees[0].alternatives[0].exercise, knee_push_up);
        assert_eq!(trees[0].alternatives[0].alternative.parent_id, Some(primary.id));
    }

    #[tokio::test]
    async fn test_modify_plan_not_found() {
        let memory = Memory::new();

        assert!(matches!(
            memory
                .modify_plan(domain::PlanID::nil(), None, None, None)
                .await,
            Err(domain::UpdateError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_day_section_not_found() {
        let memory = Memory::new();

        assert!(matches!(
            memory.delete_day_section(domain::DaySectionID::nil()).await,
            Err(domain::DeleteError::NotFound)
        ));
    }
}
