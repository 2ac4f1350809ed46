use std::collections::BTreeMap;

use log::{debug, error};

use crate::{
    AlternativeSpec, CreateError, CreatedSectionExercise, DayNumber, DaySection, DaySectionID,
    DaySectionRepository, DaySectionService, DeleteError, DuplicationError, DuplicationService,
    Equipment, EquipmentID, EquipmentRepository, EquipmentService, Exercise, ExerciseID,
    ExerciseOrder, ExerciseRepository, ExerciseService, Name, NewSectionExercise, Plan, PlanGoal,
    PlanID, PlanRepository, PlanService, Prescription, ReadError, Rounds, SectionExercise,
    SectionExerciseError, SectionExerciseID, SectionExerciseRepository, SectionExerciseService,
    SectionExerciseTree, SectionOrder, SectionType, UpdateError, ValidationError, WeekDuplication,
    WeekNumber, WorkoutDay, WorkoutDayID, WorkoutDayRepository, WorkoutDayService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R> PlanService for Service<R>
where
    R: PlanRepository + WorkoutDayRepository + DaySectionRepository + SectionExerciseRepository,
{
    async fn get_plans(&self) -> Result<Vec<Plan>, ReadError> {
        let mut plans = log_on_error!(self.repository.read_plans(), ReadError, "get", "plans")?;
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(plans)
    }

    async fn get_plan(&self, id: PlanID) -> Result<Plan, ReadError> {
        log_on_error!(self.repository.read_plan(id), ReadError, "get", "plan")
    }

    async fn create_plan(
        &self,
        name: Name,
        goal: PlanGoal,
        description: Option<String>,
    ) -> Result<Plan, CreateError> {
        log_on_error!(
            self.repository.create_plan(name, goal, description),
            CreateError,
            "create",
            "plan"
        )
    }

    async fn modify_plan(
        &self,
        id: PlanID,
        name: Option<Name>,
        goal: Option<PlanGoal>,
        description: Option<String>,
    ) -> Result<Plan, UpdateError> {
        log_on_error!(
            self.repository.modify_plan(id, name, goal, description),
            UpdateError,
            "modify",
            "plan"
        )
    }

    async fn delete_plan(&self, id: PlanID) -> Result<PlanID, DeleteError> {
        // The backend is not assumed to cascade, children go first.
        for day in self.repository.read_workout_days(id).await? {
            self.delete_day_tree(day.id).await?;
        }
        log_on_error!(self.repository.delete_plan(id), DeleteError, "delete", "plan")
    }
}

impl<R> WorkoutDayService for Service<R>
where
    R: WorkoutDayRepository + DaySectionRepository + SectionExerciseRepository,
{
    async fn get_workout_days(&self, plan_id: PlanID) -> Result<Vec<WorkoutDay>, ReadError> {
        let mut days = log_on_error!(
            self.repository.read_workout_days(plan_id),
            ReadError,
            "get",
            "workout days"
        )?;
        // The week tabs and day cards rely on this order.
        days.sort_by_key(WorkoutDay::position);
        Ok(days)
    }

    async fn get_workout_day(&self, id: WorkoutDayID) -> Result<WorkoutDay, ReadError> {
        log_on_error!(
            self.repository.read_workout_day(id),
            ReadError,
            "get",
            "workout day"
        )
    }

    async fn create_workout_day(
        &self,
        plan_id: PlanID,
        week_number: WeekNumber,
        day_number: DayNumber,
        name: Name,
        duration_minutes: Option<u32>,
    ) -> Result<WorkoutDay, CreateError> {
        log_on_error!(
            self.repository
                .create_workout_day(plan_id, week_number, day_number, name, duration_minutes),
            CreateError,
            "create",
            "workout day"
        )
    }

    async fn modify_workout_day(
        &self,
        id: WorkoutDayID,
        week_number: Option<WeekNumber>,
        day_number: Option<DayNumber>,
        name: Option<Name>,
        duration_minutes: Option<u32>,
    ) -> Result<WorkoutDay, UpdateError> {
        log_on_error!(
            self.repository
                .modify_workout_day(id, week_number, day_number, name, duration_minutes),
            UpdateError,
            "modify",
            "workout day"
        )
    }

    async fn delete_workout_day(&self, id: WorkoutDayID) -> Result<WorkoutDayID, DeleteError> {
        self.delete_day_tree(id).await
    }
}

impl<R> DaySectionService for Service<R>
where
    R: DaySectionRepository + SectionExerciseRepository,
{
    async fn get_day_sections(
        &self,
        workout_day_id: WorkoutDayID,
    ) -> Result<Vec<DaySection>, ReadError> {
        let mut sections = log_on_error!(
            self.repository.read_day_sections(workout_day_id),
            ReadError,
            "get",
            "day sections"
        )?;
        sections.sort_by_key(|s| s.section_order);
        Ok(sections)
    }

    async fn create_day_section(
        &self,
        workout_day_id: WorkoutDayID,
        section_type: SectionType,
        section_order: SectionOrder,
        rounds: Rounds,
        rest_between_rounds_seconds: u32,
        description: Option<String>,
    ) -> Result<DaySection, CreateError> {
        log_on_error!(
            self.repository.create_day_section(
                workout_day_id,
                section_type,
                section_order,
                rounds,
                rest_between_rounds_seconds,
                description
            ),
            CreateError,
            "create",
            "day section"
        )
    }

    async fn modify_day_section(
        &self,
        id: DaySectionID,
        section_type: Option<SectionType>,
        section_order: Option<SectionOrder>,
        rounds: Option<Rounds>,
        rest_between_rounds_seconds: Option<u32>,
        description: Option<String>,
    ) -> Result<DaySection, UpdateError> {
        log_on_error!(
            self.repository.modify_day_section(
                id,
                section_type,
                section_order,
                rounds,
                rest_between_rounds_seconds,
                description
            ),
            UpdateError,
            "modify",
            "day section"
        )
    }

    async fn delete_day_section(&self, id: DaySectionID) -> Result<DaySectionID, DeleteError> {
        self.delete_section_tree(id).await
    }
}

impl<R> SectionExerciseService for Service<R>
where
    R: SectionExerciseRepository,
{
    async fn get_section_exercises(
        &self,
        day_section_id: DaySectionID,
    ) -> Result<Vec<SectionExerciseTree>, ReadError> {
        let mut trees = log_on_error!(
            self.repository.read_section_exercises(day_section_id),
            ReadError,
            "get",
            "section exercises"
        )?;
        trees.sort_by_key(|t| t.primary.exercise_order);
        Ok(trees)
    }

    async fn create_section_exercise(
        &self,
        day_section_id: DaySectionID,
        exercise_id: ExerciseID,
        exercise_order: ExerciseOrder,
        equipment_id: Option<EquipmentID>,
        prescription: Prescription,
        notes: Option<String>,
        alternatives: Vec<AlternativeSpec>,
    ) -> Result<CreatedSectionExercise, CreateError> {
        // The alternatives need the generated id, the primary goes first. If
        // the primary fails, no alternative is attempted.
        let primary = log_on_error!(
            self.repository.create_section_exercise(NewSectionExercise {
                day_section_id,
                exercise_id,
                parent_id: None,
                exercise_order,
                equipment_id,
                prescription,
                notes,
            }),
            CreateError,
            "create",
            "section exercise"
        )?;

        let mut created = Vec::with_capacity(alternatives.len());
        for alternative in alternatives {
            match self
                .repository
                .create_section_exercise(new_alternative(&primary, alternative))
                .await
            {
                Ok(row) => created.push(row),
                Err(err) => {
                    error!("failed to create alternative exercise: {err}");
                    return Err(self.undo_create(&primary, &created, err).await);
                }
            }
        }

        Ok(CreatedSectionExercise {
            primary,
            alternatives: created,
        })
    }

    async fn create_alternative(
        &self,
        parent_id: SectionExerciseID,
        alternative: AlternativeSpec,
    ) -> Result<SectionExercise, CreateError> {
        let parent = self.repository.read_section_exercise(parent_id).await?;
        if parent.is_alternative() {
            return Err(CreateError::Validation(ValidationError::Other(
                SectionExerciseError::NestedAlternative.into(),
            )));
        }
        log_on_error!(
            self.repository
                .create_section_exercise(new_alternative(&parent, alternative)),
            CreateError,
            "create",
            "alternative exercise"
        )
    }

    async fn modify_section_exercise(
        &self,
        id: SectionExerciseID,
        exercise_id: Option<ExerciseID>,
        exercise_order: Option<ExerciseOrder>,
        equipment_id: Option<EquipmentID>,
        prescription: Option<Prescription>,
        notes: Option<String>,
    ) -> Result<SectionExercise, UpdateError> {
        log_on_error!(
            self.repository.modify_section_exercise(
                id,
                exercise_id,
                exercise_order,
                equipment_id,
                prescription,
                notes
            ),
            UpdateError,
            "modify",
            "section exercise"
        )
    }

    async fn delete_section_exercise(
        &self,
        id: SectionExerciseID,
    ) -> Result<SectionExerciseID, DeleteError> {
        log_on_error!(
            self.repository.delete_section_exercise(id),
            DeleteError,
            "delete",
            "section exercise"
        )
    }
}

impl<R> ExerciseService for Service<R>
where
    R: ExerciseRepository,
{
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(self.repository.read_exercises(), ReadError, "get", "exercises")
    }

    async fn get_exercise(&self, id: ExerciseID) -> Result<Exercise, ReadError> {
        log_on_error!(self.repository.read_exercise(id), ReadError, "get", "exercise")
    }

    async fn create_exercise(
        &self,
        name: Name,
        description: Option<String>,
        video_url: Option<String>,
        thumbnail_url: Option<String>,
    ) -> Result<Exercise, CreateError> {
        log_on_error!(
            self.repository
                .create_exercise(name, description, video_url, thumbnail_url),
            CreateError,
            "create",
            "exercise"
        )
    }

    async fn modify_exercise(
        &self,
        id: ExerciseID,
        name: Option<Name>,
        description: Option<String>,
        video_url: Option<String>,
        thumbnail_url: Option<String>,
    ) -> Result<Exercise, UpdateError> {
        log_on_error!(
            self.repository
                .modify_exercise(id, name, description, video_url, thumbnail_url),
            UpdateError,
            "modify",
            "exercise"
        )
    }

    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError> {
        log_on_error!(
            self.repository.delete_exercise(id),
            DeleteError,
            "delete",
            "exercise"
        )
    }
}

impl<R> EquipmentService for Service<R>
where
    R: EquipmentRepository,
{
    async fn get_equipment(&self) -> Result<Vec<Equipment>, ReadError> {
        log_on_error!(self.repository.read_equipment(), ReadError, "get", "equipment")
    }

    async fn create_equipment(&self, name: Name) -> Result<Equipment, CreateError> {
        log_on_error!(
            self.repository.create_equipment(name),
            CreateError,
            "create",
            "equipment"
        )
    }

    async fn modify_equipment(
        &self,
        id: EquipmentID,
        name: Name,
    ) -> Result<Equipment, UpdateError> {
        log_on_error!(
            self.repository.modify_equipment(id, name),
            UpdateError,
            "modify",
            "equipment"
        )
    }

    async fn delete_equipment(&self, id: EquipmentID) -> Result<EquipmentID, DeleteError> {
        log_on_error!(
            self.repository.delete_equipment(id),
            DeleteError,
            "delete",
            "equipment"
        )
    }
}

impl<R> DuplicationService for Service<R>
where
    R: WorkoutDayRepository + DaySectionRepository + SectionExerciseRepository,
{
    async fn duplicate_week(
        &self,
        plan_id: PlanID,
        from: WeekNumber,
        to: WeekNumber,
    ) -> Result<WeekDuplication, DuplicationError> {
        let days = self.repository.read_workout_days(plan_id).await?;
        let source_days = days
            .into_iter()
            .filter(|d| d.week_number == from)
            .collect::<Vec<_>>();
        if source_days.is_empty() {
            return Ok(WeekDuplication::default());
        }

        let mut created = CreatedWeek::default();
        match self.copy_week(&source_days, to, &mut created).await {
            Ok(()) => Ok(created.summary()),
            Err(err) => {
                error!("failed to duplicate week {from}: {err}");
                Err(self.undo_duplication(created, err).await)
            }
        }
    }
}

impl<R> Service<R>
where
    R: SectionExerciseRepository,
{
    /// Removes the rows persisted by a failed create, alternatives before the
    /// primary. Returns the causing error, or a partial-create error if rows
    /// were left behind.
    async fn undo_create(
        &self,
        primary: &SectionExercise,
        alternatives: &[SectionExercise],
        cause: CreateError,
    ) -> CreateError {
        let mut remaining = 1 + alternatives.len();
        for row in alternatives.iter().rev().chain([primary]) {
            match self.repository.delete_section_exercise(row.id).await {
                Ok(_) => remaining -= 1,
                Err(err) => {
                    error!("failed to remove section exercise after failed create: {err}");
                }
            }
        }
        if remaining > 0 {
            return CreateError::Other(Box::new(SectionExerciseError::PartialCreate {
                remaining,
            }));
        }
        cause
    }
}

impl<R> Service<R>
where
    R: DaySectionRepository + SectionExerciseRepository,
{
    async fn delete_section_tree(&self, id: DaySectionID) -> Result<DaySectionID, DeleteError> {
        let rows = self.repository.read_section_exercise_rows(id).await?;
        // Alternatives first, orphans included.
        for row in rows.iter().filter(|r| r.is_alternative()) {
            self.repository.delete_section_exercise(row.id).await?;
        }
        for row in rows.iter().filter(|r| !r.is_alternative()) {
            self.repository.delete_section_exercise(row.id).await?;
        }
        log_on_error!(
            self.repository.delete_day_section(id),
            DeleteError,
            "delete",
            "day section"
        )
    }
}

impl<R> Service<R>
where
    R: WorkoutDayRepository + DaySectionRepository + SectionExerciseRepository,
{
    async fn delete_day_tree(&self, id: WorkoutDayID) -> Result<WorkoutDayID, DeleteError> {
        for section in self.repository.read_day_sections(id).await? {
            self.delete_section_tree(section.id).await?;
        }
        log_on_error!(
            self.repository.delete_workout_day(id),
            DeleteError,
            "delete",
            "workout day"
        )
    }

    async fn copy_week(
        &self,
        source_days: &[WorkoutDay],
        to: WeekNumber,
        created: &mut CreatedWeek,
    ) -> Result<(), DuplicationError> {
        for source_day in source_days {
            let day = self
                .repository
                .create_workout_day(
                    source_day.plan_id,
                    to,
                    source_day.day_number,
                    source_day.name.clone(),
                    source_day.duration_minutes,
                )
                .await?;
            created.days.push(day.id);

            for source_section in self.repository.read_day_sections(source_day.id).await? {
                let section = self
                    .repository
                    .create_day_section(
                        day.id,
                        source_section.section_type,
                        source_section.section_order,
                        source_section.rounds,
                        source_section.rest_between_rounds_seconds,
                        source_section.description.clone(),
                    )
                    .await?;
                created.sections.push(section.id);

                self.copy_section_exercises(source_section.id, section.id, created)
                    .await?;
            }
        }
        Ok(())
    }

    async fn copy_section_exercises(
        &self,
        source: DaySectionID,
        target: DaySectionID,
        created: &mut CreatedWeek,
    ) -> Result<(), DuplicationError> {
        let trees = self.repository.read_section_exercises(source).await?;

        // First pass: copy the primaries, recording which new id replaces
        // which source id.
        let mut remap = BTreeMap::new();
        for tree in &trees {
            let primary = self
                .repository
                .create_section_exercise(NewSectionExercise {
                    day_section_id: target,
                    exercise_id: tree.primary.exercise_id,
                    parent_id: None,
                    exercise_order: tree.primary.exercise_order,
                    equipment_id: tree.primary.equipment_id,
                    prescription: tree.primary.prescription.clone(),
                    notes: tree.primary.notes.clone(),
                })
                .await?;
            remap.insert(tree.primary.id, primary.id);
            created.exercises.push(primary.id);
        }

        // Second pass: copy the alternatives, linked to the new primaries
        // through the remap. They must never point into the source week.
        for tree in &trees {
            let parent_id = remap[&tree.primary.id];
            for alternative in &tree.alternatives {
                let row = &alternative.alternative;
                let copy = self
                    .repository
                    .create_section_exercise(NewSectionExercise {
                        day_section_id: target,
                        exercise_id: row.exercise_id,
                        parent_id: Some(parent_id),
                        exercise_order: row.exercise_order,
                        equipment_id: row.equipment_id,
                        prescription: row.prescription.clone(),
                        notes: row.notes.clone(),
                    })
                    .await?;
                created.alternatives.push(copy.id);
            }
        }
        Ok(())
    }

    /// Best-effort removal of all rows created by a failed duplication, in
    /// reverse creation order.
    async fn undo_duplication(
        &self,
        created: CreatedWeek,
        cause: DuplicationError,
    ) -> DuplicationError {
        let total = created.summary().total();
        let mut remaining = total;

        for id in created
            .alternatives
            .iter()
            .rev()
            .chain(created.exercises.iter().rev())
        {
            match self.repository.delete_section_exercise(*id).await {
                Ok(_) => remaining -= 1,
                Err(err) => {
                    error!("failed to remove section exercise after failed duplication: {err}");
                }
            }
        }
        for id in created.sections.iter().rev() {
            match self.repository.delete_day_section(*id).await {
                Ok(_) => remaining -= 1,
                Err(err) => error!("failed to remove day section after failed duplication: {err}"),
            }
        }
        for id in created.days.iter().rev() {
            match self.repository.delete_workout_day(*id).await {
                Ok(_) => remaining -= 1,
                Err(err) => error!("failed to remove workout day after failed duplication: {err}"),
            }
        }

        if remaining > 0 {
            return DuplicationError::Partial {
                created: total,
                remaining,
            };
        }
        cause
    }
}

fn new_alternative(parent: &SectionExercise, spec: AlternativeSpec) -> NewSectionExercise {
    NewSectionExercise {
        day_section_id: parent.day_section_id,
        exercise_id: spec.exercise_id,
        parent_id: Some(parent.id),
        // Alternatives share the slot of their primary.
        exercise_order: parent.exercise_order,
        equipment_id: None,
        prescription: spec.prescription,
        notes: spec.notes,
    }
}

#[derive(Default)]
struct CreatedWeek {
    days: Vec<WorkoutDayID>,
    sections: Vec<DaySectionID>,
    exercises: Vec<SectionExerciseID>,
    alternatives: Vec<SectionExerciseID>,
}

impl CreatedWeek {
    fn summary(&self) -> WeekDuplication {
        WeekDuplication {
            days: self.days.len(),
            sections: self.sections.len(),
            exercises: self.exercises.len(),
            alternatives: self.alternatives.len(),
        }
    }
}
