#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod day_section;
mod duplication;
mod equipment;
mod error;
mod exercise;
mod name;
mod plan;
mod section_exercise;
mod service;
mod workout_day;

pub use day_section::{
    DaySection, DaySectionID, DaySectionRepository, DaySectionService, Rounds, RoundsError,
    SectionOrder, SectionOrderError, SectionType, SectionTypeError, next_section_order,
};
pub use duplication::{DuplicationError, DuplicationService, WeekDuplication};
pub use equipment::{Equipment, EquipmentID, EquipmentRepository, EquipmentService};
pub use error::{
    CreateError, DeleteError, ReadError, StorageError, UpdateError, ValidationError,
};
pub use exercise::{Exercise, ExerciseID, ExerciseRepository, ExerciseService};
pub use name::{Name, NameError};
pub use plan::{
    Plan, PlanCategory, PlanCategoryError, PlanFocus, PlanFocusError, PlanGoal, PlanGoalError,
    PlanID, PlanRepository, PlanService,
};
pub use section_exercise::{
    AlternativeExercise, AlternativeSpec, CreatedSectionExercise, ExerciseOrder,
    ExerciseOrderError, NewSectionExercise, Prescription, SectionExercise, SectionExerciseError,
    SectionExerciseID, SectionExerciseRepository, SectionExerciseService, SectionExerciseTree,
    Sets, SetsError,
};
pub use service::Service;
pub use workout_day::{
    DayNumber, DayNumberError, WeekNumber, WeekNumberError, WorkoutDay, WorkoutDayID,
    WorkoutDayRepository, WorkoutDayService, group_by_week,
};
