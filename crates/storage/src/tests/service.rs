use pretty_assertions::assert_eq;
use robur_domain::{
    self as domain, DaySectionService, DuplicationService, EquipmentService, ExerciseService,
    PlanService, SectionExerciseRepository, SectionExerciseService, Service, WorkoutDayService,
};

use crate::memory::Memory;
use crate::tests::data;

fn service() -> (Service<Memory>, Memory) {
    let memory = Memory::new();
    (Service::new(memory.clone()), memory)
}

async fn seed_plan(service: &Service<Memory>) -> domain::Plan {
    service
        .create_plan(data::name("Beginner Full Body"), data::beginner_goal(), None)
        .await
        .unwrap()
}

async fn seed_day(
    service: &Service<Memory>,
    plan_id: domain::PlanID,
    week: u32,
    day: u32,
) -> domain::WorkoutDay {
    service
        .create_workout_day(
            plan_id,
            data::week(week),
            data::day(day),
            data::name(&format!("Day {day}")),
            Some(45),
        )
        .await
        .unwrap()
}

async fn seed_section(
    service: &Service<Memory>,
    workout_day_id: domain::WorkoutDayID,
    order: u32,
) -> domain::DaySection {
    service
        .create_day_section(
            workout_day_id,
            domain::SectionType::MainWorkout,
            data::section_order(order),
            data::rounds(3),
            60,
            None,
        )
        .await
        .unwrap()
}

async fn seed_exercise(service: &Service<Memory>, name: &str) -> domain::Exercise {
    service
        .create_exercise(data::name(name), None, None, None)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_created_plan_appears_in_list() {
    let (service, _) = service();

    let before = service.get_plans().await.unwrap();
    let plan = service
        .create_plan(
            data::name("Full Body Basics"),
            data::beginner_goal(),
            Some("Three days a week".to_string()),
        )
        .await
        .unwrap();
    let after = service.get_plans().await.unwrap();

    assert_eq!(after.len(), before.len() + 1);
    assert!(!plan.id.is_nil());
    let listed = after.iter().find(|p| p.id == plan.id).unwrap();
    assert_eq!(listed.name, data::name("Full Body Basics"));
    assert_eq!(listed.goal, data::beginner_goal());
    assert_eq!(listed.description, Some("Three days a week".to_string()));
}

#[tokio::test]
async fn test_get_plans_newest_first() {
    let (service, _) = service();

    for name in ["A", "B", "C"] {
        service
            .create_plan(data::name(name), data::intermediate_goal(), None)
            .await
            .unwrap();
    }
    let plans = service.get_plans().await.unwrap();

    assert_eq!(plans.len(), 3);
    assert!(plans.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn test_get_workout_days_ordered() {
    let (service, _) = service();
    let plan = seed_plan(&service).await;

    seed_day(&service, plan.id, 2, 1).await;
    seed_day(&service, plan.id, 1, 2).await;
    seed_day(&service, plan.id, 3, 1).await;
    seed_day(&service, plan.id, 1, 1).await;

    let days = service.get_workout_days(plan.id).await.unwrap();

    assert_eq!(
        days.iter()
            .map(|d| (*d.week_number, *d.day_number))
            .collect::<Vec<_>>(),
        vec![(1, 1), (1, 2), (2, 1), (3, 1)]
    );
}

#[tokio::test]
async fn test_next_section_order() {
    let (service, _) = service();
    let plan = seed_plan(&service).await;
    let workout_day = seed_day(&service, plan.id, 1, 1).await;

    assert_eq!(
        service.next_section_order(workout_day.id).await.unwrap(),
        data::section_order(1)
    );

    seed_section(&service, workout_day.id, 1).await;
    seed_section(&service, workout_day.id, 4).await;

    assert_eq!(
        service.next_section_order(workout_day.id).await.unwrap(),
        data::section_order(5)
    );
}

#[tokio::test]
async fn test_create_section_exercise_with_alternatives() {
    let (service, memory) = service();
    let plan = seed_plan(&service).await;
    let workout_day = seed_day(&service, plan.id, 1, 1).await;
    let section = seed_section(&service, workout_day.id, 1).await;
    let push_up = seed_exercise(&service, "Push-up").await;
    let knee_push_up = seed_exercise(&service, "Knee Push-up").await;
    let wall_push_up = seed_exercise(&service, "Wall Push-up").await;

    let created = service
        .create_section_exercise(
            section.id,
            push_up.id,
            data::exercise_order(1),
            None,
            data::prescription(3, "10-12"),
            None,
            vec![
                data::alternative_spec(knee_push_up.id),
                data::alternative_spec(wall_push_up.id),
            ],
        )
        .await
        .unwrap();

    assert_eq!(created.row_count(), 3);
    assert!(!created.primary.id.is_nil());
    for alternative in &created.alternatives {
        assert!(!alternative.id.is_nil());
        assert_eq!(alternative.parent_id, Some(created.primary.id));
    }

    let rows = memory.read_section_exercise_rows(section.id).await.unwrap();
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn test_create_alternative() {
    let (service, _) = service();
    let plan = seed_plan(&service).await;
    let workout_day = seed_day(&service, plan.id, 1, 1).await;
    let section = seed_section(&service, workout_day.id, 1).await;
    let push_up = seed_exercise(&service, "Push-up").await;
    let knee_push_up = seed_exercise(&service, "Knee Push-up").await;

    let created = service
        .create_section_exercise(
            section.id,
            push_up.id,
            data::exercise_order(1),
            None,
            data::prescription(3, "10-12"),
            None,
            vec![],
        )
        .await
        .unwrap();
    let alternative = service
        .create_alternative(created.primary.id, data::alternative_spec(knee_push_up.id))
        .await
        .unwrap();

    assert_eq!(alternative.parent_id, Some(created.primary.id));
    assert_eq!(alternative.day_section_id, section.id);
}

#[tokio::test]
async fn test_create_alternative_for_alternative_rejected() {
    let (service, memory) = service();
    let plan = seed_plan(&service).await;
    let workout_day = seed_day(&service, plan.id, 1, 1).await;
    let section = seed_section(&service, workout_day.id, 1).await;
    let push_up = seed_exercise(&service, "Push-up").await;
    let knee_push_up = seed_exercise(&service, "Knee Push-up").await;

    let created = service
        .create_section_exercise(
            section.id,
            push_up.id,
            data::exercise_order(1),
            None,
            data::prescription(3, "10-12"),
            None,
            vec![data::alternative_spec(knee_push_up.id)],
        )
        .await
        .unwrap();

    assert!(matches!(
        service
            .create_alternative(
                created.alternatives[0].id,
                data::alternative_spec(push_up.id),
            )
            .await,
        Err(domain::CreateError::Validation(_))
    ));
    // nothing was persisted
    let rows = memory.read_section_exercise_rows(section.id).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn test_section_exercise_round_trip() {
    let (service, _) = service();
    let plan = seed_plan(&service).await;
    let workout_day = seed_day(&service, plan.id, 1, 1).await;
    let section = seed_section(&service, workout_day.id, 1).await;
    let push_up = seed_exercise(&service, "Push-up").await;
    let knee_push_up = seed_exercise(&service, "Knee Push-up").await;
    let dumbbells = service
        .create_equipment(data::name("Dumbbells"))
        .await
        .unwrap();

    let created = service
        .create_section_exercise(
            section.id,
            push_up.id,
            data::exercise_order(1),
            Some(dumbbells.id),
            data::prescription(3, "10-12"),
            Some("Slow negatives".to_string()),
            vec![data::alternative_spec(knee_push_up.id)],
        )
        .await
        .unwrap();

    let trees = service.get_section_exercises(section.id).await.unwrap();

    assert_eq!(trees.len(), 1);
    let tree = &trees[0];
    assert_eq!(tree.primary, created.primary);
    assert_eq!(tree.primary.exercise_id, push_up.id);
    assert_eq!(tree.primary.equipment_id, Some(dumbbells.id));
    assert_eq!(tree.primary.prescription, data::prescription(3, "10-12"));
    assert_eq!(tree.primary.notes, Some("Slow negatives".to_string()));
    assert_eq!(tree.exercise, push_up);
    assert_eq!(tree.equipment, Some(dumbbells));
    assert_eq!(tree.alternatives.len(), 1);
    assert_eq!(tree.alternatives[0].exercise, knee_push_up);
    assert_eq!(
        tree.alternatives[0].alternative.prescription,
        data::prescription(3, "10-12")
    );
}

#[tokio::test]
async fn test_duplicate_week() {
    let (service, _) = service();
    let plan = seed_plan(&service).await;
    let workout_day = seed_day(&service, plan.id, 1, 1).await;
    let section = seed_section(&service, workout_day.id, 1).await;
    let push_up = seed_exercise(&service, "Push-up").await;
    let knee_push_up = seed_exercise(&service, "Knee Push-up").await;
    let created = service
        .create_section_exercise(
            section.id,
            push_up.id,
            data::exercise_order(1),
            None,
            data::prescription(3, "10-12"),
            None,
            vec![data::alternative_spec(knee_push_up.id)],
        )
        .await
        .unwrap();

    let summary = service
        .duplicate_week(plan.id, data::week(1), data::week(2))
        .await
        .unwrap();

    assert_eq!(
        summary,
        domain::WeekDuplication {
            days: 1,
            sections: 1,
            exercises: 1,
            alternatives: 1,
        }
    );

    let days = service.get_workout_days(plan.id).await.unwrap();
    assert_eq!(days.len(), 2);
    let copied_day = days
        .iter()
        .find(|d| d.week_number == data::week(2))
        .unwrap();
    assert_ne!(copied_day.id, workout_day.id);
    assert_eq!(copied_day.day_number, data::day(1));
    assert_eq!(copied_day.name, data::name("Day 1"));
    assert_eq!(copied_day.duration_minutes, Some(45));

    let copied_sections = service.get_day_sections(copied_day.id).await.unwrap();
    assert_eq!(copied_sections.len(), 1);
    let copied_section = &copied_sections[0];
    assert_ne!(copied_section.id, section.id);
    assert_eq!(copied_section.section_type, domain::SectionType::MainWorkout);
    assert_eq!(copied_section.section_order, data::section_order(1));
    assert_eq!(copied_section.rounds, data::rounds(3));

    let copied_trees = service
        .get_section_exercises(copied_section.id)
        .await
        .unwrap();
    assert_eq!(copied_trees.len(), 1);
    let copied_tree = &copied_trees[0];
    assert_ne!(copied_tree.primary.id, created.primary.id);
    assert_eq!(copied_tree.primary.exercise_id, push_up.id);
    assert_eq!(copied_tree.primary.prescription, data::prescription(3, "10-12"));
    assert_eq!(copied_tree.alternatives.len(), 1);
    let copied_alternative = &copied_tree.alternatives[0].alternative;
    // the copy points to the copied primary, not into the source week
    assert_eq!(copied_alternative.parent_id, Some(copied_tree.primary.id));
    assert_ne!(copied_alternative.id, created.alternatives[0].id);
    assert_ne!(copied_alternative.parent_id, Some(created.primary.id));
}

#[tokio::test]
async fn test_duplicate_week_counts() {
    let (service, _) = service();
    let plan = seed_plan(&service).await;
    let push_up = seed_exercise(&service, "Push-up").await;
    let knee_push_up = seed_exercise(&service, "Knee Push-up").await;

    let day_1 = seed_day(&service, plan.id, 1, 1).await;
    let section_1 = seed_section(&service, day_1.id, 1).await;
    let section_2 = seed_section(&service, day_1.id, 2).await;
    let day_2 = seed_day(&service, plan.id, 1, 2).await;
    seed_section(&service, day_2.id, 1).await;
    // a day of another week must not be copied
    seed_day(&service, plan.id, 2, 1).await;

    service
        .create_section_exercise(
            section_1.id,
            push_up.id,
            data::exercise_order(1),
            None,
            data::prescription(3, "10-12"),
            None,
            vec![
                data::alternative_spec(knee_push_up.id),
                data::alternative_spec(knee_push_up.id),
            ],
        )
        .await
        .unwrap();
    service
        .create_section_exercise(
            section_1.id,
            knee_push_up.id,
            data::exercise_order(2),
            None,
            data::prescription(3, "15"),
            None,
            vec![],
        )
        .await
        .unwrap();
    service
        .create_section_exercise(
            section_2.id,
            push_up.id,
            data::exercise_order(1),
            None,
            data::prescription(4, "8"),
            None,
            vec![],
        )
        .await
        .unwrap();

    let summary = service
        .duplicate_week(plan.id, data::week(1), data::week(3))
        .await
        .unwrap();

    assert_eq!(
        summary,
        domain::WeekDuplication {
            days: 2,
            sections: 3,
            exercises: 3,
            alternatives: 2,
        }
    );
    assert_eq!(summary.total(), 10);

    let days = service.get_workout_days(plan.id).await.unwrap();
    assert_eq!(
        days.iter()
            .filter(|d| d.week_number == data::week(3))
            .count(),
        2
    );
}

#[tokio::test]
async fn test_duplicate_week_without_days() {
    let (service, _) = service();
    let plan = seed_plan(&service).await;
    seed_day(&service, plan.id, 1, 1).await;

    let summary = service
        .duplicate_week(plan.id, data::week(3), data::week(4))
        .await
        .unwrap();

    assert_eq!(summary, domain::WeekDuplication::default());
    assert_eq!(service.get_workout_days(plan.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_week_of_missing_plan() {
    let (service, _) = service();

    let summary = service
        .duplicate_week(domain::PlanID::nil(), data::week(1), data::week(2))
        .await
        .unwrap();

    assert_eq!(summary, domain::WeekDuplication::default());
}

#[tokio::test]
async fn test_delete_day_section_cascades() {
    let (service, memory) = service();
    let plan = seed_plan(&service).await;
    let workout_day = seed_day(&service, plan.id, 1, 1).await;
    let section = seed_section(&service, workout_day.id, 1).await;
    let push_up = seed_exercise(&service, "Push-up").await;
    let knee_push_up = seed_exercise(&service, "Knee Push-up").await;

    let created = service
        .create_section_exercise(
            section.id,
            push_up.id,
            data::exercise_order(1),
            None,
            data::prescription(3, "10-12"),
            None,
            vec![data::alternative_spec(knee_push_up.id)],
        )
        .await
        .unwrap();
    // orphan an alternative beforehand, it has to disappear as well
    let orphaned = service
        .create_section_exercise(
            section.id,
            knee_push_up.id,
            data::exercise_order(2),
            None,
            data::prescription(3, "15"),
            None,
            vec![data::alternative_spec(push_up.id)],
        )
        .await
        .unwrap();
    service
        .delete_section_exercise(orphaned.primary.id)
        .await
        .unwrap();

    service.delete_day_section(section.id).await.unwrap();

    assert_eq!(
        memory.read_section_exercise_rows(section.id).await.unwrap(),
        vec![]
    );
    assert!(matches!(
        memory.read_section_exercise(created.primary.id).await,
        Err(domain::ReadError::NotFound)
    ));
    assert_eq!(service.get_day_sections(workout_day.id).await.unwrap(), vec![]);
}

#[tokio::test]
async fn test_delete_primary_leaves_alternatives() {
    let (service, memory) = service();
    let plan = seed_plan(&service).await;
    let workout_day = seed_day(&service, plan.id, 1, 1).await;
    let section = seed_section(&service, workout_day.id, 1).await;
    let push_up = seed_exercise(&service, "Push-up").await;
    let knee_push_up = seed_exercise(&service, "Knee Push-up").await;

    let created = service
        .create_section_exercise(
            section.id,
            push_up.id,
            data::exercise_order(1),
            None,
            data::prescription(3, "10-12"),
            None,
            vec![data::alternative_spec(knee_push_up.id)],
        )
        .await
        .unwrap();

    service
        .delete_section_exercise(created.primary.id)
        .await
        .unwrap();

    // the alternative row stays behind and no longer shows up in the tree
    let rows = memory.read_section_exercise_rows(section.id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, created.alternatives[0].id);
    assert_eq!(service.get_section_exercises(section.id).await.unwrap(), vec![]);
}

#[tokio::test]
async fn test_delete_workout_day_cascades() {
    let (service, memory) = service();
    let plan = seed_plan(&service).await;
    let workout_day = seed_day(&service, plan.id, 1, 1).await;
    let section = seed_section(&service, workout_day.id, 1).await;
    let push_up = seed_exercise(&service, "Push-up").await;

    service
        .create_section_exercise(
            section.id,
            push_up.id,
            data::exercise_order(1),
            None,
            data::prescription(3, "10-12"),
            None,
            vec![],
        )
        .await
        .unwrap();

    service.delete_workout_day(workout_day.id).await.unwrap();

    assert_eq!(service.get_workout_days(plan.id).await.unwrap(), vec![]);
    assert_eq!(
        memory.read_section_exercise_rows(section.id).await.unwrap(),
        vec![]
    );
}

#[tokio::test]
async fn test_delete_plan_cascades() {
    let (service, memory) = service();
    let plan = seed_plan(&service).await;
    let workout_day = seed_day(&service, plan.id, 1, 1).await;
    let section = seed_section(&service, workout_day.id, 1).await;
    let push_up = seed_exercise(&service, "Push-up").await;
    let knee_push_up = seed_exercise(&service, "Knee Push-up").await;

    service
        .create_section_exercise(
            section.id,
            push_up.id,
            data::exercise_order(1),
            None,
            data::prescription(3, "10-12"),
            None,
            vec![data::alternative_spec(knee_push_up.id)],
        )
        .await
        .unwrap();

    service.delete_plan(plan.id).await.unwrap();

    assert_eq!(service.get_plans().await.unwrap(), vec![]);
    assert_eq!(service.get_workout_days(plan.id).await.unwrap(), vec![]);
    assert_eq!(
        memory.read_section_exercise_rows(section.id).await.unwrap(),
        vec![]
    );
    // the shared catalog is not part of the plan
    assert_eq!(service.get_exercises().await.unwrap().len(), 2);
}
