//! REST storage
//!
//! Client for the hosted backend. All repository traits are implemented on
//! top of a small transport trait, so tests can script responses without a
//! server. Rows cross the wire as serde models and are converted into domain
//! types on the way in.

use chrono::{DateTime, Utc};
use log::error;
use reqwest::{Method, StatusCode};
use robur_domain as domain;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value, json};
use uuid::Uuid;

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send(&self, request: Request) -> Result<Response, SendError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl Request {
    #[must_use]
    pub fn get(path: &str) -> Self {
        Self {
            method: Method::GET,
            path: path.to_string(),
            body: None,
        }
    }

    #[must_use]
    pub fn post(path: &str, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.to_string(),
            body: Some(body),
        }
    }

    #[must_use]
    pub fn patch(path: &str, body: Value) -> Self {
        Self {
            method: Method::PATCH,
            path: path.to_string(),
            body: Some(body),
        }
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self {
            method: Method::DELETE,
            path: path.to_string(),
            body: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

#[derive(thiserror::Error, Debug, Clone)]
pub enum SendError {
    #[error("no connection")]
    NoConnection,
}

pub struct ReqwestSendRequest {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestSendRequest {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl SendRequest for ReqwestSendRequest {
    async fn send(&self, request: Request) -> Result<Response, SendError> {
        let url = format!("{}/{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method, url);
        if let Some(body) = request.body {
            builder = builder.json(&body);
        }
        let response = builder.send().await.map_err(|_| SendError::NoConnection)?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|_| SendError::NoConnection)?
            .to_vec();
        Ok(Response { status, body })
    }
}

pub struct Rest<S> {
    transport: S,
}

impl Rest<ReqwestSendRequest> {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            transport: ReqwestSendRequest::new(base_url),
        }
    }
}

impl<S: SendRequest> Rest<S> {
    pub const fn with_transport(transport: S) -> Self {
        Self { transport }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: Request) -> Result<T, FetchError> {
        let response = self.send(request).await?;
        serde_json::from_slice(&response.body).map_err(FetchError::Deserialization)
    }

    async fn fetch_no_content<T>(&self, request: Request, result: T) -> Result<T, FetchError> {
        self.send(request).await?;
        Ok(result)
    }

    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let path = request.path.clone();
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|_| FetchError::NoConnection)?;
        if response.status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !response.status.is_success() {
            error!("request to {path} failed: {}", response.status);
            return Err(FetchError::Status(response.status));
        }
        Ok(response)
    }
}

#[derive(thiserror::Error, Debug)]
enum FetchError {
    #[error("not found")]
    NotFound,
    #[error("no connection")]
    NoConnection,
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("deserialization failed: {0}")]
    Deserialization(serde_json::Error),
}

impl From<FetchError> for domain::ReadError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NotFound => domain::ReadError::NotFound,
            FetchError::NoConnection => {
                domain::ReadError::Storage(domain::StorageError::NoConnection)
            }
            FetchError::Status(status) => domain::ReadError::Storage(
                domain::StorageError::Other(status.to_string().into()),
            ),
            FetchError::Deserialization(err) => domain::ReadError::Other(Box::new(err)),
        }
    }
}

impl From<FetchError> for domain::CreateError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NotFound => domain::CreateError::NotFound,
            FetchError::NoConnection => {
                domain::CreateError::Storage(domain::StorageError::NoConnection)
            }
            FetchError::Status(status) => domain::CreateError::Storage(
                domain::StorageError::Other(status.to_string().into()),
            ),
            FetchError::Deserialization(err) => domain::CreateError::Other(Box::new(err)),
        }
    }
}

impl From<FetchError> for domain::UpdateError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NotFound => domain::UpdateError::NotFound,
            FetchError::NoConnection => {
                domain::UpdateError::Storage(domain::StorageError::NoConnection)
            }
            FetchError::Status(status) => domain::UpdateError::Storage(
                domain::StorageError::Other(status.to_string().into()),
            ),
            FetchError::Deserialization(err) => domain::UpdateError::Other(Box::new(err)),
        }
    }
}

impl From<FetchError> for domain::DeleteError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NotFound => domain::DeleteError::NotFound,
            FetchError::NoConnection => {
                domain::DeleteError::Storage(domain::StorageError::NoConnection)
            }
            FetchError::Status(status) => domain::DeleteError::Storage(
                domain::StorageError::Other(status.to_string().into()),
            ),
            FetchError::Deserialization(err) => domain::DeleteError::Other(Box::new(err)),
        }
    }
}

impl<S: SendRequest> domain::PlanRepository for Rest<S> {
    async fn read_plans(&self) -> Result<Vec<domain::Plan>, domain::ReadError> {
        let rows: Vec<Plan> = self.fetch(Request::get("api/plans")).await?;
        convert_all(rows).map_err(domain::ReadError::Other)
    }

    async fn read_plan(&self, id: domain::PlanID) -> Result<domain::Plan, domain::ReadError> {
        let row: Plan = self.fetch(Request::get(&format!("api/plans/{}", *id))).await?;
        domain::Plan::try_from(row).map_err(domain::ReadError::Other)
    }

    async fn create_plan(
        &self,
        name: domain::Name,
        goal: domain::PlanGoal,
        description: Option<String>,
    ) -> Result<domain::Plan, domain::CreateError> {
        let row: Plan = self
            .fetch(Request::post(
                "api/plans",
                json!({
                    "name": name.to_string(),
                    "category": PlanCategory::from(goal.category()),
                    "focus": PlanFocus::from(goal.focus()),
                    "description": description,
                }),
            ))
            .await?;
        domain::Plan::try_from(row).map_err(domain::CreateError::Other)
    }

    async fn modify_plan(
        &self,
        id: domain::PlanID,
        name: Option<domain::Name>,
        goal: Option<domain::PlanGoal>,
        description: Option<String>,
    ) -> Result<domain::Plan, domain::UpdateError> {
        let mut content = Map::new();
        if let Some(name) = name {
            content.insert("name".into(), json!(name.to_string()));
        }
        if let Some(goal) = goal {
            content.insert("category".into(), json!(PlanCategory::from(goal.category())));
            content.insert("focus".into(), json!(PlanFocus::from(goal.focus())));
        }
        if let Some(description) = description {
            content.insert("description".into(), json!(description));
        }
        let row: Plan = self
            .fetch(Request::patch(
                &format!("api/plans/{}", *id),
                Value::Object(content),
            ))
            .await?;
        domain::Plan::try_from(row).map_err(domain::UpdateError::Other)
    }

    async fn delete_plan(&self, id: domain::PlanID) -> Result<domain::PlanID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(Request::delete(&format!("api/plans/{}", *id)), id)
            .await?)
    }
}

impl<S: SendRequest> domain::WorkoutDayRepository for Rest<S> {
    async fn read_workout_days(
        &self,
        plan_id: domain::PlanID,
    ) -> Result<Vec<domain::WorkoutDay>, domain::ReadError> {
        let rows: Vec<WorkoutDay> = self
            .fetch(Request::get(&format!("api/plans/{}/workout_days", *plan_id)))
            .await?;
        convert_all(rows).map_err(domain::ReadError::Other)
    }

    async fn read_workout_day(
        &self,
        id: domain::WorkoutDayID,
    ) -> Result<domain::WorkoutDay, domain::ReadError> {
        let row: WorkoutDay = self
            .fetch(Request::get(&format!("api/workout_days/{}", *id)))
            .await?;
        domain::WorkoutDay::try_from(row).map_err(domain::ReadError::Other)
    }

    async fn create_workout_day(
        &self,
        plan_id: domain::PlanID,
        week_number: domain::WeekNumber,
        day_number: domain::DayNumber,
        name: domain::Name,
        duration_minutes: Option<u32>,
    ) -> Result<domain::WorkoutDay, domain::CreateError> {
        let row: WorkoutDay = self
            .fetch(Request::post(
                "api/workout_days",
                json!({
                    "plan_id": *plan_id,
                    "week_number": *week_number,
                    "day_number": *day_number,
                    "name": name.to_string(),
                    "duration_minutes": duration_minutes,
                }),
            ))
            .await?;
        domain::WorkoutDay::try_from(row).map_err(domain::CreateError::Other)
    }

    async fn modify_workout_day(
        &self,
        id: domain::WorkoutDayID,
        week_number: Option<domain::WeekNumber>,
        day_number: Option<domain::DayNumber>,
        name: Option<domain::Name>,
        duration_minutes: Option<u32>,
    ) -> Result<domain::WorkoutDay, domain::UpdateError> {
        let mut content = Map::new();
        if let Some(week_number) = week_number {
            content.insert("week_number".into(), json!(*week_number));
        }
        if let Some(day_number) = day_number {
            content.insert("day_number".into(), json!(*day_number));
        }
        if let Some(name) = name {
            content.insert("name".into(), json!(name.to_string()));
        }
        if let Some(duration_minutes) = duration_minutes {
            content.insert("duration_minutes".into(), json!(duration_minutes));
        }
        let row: WorkoutDay = self
            .fetch(Request::patch(
                &format!("api/workout_days/{}", *id),
                Value::Object(content),
            ))
            .await?;
        domain::WorkoutDay::try_from(row).map_err(domain::UpdateError::Other)
    }

    async fn delete_workout_day(
        &self,
        id: domain::WorkoutDayID,
    ) -> Result<domain::WorkoutDayID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(Request::delete(&format!("api/workout_days/{}", *id)), id)
            .await?)
    }
}

impl<S: SendRequest> domain::DaySectionRepository for Rest<S> {
    async fn read_day_sections(
        &self,
        workout_day_id: domain::WorkoutDayID,
    ) -> Result<Vec<domain::DaySection>, domain::ReadError> {
        let rows: Vec<DaySection> = self
            .fetch(Request::get(&format!(
                "api/workout_days/{}/day_sections",
                *workout_day_id
            )))
            .await?;
        convert_all(rows).map_err(domain::ReadError::Other)
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
        let row: DaySection = self
            .fetch(Request::post(
                "api/day_sections",
                json!({
                    "workout_day_id": *workout_day_id,
                    "section_type": SectionType::from(section_type),
                    "section_order": *section_order,
                    "rounds": *rounds,
                    "rest_between_rounds_seconds": rest_between_rounds_seconds,
                    "description": description,
                }),
            ))
            .await?;
        domain::DaySection::try_from(row).map_err(domain::CreateError::Other)
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
        let mut content = Map::new();
        if let Some(section_type) = section_type {
            content.insert("section_type".into(), json!(SectionType::from(section_type)));
        }
        if let Some(section_order) = section_order {
            content.insert("section_order".into(), json!(*section_order));
        }
        if let Some(rounds) = rounds {
            content.insert("rounds".into(), json!(*rounds));
        }
        if let Some(rest) = rest_between_rounds_seconds {
            content.insert("rest_between_rounds_seconds".into(), json!(rest));
        }
        if let Some(description) = description {
            content.insert("description".into(), json!(description));
        }
        let row: DaySection = self
            .fetch(Request::patch(
                &format!("api/day_sections/{}", *id),
                Value::Object(content),
            ))
            .await?;
        domain::DaySection::try_from(row).map_err(domain::UpdateError::Other)
    }

    async fn delete_day_section(
        &self,
        id: domain::DaySectionID,
    ) -> Result<domain::DaySectionID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(Request::delete(&format!("api/day_sections/{}", *id)), id)
            .await?)
    }
}

impl<S: SendRequest> domain::SectionExerciseRepository for Rest<S> {
    async fn read_section_exercises(
        &self,
        day_section_id: domain::DaySectionID,
    ) -> Result<Vec<domain::SectionExerciseTree>, domain::ReadError> {
        let rows: Vec<SectionExerciseTree> = self
            .fetch(Request::get(&format!(
                "api/day_sections/{}/section_exercises",
                *day_section_id
            )))
            .await?;
        convert_all(rows).map_err(domain::ReadError::Other)
    }

    async fn read_section_exercise_rows(
        &self,
        day_section_id: domain::DaySectionID,
    ) -> Result<Vec<domain::SectionExercise>, domain::ReadError> {
        let rows: Vec<SectionExercise> = self
            .fetch(Request::get(&format!(
                "api/section_exercises?day_section_id={}",
                *day_section_id
            )))
            .await?;
        convert_all(rows).map_err(domain::ReadError::Other)
    }

    async fn read_section_exercise(
        &self,
        id: domain::SectionExerciseID,
    ) -> Result<domain::SectionExercise, domain::ReadError> {
        let row: SectionExercise = self
            .fetch(Request::get(&format!("api/section_exercises/{}", *id)))
            .await?;
        domain::SectionExercise::try_from(row).map_err(domain::ReadError::Other)
    }

    async fn create_section_exercise(
        &self,
        new: domain::NewSectionExercise,
    ) -> Result<domain::SectionExercise, domain::CreateError> {
        let row: SectionExercise = self
            .fetch(Request::post(
                "api/section_exercises",
                json!({
                    "day_section_id": *new.day_section_id,
                    "exercise_id": *new.exercise_id,
                    "parent_id": new.parent_id.map(|id| *id),
                    "exercise_order": *new.exercise_order,
                    "equipment_id": new.equipment_id.map(|id| *id),
                    "sets": new.prescription.sets.map(u32::from),
                    "reps": new.prescription.reps,
                    "duration_seconds": new.prescription.duration_seconds,
                    "rest_seconds": new.prescription.rest_seconds,
                    "notes": new.notes,
                }),
            ))
            .await?;
        domain::SectionExercise::try_from(row).map_err(domain::CreateError::Other)
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
        let mut content = Map::new();
        if let Some(exercise_id) = exercise_id {
            content.insert("exercise_id".into(), json!(*exercise_id));
        }
        if let Some(exercise_order) = exercise_order {
            content.insert("exercise_order".into(), json!(*exercise_order));
        }
        if let Some(equipment_id) = equipment_id {
            content.insert("equipment_id".into(), json!(*equipment_id));
        }
        if let Some(prescription) = prescription {
            content.insert("sets".into(), json!(prescription.sets.map(u32::from)));
            content.insert("reps".into(), json!(prescription.reps));
            content.insert(
                "duration_seconds".into(),
                json!(prescription.duration_seconds),
            );
            content.insert("rest_seconds".into(), json!(prescription.rest_seconds));
        }
        if let Some(notes) = notes {
            content.insert("notes".into(), json!(notes));
        }
        let row: SectionExercise = self
            .fetch(Request::patch(
                &format!("api/section_exercises/{}", *id),
                Value::Object(content),
            ))
            .await?;
        domain::SectionExercise::try_from(row).map_err(domain::UpdateError::Other)
    }

    async fn delete_section_exercise(
        &self,
        id: domain::SectionExerciseID,
    ) -> Result<domain::SectionExerciseID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(Request::delete(&format!("api/section_exercises/{}", *id)), id)
            .await?)
    }
}

impl<S: SendRequest> domain::ExerciseRepository for Rest<S> {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        let rows: Vec<Exercise> = self.fetch(Request::get("api/exercises")).await?;
        convert_all(rows).map_err(domain::ReadError::Other)
    }

    async fn read_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::Exercise, domain::ReadError> {
        let row: Exercise = self
            .fetch(Request::get(&format!("api/exercises/{}", *id)))
            .await?;
        domain::Exercise::try_from(row).map_err(domain::ReadError::Other)
    }

    async fn create_exercise(
        &self,
        name: domain::Name,
        description: Option<String>,
        video_url: Option<String>,
        thumbnail_url: Option<String>,
    ) -> Result<domain::Exercise, domain::CreateError> {
        let row: Exercise = self
            .fetch(Request::post(
                "api/exercises",
                json!({
                    "name": name.to_string(),
                    "description": description,
                    "video_url": video_url,
                    "thumbnail_url": thumbnail_url,
                }),
            ))
            .await?;
        domain::Exercise::try_from(row).map_err(domain::CreateError::Other)
    }

    async fn modify_exercise(
        &self,
        id: domain::ExerciseID,
        name: Option<domain::Name>,
        description: Option<String>,
        video_url: Option<String>,
        thumbnail_url: Option<String>,
    ) -> Result<domain::Exercise, domain::UpdateError> {
        let mut content = Map::new();
        if let Some(name) = name {
            content.insert("name".into(), json!(name.to_string()));
        }
        if let Some(description) = description {
            content.insert("description".into(), json!(description));
        }
        if let Some(video_url) = video_url {
            content.insert("video_url".into(), json!(video_url));
        }
        if let Some(thumbnail_url) = thumbnail_url {
            content.insert("thumbnail_url".into(), json!(thumbnail_url));
        }
        let row: Exercise = self
            .fetch(Request::patch(
                &format!("api/exercises/{}", *id),
                Value::Object(content),
            ))
            .await?;
        domain::Exercise::try_from(row).map_err(domain::UpdateError::Other)
    }

    async fn delete_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::ExerciseID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(Request::delete(&format!("api/exercises/{}", *id)), id)
            .await?)
    }
}

impl<S: SendRequest> domain::EquipmentRepository for Rest<S> {
    async fn read_equipment(&self) -> Result<Vec<domain::Equipment>, domain::ReadError> {
        let rows: Vec<Equipment> = self.fetch(Request::get("api/equipment")).await?;
        convert_all(rows).map_err(domain::ReadError::Other)
    }

    async fn create_equipment(
        &self,
        name: domain::Name,
    ) -> Result<domain::Equipment, domain::CreateError> {
        let row: Equipment = self
            .fetch(Request::post(
                "api/equipment",
                json!({ "name": name.to_string() }),
            ))
            .await?;
        domain::Equipment::try_from(row).map_err(domain::CreateError::Other)
    }

    async fn modify_equipment(
        &self,
        id: domain::EquipmentID,
        name: domain::Name,
    ) -> Result<domain::Equipment, domain::UpdateError> {
        let row: Equipment = self
            .fetch(Request::patch(
                &format!("api/equipment/{}", *id),
                json!({ "name": name.to_string() }),
            ))
            .await?;
        domain::Equipment::try_from(row).map_err(domain::UpdateError::Other)
    }

    async fn delete_equipment(
        &self,
        id: domain::EquipmentID,
    ) -> Result<domain::EquipmentID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(Request::delete(&format!("api/equipment/{}", *id)), id)
            .await?)
    }
}

fn convert_all<D, T>(rows: Vec<D>) -> Result<Vec<T>, Box<dyn std::error::Error>>
where
    T: TryFrom<D, Error = Box<dyn std::error::Error>>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    pub category: PlanCategory,
    pub focus: PlanFocus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&domain::Plan> for Plan {
    fn from(value: &domain::Plan) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            category: value.goal.category().into(),
            focus: value.goal.focus().into(),
            description: value.description.clone(),
            created_at: value.created_at,
        }
    }
}

impl TryFrom<Plan> for domain::Plan {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: Plan) -> Result<Self, Self::Error> {
        Ok(domain::Plan {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            goal: domain::PlanGoal::new(value.category.into(), value.focus.into())?,
            description: value.description,
            created_at: value.created_at,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanCategory {
    Beginner,
    Intermediate,
    Advanced,
}

impl From<domain::PlanCategory> for PlanCategory {
    fn from(value: domain::PlanCategory) -> Self {
        match value {
            domain::PlanCategory::Beginner => PlanCategory::Beginner,
            domain::PlanCategory::Intermediate => PlanCategory::Intermediate,
            domain::PlanCategory::Advanced => PlanCategory::Advanced,
        }
    }
}

impl From<PlanCategory> for domain::PlanCategory {
    fn from(value: PlanCategory) -> Self {
        match value {
            PlanCategory::Beginner => domain::PlanCategory::Beginner,
            PlanCategory::Intermediate => domain::PlanCategory::Intermediate,
            PlanCategory::Advanced => domain::PlanCategory::Advanced,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFocus {
    General,
    #[serde(rename = "Fat Burning")]
    FatBurning,
    #[serde(rename = "Muscle Building")]
    MuscleBuilding,
    #[serde(rename = "Combo Plan")]
    ComboPlan,
}

impl From<domain::PlanFocus> for PlanFocus {
    fn from(value: domain::PlanFocus) -> Self {
        match value {
            domain::PlanFocus::General => PlanFocus::General,
            domain::PlanFocus::FatBurning => PlanFocus::FatBurning,
            domain::PlanFocus::MuscleBuilding => PlanFocus::MuscleBuilding,
            domain::PlanFocus::ComboPlan => PlanFocus::ComboPlan,
        }
    }
}

impl From<PlanFocus> for domain::PlanFocus {
    fn from(value: PlanFocus) -> Self {
        match value {
            PlanFocus::General => domain::PlanFocus::General,
            PlanFocus::FatBurning => domain::PlanFocus::FatBurning,
            PlanFocus::MuscleBuilding => domain::PlanFocus::MuscleBuilding,
            PlanFocus::ComboPlan => domain::PlanFocus::ComboPlan,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutDay {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub week_number: u32,
    pub day_number: u32,
    pub name: String,
    pub duration_minutes: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl From<&domain::WorkoutDay> for WorkoutDay {
    fn from(value: &domain::WorkoutDay) -> Self {
        Self {
            id: *value.id,
            plan_id: *value.plan_id,
            week_number: *value.week_number,
            day_number: *value.day_number,
            name: value.name.to_string(),
            duration_minutes: value.duration_minutes,
            created_at: value.created_at,
        }
    }
}

impl TryFrom<WorkoutDay> for domain::WorkoutDay {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: WorkoutDay) -> Result<Self, Self::Error> {
        Ok(domain::WorkoutDay {
            id: value.id.into(),
            plan_id: value.plan_id.into(),
            week_number: domain::WeekNumber::new(value.week_number)?,
            day_number: domain::DayNumber::new(value.day_number)?,
            name: domain::Name::new(&value.name)?,
            duration_minutes: value.duration_minutes,
            created_at: value.created_at,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DaySection {
    pub id: Uuid,
    pub workout_day_id: Uuid,
    pub section_type: SectionType,
    pub section_order: u32,
    pub rounds: u32,
    pub rest_between_rounds_seconds: u32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&domain::DaySection> for DaySection {
    fn from(value: &domain::DaySection) -> Self {
        Self {
            id: *value.id,
            workout_day_id: *value.workout_day_id,
            section_type: value.section_type.into(),
            section_order: *value.section_order,
            rounds: *value.rounds,
            rest_between_rounds_seconds: value.rest_between_rounds_seconds,
            description: value.description.clone(),
            created_at: value.created_at,
        }
    }
}

impl TryFrom<DaySection> for domain::DaySection {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: DaySection) -> Result<Self, Self::Error> {
        Ok(domain::DaySection {
            id: value.id.into(),
            workout_day_id: value.workout_day_id.into(),
            section_type: value.section_type.into(),
            section_order: domain::SectionOrder::new(value.section_order)?,
            rounds: domain::Rounds::new(value.rounds)?,
            rest_between_rounds_seconds: value.rest_between_rounds_seconds,
            description: value.description,
            created_at: value.created_at,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionType {
    #[serde(rename = "Warm-up")]
    WarmUp,
    #[serde(rename = "Main Workout")]
    MainWorkout,
    Recovery,
    Cooldown,
}

impl From<domain::SectionType> for SectionType {
    fn from(value: domain::SectionType) -> Self {
        match value {
            domain::SectionType::WarmUp => SectionType::WarmUp,
            domain::SectionType::MainWorkout => SectionType::MainWorkout,
            domain::SectionType::Recovery => SectionType::Recovery,
            domain::SectionType::Cooldown => SectionType::Cooldown,
        }
    }
}

impl From<SectionType> for domain::SectionType {
    fn from(value: SectionType) -> Self {
        match value {
            SectionType::WarmUp => domain::SectionType::WarmUp,
            SectionType::MainWorkout => domain::SectionType::MainWorkout,
            SectionType::Recovery => domain::SectionType::Recovery,
            SectionType::Cooldown => domain::SectionType::Cooldown,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SectionExercise {
    pub id: Uuid,
    pub day_section_id: Uuid,
    pub exercise_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub exercise_order: u32,
    pub equipment_id: Option<Uuid>,
    pub sets: Option<u32>,
    pub reps: Option<String>,
    pub duration_seconds: Option<u32>,
    pub rest_seconds: Option<u32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&domain::SectionExercise> for SectionExercise {
    fn from(value: &domain::SectionExercise) -> Self {
        Self {
            id: *value.id,
            day_section_id: *value.day_section_id,
            exercise_id: *value.exercise_id,
            parent_id: value.parent_id.map(|id| *id),
            exercise_order: *value.exercise_order,
            equipment_id: value.equipment_id.map(|id| *id),
            sets: value.prescription.sets.map(u32::from),
            reps: value.prescription.reps.clone(),
            duration_seconds: value.prescription.duration_seconds,
            rest_seconds: value.prescription.rest_seconds,
            notes: value.notes.clone(),
            created_at: value.created_at,
        }
    }
}

impl TryFrom<SectionExercise> for domain::SectionExercise {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: SectionExercise) -> Result<Self, Self::Error> {
        Ok(domain::SectionExercise {
            id: value.id.into(),
            day_section_id: value.day_section_id.into(),
            exercise_id: value.exercise_id.into(),
            parent_id: value.parent_id.map(Into::into),
            exercise_order: domain::ExerciseOrder::new(value.exercise_order)?,
            equipment_id: value.equipment_id.map(Into::into),
            prescription: domain::Prescription {
                sets: value.sets.map(domain::Sets::new).transpose()?,
                reps: value.reps,
                duration_seconds: value.duration_seconds,
                rest_seconds: value.rest_seconds,
            },
            notes: value.notes,
            created_at: value.created_at,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SectionExerciseTree {
    pub primary: SectionExercise,
    pub exercise: Exercise,
    pub equipment: Option<Equipment>,
    pub alternatives: Vec<AlternativeExercise>,
}

impl From<&domain::SectionExerciseTree> for SectionExerciseTree {
    fn from(value: &domain::SectionExerciseTree) -> Self {
        Self {
            primary: (&value.primary).into(),
            exercise: (&value.exercise).into(),
            equipment: value.equipment.as_ref().map(Into::into),
            alternatives: value.alternatives.iter().map(Into::into).collect(),
        }
    }
}

impl TryFrom<SectionExerciseTree> for domain::SectionExerciseTree {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: SectionExerciseTree) -> Result<Self, Self::Error> {
        Ok(domain::SectionExerciseTree {
            primary: value.primary.try_into()?,
            exercise: value.exercise.try_into()?,
            equipment: value.equipment.map(TryInto::try_into).transpose()?,
            alternatives: value
                .alternatives
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AlternativeExercise {
    pub alternative: SectionExercise,
    pub exercise: Exercise,
}

impl From<&domain::AlternativeExercise> for AlternativeExercise {
    fn from(value: &domain::AlternativeExercise) -> Self {
        Self {
            alternative: (&value.alternative).into(),
            exercise: (&value.exercise).into(),
        }
    }
}

impl TryFrom<AlternativeExercise> for domain::AlternativeExercise {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: AlternativeExercise) -> Result<Self, Self::Error> {
        Ok(domain::AlternativeExercise {
            alternative: value.alternative.try_into()?,
            exercise: value.exercise.try_into()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            description: value.description.clone(),
            video_url: value.video_url.clone(),
            thumbnail_url: value.thumbnail_url.clone(),
            created_at: value.created_at,
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(domain::Exercise {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            description: value.description,
            video_url: value.video_url,
            thumbnail_url: value.thumbnail_url,
            created_at: value.created_at,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Equipment {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&domain::Equipment> for Equipment {
    fn from(value: &domain::Equipment) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            created_at: value.created_at,
        }
    }
}

impl TryFrom<Equipment> for domain::Equipment {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: Equipment) -> Result<Self, Self::Error> {
        Ok(domain::Equipment {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            created_at: value.created_at,
        })
    }
}
