use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;
use vitalcoach_core::domain::{
    common::entities::app_errors::CoreError,
    recommendation::{
        AnalyzeBodyInput, DayName, GenerateDietPlanInput, GenerateWorkoutPlanInput, MealName,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeBodyValidator {
    #[serde(default)]
    pub sex: Option<String>,

    #[validate(range(min = 1, max = 120, message = "age must be between 1 and 120"))]
    pub age: u32,

    #[validate(range(min = 50.0, max = 260.0, message = "heightCm is out of range"))]
    pub height_cm: f64,

    #[validate(range(min = 20.0, max = 400.0, message = "weightKg is out of range"))]
    pub weight_kg: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, max = 75.0))]
    pub body_fat_percent: Option<f64>,

    #[serde(default)]
    #[validate(range(min = 0.0, max = 150.0))]
    pub skeletal_muscle_mass_kg: Option<f64>,

    #[serde(default)]
    #[validate(range(max = 30))]
    pub visceral_fat_level: Option<u32>,

    #[serde(default)]
    #[validate(range(max = 100))]
    pub inbody_score: Option<u32>,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl From<AnalyzeBodyValidator> for AnalyzeBodyInput {
    fn from(payload: AnalyzeBodyValidator) -> Self {
        Self {
            sex: payload.sex,
            age: payload.age,
            height_cm: payload.height_cm,
            weight_kg: payload.weight_kg,
            body_fat_percent: payload.body_fat_percent,
            skeletal_muscle_mass_kg: payload.skeletal_muscle_mass_kg,
            visceral_fat_level: payload.visceral_fat_level,
            inbody_score: payload.inbody_score,
            notes: payload.notes,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DietPlanValidator {
    #[schema(example = json!(["Monday", "Wednesday"]))]
    #[validate(length(min = 1, max = 7, message = "select between 1 and 7 days"))]
    pub days: Vec<String>,

    #[schema(example = json!(["breakfast", "dinner"]))]
    #[validate(length(min = 1, max = 4, message = "select between 1 and 4 meals"))]
    pub meals: Vec<String>,

    #[validate(length(min = 1, message = "goal is required"))]
    pub goal: String,

    #[serde(default)]
    pub preferences: Option<String>,

    #[serde(default)]
    pub allergies: Vec<String>,

    #[serde(default)]
    #[validate(range(min = 800, max = 6000))]
    pub daily_calorie_target: Option<u32>,
}

impl TryFrom<DietPlanValidator> for GenerateDietPlanInput {
    type Error = CoreError;

    fn try_from(payload: DietPlanValidator) -> Result<Self, Self::Error> {
        Ok(Self {
            days: parse_all::<DayName>(&payload.days)?,
            meals: parse_all::<MealName>(&payload.meals)?,
            goal: payload.goal,
            preferences: payload.preferences,
            allergies: payload.allergies,
            daily_calorie_target: payload.daily_calorie_target,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlanValidator {
    #[validate(length(min = 1, max = 7, message = "select between 1 and 7 days"))]
    pub days: Vec<String>,

    #[validate(length(min = 1, message = "goal is required"))]
    pub goal: String,

    #[validate(length(min = 1, message = "fitnessLevel is required"))]
    pub fitness_level: String,

    #[serde(default)]
    pub equipment: Vec<String>,

    /// Free text such as "3 back exercises plus one cardio".
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub requirements: Option<String>,

    #[serde(default)]
    #[validate(range(min = 10, max = 240))]
    pub session_minutes: Option<u32>,
}

impl TryFrom<WorkoutPlanValidator> for GenerateWorkoutPlanInput {
    type Error = CoreError;

    fn try_from(payload: WorkoutPlanValidator) -> Result<Self, Self::Error> {
        Ok(Self {
            days: parse_all::<DayName>(&payload.days)?,
            goal: payload.goal,
            fitness_level: payload.fitness_level,
            equipment: payload.equipment,
            requirements: payload.requirements,
            session_minutes: payload.session_minutes,
        })
    }
}

fn parse_all<T>(values: &[String]) -> Result<BTreeSet<T>, CoreError>
where
    T: std::str::FromStr<Err = CoreError> + Ord,
{
    values.iter().map(|value| value.parse()).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_workout_payload_converts_with_deduplicated_days() {
        let payload: WorkoutPlanValidator = serde_json::from_value(json!({
            "days": ["monday", "Wed", "Monday"],
            "goal": "posture",
            "fitnessLevel": "beginner",
            "sessionMinutes": 30
        }))
        .unwrap();
        assert!(payload.validate().is_ok());

        let input = GenerateWorkoutPlanInput::try_from(payload).unwrap();
        assert_eq!(
            input.days,
            BTreeSet::from([DayName::Monday, DayName::Wednesday])
        );
        assert!(input.equipment.is_empty());
    }

    #[test]
    fn test_unknown_meal_is_rejected() {
        let payload: DietPlanValidator = serde_json::from_value(json!({
            "days": ["Friday"],
            "meals": ["brunch"],
            "goal": "maintain"
        }))
        .unwrap();

        assert!(matches!(
            GenerateDietPlanInput::try_from(payload),
            Err(CoreError::Invalid(_))
        ));
    }

    #[test]
    fn test_empty_days_fail_validation() {
        let payload: WorkoutPlanValidator = serde_json::from_value(json!({
            "days": [],
            "goal": "posture",
            "fitnessLevel": "beginner"
        }))
        .unwrap();

        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_body_payload_range_checks() {
        let payload: AnalyzeBodyValidator = serde_json::from_value(json!({
            "age": 30,
            "heightCm": 10.0,
            "weightKg": 70.0
        }))
        .unwrap();

        assert!(payload.validate().is_err());
    }
}
