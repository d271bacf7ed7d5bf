use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::entities::app_errors::CoreError, pipeline::validator::SelectionContext,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    BodyAnalysis,
    DietPlan,
    WorkoutPlan,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::BodyAnalysis => "body_analysis",
            RecommendationKind::DietPlan => "diet_plan",
            RecommendationKind::WorkoutPlan => "workout_plan",
        }
    }
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecommendationKind::BodyAnalysis => "body analysis",
            RecommendationKind::DietPlan => "diet plan",
            RecommendationKind::WorkoutPlan => "workout plan",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayName {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayName {
    pub const ALL: [DayName; 7] = [
        DayName::Monday,
        DayName::Tuesday,
        DayName::Wednesday,
        DayName::Thursday,
        DayName::Friday,
        DayName::Saturday,
        DayName::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayName::Monday => "Monday",
            DayName::Tuesday => "Tuesday",
            DayName::Wednesday => "Wednesday",
            DayName::Thursday => "Thursday",
            DayName::Friday => "Friday",
            DayName::Saturday => "Saturday",
            DayName::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayName {
    type Err = CoreError;

    /// Accepts full names and three-letter abbreviations, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        DayName::ALL
            .into_iter()
            .find(|day| {
                let name = day.as_str().to_ascii_lowercase();
                name == wanted || name[..3] == wanted
            })
            .ok_or_else(|| CoreError::Invalid(format!("unknown day: {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealName {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealName {
    pub const ALL: [MealName; 4] = [
        MealName::Breakfast,
        MealName::Lunch,
        MealName::Dinner,
        MealName::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealName::Breakfast => "breakfast",
            MealName::Lunch => "lunch",
            MealName::Dinner => "dinner",
            MealName::Snack => "snack",
        }
    }
}

impl fmt::Display for MealName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        MealName::ALL
            .into_iter()
            .find(|meal| meal.as_str() == wanted)
            .ok_or_else(|| CoreError::Invalid(format!("unknown meal: {s}")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeBodyInput {
    pub sex: Option<String>,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub body_fat_percent: Option<f64>,
    pub skeletal_muscle_mass_kg: Option<f64>,
    pub visceral_fat_level: Option<u32>,
    pub inbody_score: Option<u32>,
    pub notes: Option<String>,
}

impl AnalyzeBodyInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.height_cm <= 0.0 || self.weight_kg <= 0.0 {
            return Err(CoreError::Invalid(
                "height and weight must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        self.weight_kg / (height_m * height_m)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateDietPlanInput {
    pub days: BTreeSet<DayName>,
    pub meals: BTreeSet<MealName>,
    pub goal: String,
    pub preferences: Option<String>,
    pub allergies: Vec<String>,
    pub daily_calorie_target: Option<u32>,
}

impl GenerateDietPlanInput {
    pub fn selection_context(&self) -> Result<SelectionContext, CoreError> {
        if self.days.is_empty() {
            return Err(CoreError::Invalid("at least one day must be selected".to_string()));
        }
        if self.meals.is_empty() {
            return Err(CoreError::Invalid("at least one meal must be selected".to_string()));
        }
        Ok(SelectionContext::new(self.days.clone(), self.meals.clone()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateWorkoutPlanInput {
    pub days: BTreeSet<DayName>,
    pub goal: String,
    pub fitness_level: String,
    pub equipment: Vec<String>,
    /// Free-text wishes such as "3 back exercises plus one cardio".
    pub requirements: Option<String>,
    pub session_minutes: Option<u32>,
}

impl GenerateWorkoutPlanInput {
    pub fn selection_context(&self) -> Result<SelectionContext, CoreError> {
        if self.days.is_empty() {
            return Err(CoreError::Invalid("at least one day must be selected".to_string()));
        }
        Ok(SelectionContext::new(self.days.clone(), BTreeSet::new()))
    }
}
