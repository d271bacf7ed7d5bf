//! JSON templates embedded in prompts so the model sees the exact wire shape.

use serde_json::{Map, Value, json};

use crate::domain::pipeline::validator::SelectionContext;

pub fn get_body_analysis_template() -> Value {
    json!({
        "label": "string, one body type label",
        "summary": "string",
        "reasoning": "string",
        "tips": "string",
        "healthRisk": "string",
        "muscleBalance": "string",
        "metabolicHealth": "string",
        "bodyComposition": "string",
        "bmiCategory": "string",
        "bodyFatCategory": "string",
        "visceralFatCategory": "string",
        "inbodyScore": 0,
        "analysisMethod": "llm"
    })
}

fn meal_template() -> Value {
    json!({
        "name": "string",
        "description": "string",
        "calories": 0,
        "nutrients": { "carbs": "string", "protein": "string", "fat": "string" },
        "reason": "string",
        "ingredients": ["string"],
        "instructions": "string",
        "tips": "string",
        "unsplashQuery": "string, English search keywords"
    })
}

/// Diet plan template whose `diets` map has exactly the selected days and
/// meals.
pub fn get_diet_plan_template(ctx: &SelectionContext) -> Value {
    let diets: Map<String, Value> = ctx
        .selected_days
        .iter()
        .map(|day| {
            let meals: Map<String, Value> = ctx
                .selected_meals
                .iter()
                .map(|meal| (meal.to_string(), meal_template()))
                .collect();
            (day.to_string(), Value::Object(meals))
        })
        .collect();

    json!({
        "mealStyle": "string",
        "dailyCalories": 0,
        "macroSplit": "string",
        "sampleMenu": "string",
        "shoppingList": ["string"],
        "precautions": "string",
        "mealTiming": "string",
        "hydration": "string",
        "supplements": "string",
        "diets": diets
    })
}

fn exercise_template() -> Value {
    json!({
        "name": "string",
        "description": "string",
        "duration": 0,
        "intensity": "low | moderate | high",
        "difficulty": "beginner | intermediate | advanced",
        "calories": 0,
        "type": "string",
        "exerciseCategory": "string",
        "reason": "string",
        "part": "string",
        "targetMuscles": ["string"],
        "sets": 0,
        "reps": 0,
        "restTime": "string",
        "steps": ["string"],
        "effects": ["string"],
        "tips": "string",
        "caution": "string",
        "videoUrl": "string",
        "youtubeQuery": "string",
        "unsplashQuery": "string"
    })
}

/// Workout plan template with one exercise placeholder per selected day.
pub fn get_workout_plan_template(ctx: &SelectionContext) -> Value {
    let workouts: Map<String, Value> = ctx
        .selected_days
        .iter()
        .map(|day| (day.to_string(), json!([exercise_template()])))
        .collect();

    json!({
        "programName": "string",
        "weeklySchedule": "string",
        "caution": "string",
        "warmup": "string",
        "mainSets": "string",
        "cooldown": "string",
        "equipment": ["string"],
        "targetMuscles": ["string"],
        "expectedResults": "string",
        "workouts": workouts
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::{
        pipeline::decoder::DecodeShape,
        recommendation::{
            entities::{BodyAnalysisResult, DietPlan, WorkoutPlan},
            value_objects::{DayName, MealName},
        },
    };

    fn keys(value: &Value) -> BTreeSet<String> {
        value.as_object().unwrap().keys().cloned().collect()
    }

    fn field_names<T: DecodeShape>() -> BTreeSet<String> {
        T::FIELDS.iter().map(|rule| rule.name.to_string()).collect()
    }

    #[test]
    fn test_templates_match_decode_fields() {
        let ctx = SelectionContext::new(
            BTreeSet::from([DayName::Monday]),
            BTreeSet::from([MealName::Lunch]),
        );

        assert_eq!(keys(&get_body_analysis_template()), field_names::<BodyAnalysisResult>());
        assert_eq!(keys(&get_diet_plan_template(&ctx)), field_names::<DietPlan>());
        assert_eq!(keys(&get_workout_plan_template(&ctx)), field_names::<WorkoutPlan>());
    }

    #[test]
    fn test_diet_template_lists_selected_days_and_meals() {
        let ctx = SelectionContext::new(
            BTreeSet::from([DayName::Tuesday, DayName::Friday]),
            BTreeSet::from([MealName::Breakfast, MealName::Snack]),
        );

        let template = get_diet_plan_template(&ctx);
        let diets = &template["diets"];

        assert_eq!(keys(diets), BTreeSet::from(["Friday".to_string(), "Tuesday".to_string()]));
        assert_eq!(
            keys(&diets["Tuesday"]),
            BTreeSet::from(["breakfast".to_string(), "snack".to_string()])
        );
    }
}
