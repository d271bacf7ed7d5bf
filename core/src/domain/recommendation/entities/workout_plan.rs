use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::pipeline::decoder::{Coercion, DecodeShape, FieldRule, field};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub program_name: String,
    pub weekly_schedule: String,
    pub caution: String,
    pub warmup: String,
    pub main_sets: String,
    pub cooldown: String,
    pub equipment: Vec<String>,
    pub target_muscles: Vec<String>,
    pub expected_results: String,
    /// Keyed by day name (`Monday`, ...).
    pub workouts: BTreeMap<String, Vec<Exercise>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    pub description: String,
    /// Minutes.
    pub duration: i32,
    pub intensity: String,
    pub difficulty: String,
    pub calories: i32,
    #[serde(rename = "type")]
    pub exercise_type: String,
    pub exercise_category: String,
    pub reason: String,
    pub part: String,
    pub target_muscles: Vec<String>,
    pub sets: i32,
    pub reps: i32,
    pub rest_time: String,
    pub steps: Vec<String>,
    pub effects: Vec<String>,
    pub tips: String,
    pub caution: String,
    pub video_url: String,
    pub youtube_query: String,
    pub unsplash_query: String,
}

const EXERCISE_FIELDS: &[FieldRule] = &[
    field("name", Coercion::Text),
    field("description", Coercion::Text),
    field("duration", Coercion::Integer),
    field("intensity", Coercion::Text),
    field("difficulty", Coercion::Text),
    field("calories", Coercion::Integer),
    field("type", Coercion::Text),
    field("exerciseCategory", Coercion::Text),
    field("reason", Coercion::Text),
    field("part", Coercion::Text),
    field("targetMuscles", Coercion::TextList),
    field("sets", Coercion::Integer),
    field("reps", Coercion::Integer),
    field("restTime", Coercion::Text),
    field("steps", Coercion::TextList),
    field("effects", Coercion::TextList),
    field("tips", Coercion::Text),
    field("caution", Coercion::Text),
    field("videoUrl", Coercion::Text),
    field("youtubeQuery", Coercion::Text),
    field("unsplashQuery", Coercion::Text),
];

const EXERCISE: Coercion = Coercion::Record(EXERCISE_FIELDS);
const EXERCISE_LIST: Coercion = Coercion::List(&EXERCISE);

impl DecodeShape for WorkoutPlan {
    const NAME: &'static str = "workout plan";
    const FIELDS: &'static [FieldRule] = &[
        field("programName", Coercion::Text),
        field("weeklySchedule", Coercion::Text),
        field("caution", Coercion::Text),
        field("warmup", Coercion::Text),
        field("mainSets", Coercion::Text),
        field("cooldown", Coercion::Text),
        field("equipment", Coercion::TextList),
        field("targetMuscles", Coercion::TextList),
        field("expectedResults", Coercion::Text),
        field("workouts", Coercion::Map(&EXERCISE_LIST)),
    ];
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::pipeline::{decoder::decode, extractor::extract};

    #[test]
    fn test_round_trip_through_decoder() {
        let plan = fixtures::plan(&[("Monday", 3), ("Thursday", 4)]);
        let encoded = serde_json::to_string(&plan).unwrap();

        let decoded: WorkoutPlan = decode(&extract(&encoded).unwrap()).unwrap();
        assert_eq!(decoded, plan);
    }

    #[test]
    fn test_type_field_uses_wire_name() {
        let value = serde_json::to_value(fixtures::exercise("row")).unwrap();
        assert_eq!(value["type"], "strength");
        assert!(value.get("exerciseType").is_none());
    }

    #[test]
    fn test_loose_exercise_fields_are_coerced() {
        let raw = json!({
            "programName": "Starter",
            "equipment": "dumbbells",
            "workouts": {
                "Monday": [
                    {"name": "Row", "sets": "3", "reps": "12 reps", "duration": 8.4, "steps": "Pull"},
                    {"name": "Plank", "sets": 3, "reps": 1, "type": "core"}
                ],
                "Wednesday": {"name": "Jog", "duration": "20 min", "type": "cardio"}
            }
        })
        .to_string();

        let plan: WorkoutPlan = decode(&extract(&raw).unwrap()).unwrap();
        assert_eq!(plan.equipment, vec!["dumbbells".to_string()]);

        let monday = &plan.workouts["Monday"];
        assert_eq!(monday.len(), 2);
        assert_eq!(monday[0].sets, 3);
        assert_eq!(monday[0].reps, 12);
        assert_eq!(monday[0].duration, 8);
        assert_eq!(monday[0].steps, vec!["Pull".to_string()]);
        assert_eq!(monday[1].exercise_type, "core");

        assert_eq!(plan.workouts["Wednesday"][0].duration, 20);
    }

    #[test]
    fn test_non_numeric_reps_keep_the_plan() {
        let plan = fixtures::plan(&[("Monday", 3), ("Thursday", 3)]);
        let mut raw = serde_json::to_value(plan).unwrap();
        raw["workouts"]["Monday"][2]["reps"] = json!("max");
        raw["workouts"]["Thursday"][0]["reps"] = json!("to failure");

        let plan: WorkoutPlan = decode(&extract(&raw.to_string()).unwrap()).unwrap();
        assert_eq!(plan.workouts["Monday"].len(), 3);
        assert_eq!(plan.workouts["Thursday"].len(), 3);
        assert_eq!(plan.workouts["Monday"][2].reps, 0);
        assert_eq!(plan.workouts["Thursday"][0].reps, 0);
        assert_eq!(plan.workouts["Monday"][0].reps, 10);
    }
}
