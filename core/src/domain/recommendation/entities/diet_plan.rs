use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::pipeline::decoder::{Coercion, DecodeShape, FieldRule, field};

/// Meals of one day keyed by meal name (`breakfast`, `lunch`, ...).
pub type DayMeals = BTreeMap<String, Meal>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DietPlan {
    pub meal_style: String,
    pub daily_calories: i32,
    pub macro_split: String,
    pub sample_menu: String,
    pub shopping_list: Vec<String>,
    pub precautions: String,
    pub meal_timing: String,
    pub hydration: String,
    pub supplements: String,
    /// Keyed by day name (`Monday`, ...).
    pub diets: BTreeMap<String, DayMeals>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub name: String,
    pub description: String,
    pub calories: i32,
    pub nutrients: Nutrients,
    pub reason: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub tips: String,
    pub unsplash_query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Nutrients {
    pub carbs: String,
    pub protein: String,
    pub fat: String,
}

const NUTRIENT_FIELDS: &[FieldRule] = &[
    field("carbs", Coercion::Text),
    field("protein", Coercion::Text),
    field("fat", Coercion::Text),
];

const MEAL_FIELDS: &[FieldRule] = &[
    field("name", Coercion::Text),
    field("description", Coercion::Text),
    field("calories", Coercion::Integer),
    field("nutrients", Coercion::Record(NUTRIENT_FIELDS)),
    field("reason", Coercion::Text),
    field("ingredients", Coercion::TextList),
    field("instructions", Coercion::Text),
    field("tips", Coercion::Text),
    field("unsplashQuery", Coercion::Text),
];

const MEAL: Coercion = Coercion::Record(MEAL_FIELDS);
const MEALS_BY_NAME: Coercion = Coercion::Map(&MEAL);

impl DecodeShape for DietPlan {
    const NAME: &'static str = "diet plan";
    const FIELDS: &'static [FieldRule] = &[
        field("mealStyle", Coercion::Text),
        field("dailyCalories", Coercion::Integer),
        field("macroSplit", Coercion::Text),
        field("sampleMenu", Coercion::Text),
        field("shoppingList", Coercion::TextList),
        field("precautions", Coercion::Text),
        field("mealTiming", Coercion::Text),
        field("hydration", Coercion::Text),
        field("supplements", Coercion::Text),
        field("diets", Coercion::Map(&MEALS_BY_NAME)),
    ];
}
