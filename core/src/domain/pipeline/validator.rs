use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::recommendation::{
    entities::{BodyAnalysisResult, DietPlan, WorkoutPlan},
    value_objects::{DayName, MealName},
};

/// Minimum number of exercises every selected workout day must carry.
pub const MIN_EXERCISES_PER_DAY: usize = 3;

/// What the user asked for, derived once per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionContext {
    pub selected_days: BTreeSet<DayName>,
    pub selected_meals: BTreeSet<MealName>,
}

impl SelectionContext {
    pub fn new(selected_days: BTreeSet<DayName>, selected_meals: BTreeSet<MealName>) -> Self {
        Self {
            selected_days,
            selected_meals,
        }
    }

    fn is_selected_day(&self, key: &str) -> bool {
        self.selected_days.iter().any(|day| day.as_str() == key)
    }

    fn is_selected_meal(&self, key: &str) -> bool {
        self.selected_meals.iter().any(|meal| meal.as_str() == key)
    }
}

/// Invariant violations found in a decoded result.
///
/// Only `missing_keys` and `under_count_days` make a result invalid;
/// `extra_keys` is kept for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub missing_keys: BTreeSet<String>,
    pub extra_keys: BTreeSet<String>,
    pub under_count_days: BTreeMap<String, usize>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.missing_keys.is_empty() && self.under_count_days.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.is_valid() && self.extra_keys.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.missing_keys.is_empty() {
            parts.push(format!("missing keys: {}", join(&self.missing_keys)));
        }
        if !self.under_count_days.is_empty() {
            let days = self
                .under_count_days
                .iter()
                .map(|(day, count)| format!("{day} ({count})"))
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!(
                "days with fewer than {MIN_EXERCISES_PER_DAY} items: {days}"
            ));
        }
        if !self.extra_keys.is_empty() {
            parts.push(format!("unexpected keys: {}", join(&self.extra_keys)));
        }

        if parts.is_empty() {
            f.write_str("no violations")
        } else {
            f.write_str(&parts.join("; "))
        }
    }
}

fn join(keys: &BTreeSet<String>) -> String {
    keys.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Top-level `label` and `summary` must be present and non-blank.
pub fn validate_body_analysis(result: &BodyAnalysisResult) -> ValidationReport {
    let mut report = ValidationReport::default();
    for (key, value) in [("label", &result.label), ("summary", &result.summary)] {
        if value.trim().is_empty() {
            report.missing_keys.insert(key.to_string());
        }
    }
    report
}

/// Every selected day must be planned with every selected meal.
///
/// Missing meals are reported as `Day.meal`; unselected days and meals land in
/// `extra_keys`.
pub fn validate_diet_plan(plan: &DietPlan, ctx: &SelectionContext) -> ValidationReport {
    let mut report = ValidationReport::default();

    for day in &ctx.selected_days {
        let Some(meals) = plan.diets.get(day.as_str()) else {
            report.missing_keys.insert(day.to_string());
            continue;
        };

        for meal in &ctx.selected_meals {
            if !meals.contains_key(meal.as_str()) {
                report.missing_keys.insert(format!("{day}.{meal}"));
            }
        }
        for key in meals.keys().filter(|key| !ctx.is_selected_meal(key)) {
            report.extra_keys.insert(format!("{day}.{key}"));
        }
    }

    for key in plan.diets.keys().filter(|key| !ctx.is_selected_day(key)) {
        report.extra_keys.insert(key.clone());
    }

    report
}

/// Every selected day must be present with at least
/// [`MIN_EXERCISES_PER_DAY`] exercises.
///
/// Category quotas written into the free-text request ("3 back exercises plus
/// one cardio") are relayed through the prompt only and not checked here.
pub fn validate_workout_plan(plan: &WorkoutPlan, ctx: &SelectionContext) -> ValidationReport {
    let mut report = ValidationReport::default();

    for day in &ctx.selected_days {
        match plan.workouts.get(day.as_str()) {
            None => {
                report.missing_keys.insert(day.to_string());
            }
            Some(exercises) if exercises.len() < MIN_EXERCISES_PER_DAY => {
                report
                    .under_count_days
                    .insert(day.to_string(), exercises.len());
            }
            Some(_) => {}
        }
    }

    for key in plan.workouts.keys().filter(|key| !ctx.is_selected_day(key)) {
        report.extra_keys.insert(key.clone());
    }

    report
}
