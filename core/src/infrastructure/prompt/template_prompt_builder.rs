use std::{collections::BTreeSet, fmt::Write as _};

use crate::domain::{
    llm::entities::Prompt,
    pipeline::validator::{MIN_EXERCISES_PER_DAY, SelectionContext},
    recommendation::{
        ports::PromptBuilder,
        schema::{get_body_analysis_template, get_diet_plan_template, get_workout_plan_template},
        value_objects::{
            AnalyzeBodyInput, DayName, GenerateDietPlanInput, GenerateWorkoutPlanInput, MealName,
        },
    },
};

const JSON_ONLY: &str = "Answer with a single JSON object that follows the template exactly. \
                         Do not wrap it in markdown and do not add any text before or after it.";

const BODY_ANALYSIS_SYSTEM: &str = "You are a certified body composition analyst. \
                                    You classify body types from measurements and explain the result in plain language.";

const DIET_PLAN_SYSTEM: &str = "You are a registered dietitian who writes practical weekly meal plans.";

const WORKOUT_PLAN_SYSTEM: &str = "You are a certified personal trainer who writes safe weekly workout programs.";

/// Builds prompts from fixed wording plus the request data and the JSON
/// template of the expected answer.
#[derive(Debug, Clone, Default)]
pub struct TemplatePromptBuilder;

impl TemplatePromptBuilder {
    pub fn new() -> Self {
        Self
    }
}

fn system(role: &str) -> String {
    format!("{role}\n{JSON_ONLY}")
}

fn days_list(days: &BTreeSet<DayName>) -> String {
    days.iter().map(DayName::as_str).collect::<Vec<_>>().join(", ")
}

fn meals_list(meals: &BTreeSet<MealName>) -> String {
    meals.iter().map(MealName::as_str).collect::<Vec<_>>().join(", ")
}

fn optional_line(buffer: &mut String, label: &str, value: Option<impl std::fmt::Display>) {
    if let Some(value) = value {
        let _ = writeln!(buffer, "- {label}: {value}");
    }
}

impl PromptBuilder for TemplatePromptBuilder {
    fn body_analysis_prompt(&self, input: &AnalyzeBodyInput) -> Prompt {
        let mut user = String::from("Analyze the body type of this person.\n\nMeasurements:\n");
        optional_line(&mut user, "Sex", input.sex.as_deref());
        let _ = writeln!(user, "- Age: {}", input.age);
        let _ = writeln!(user, "- Height: {:.1} cm", input.height_cm);
        let _ = writeln!(user, "- Weight: {:.1} kg", input.weight_kg);
        let _ = writeln!(user, "- BMI: {:.1}", input.bmi());
        optional_line(&mut user, "Body fat (%)", input.body_fat_percent);
        optional_line(
            &mut user,
            "Skeletal muscle mass (kg)",
            input.skeletal_muscle_mass_kg,
        );
        optional_line(&mut user, "Visceral fat level", input.visceral_fat_level);
        optional_line(&mut user, "InBody score", input.inbody_score);
        optional_line(&mut user, "Notes", input.notes.as_deref());

        let _ = write!(
            user,
            "\nSet \"analysisMethod\" to \"llm\". Template:\n{:#}",
            get_body_analysis_template()
        );

        Prompt::new(system(BODY_ANALYSIS_SYSTEM), user)
            .with_corrective_hint("\"label\" and \"summary\" must be non-empty strings.")
    }

    fn diet_plan_prompt(&self, input: &GenerateDietPlanInput) -> Prompt {
        let ctx = SelectionContext::new(input.days.clone(), input.meals.clone());
        let days = days_list(&input.days);
        let meals = meals_list(&input.meals);

        let mut user = format!("Write a diet plan for the goal: {}.\n\n", input.goal);
        let _ = writeln!(user, "- Days: {days}");
        let _ = writeln!(user, "- Meals per day: {meals}");
        optional_line(&mut user, "Daily calorie target", input.daily_calorie_target);
        optional_line(&mut user, "Preferences", input.preferences.as_deref());
        if !input.allergies.is_empty() {
            let _ = writeln!(
                user,
                "- Allergies (never use these ingredients): {}",
                input.allergies.join(", ")
            );
        }

        let _ = write!(
            user,
            "\n\"diets\" must contain exactly the days {days}, each with exactly the meals {meals}. \
             Template:\n{:#}",
            get_diet_plan_template(&ctx)
        );

        Prompt::new(system(DIET_PLAN_SYSTEM), user).with_corrective_hint(format!(
            "Plan only the days {days} and only the meals {meals}."
        ))
    }

    fn workout_plan_prompt(&self, input: &GenerateWorkoutPlanInput) -> Prompt {
        let ctx = SelectionContext::new(input.days.clone(), BTreeSet::new());
        let days = days_list(&input.days);

        let mut user = format!("Write a workout program for the goal: {}.\n\n", input.goal);
        let _ = writeln!(user, "- Training days: {days}");
        let _ = writeln!(user, "- Fitness level: {}", input.fitness_level);
        if !input.equipment.is_empty() {
            let _ = writeln!(user, "- Available equipment: {}", input.equipment.join(", "));
        }
        optional_line(&mut user, "Minutes per session", input.session_minutes);
        optional_line(&mut user, "Requirements", input.requirements.as_deref());

        let _ = write!(
            user,
            "\n\"workouts\" must contain exactly the days {days}, each with at least \
             {MIN_EXERCISES_PER_DAY} exercises. Respect every requirement above when choosing \
             exercises. Template:\n{:#}",
            get_workout_plan_template(&ctx)
        );

        Prompt::new(system(WORKOUT_PLAN_SYSTEM), user).with_corrective_hint(format!(
            "Every day among {days} needs at least {MIN_EXERCISES_PER_DAY} exercises; no other days."
        ))
    }
}
