pub mod analyze_body;
pub mod generate_diet_plan;
pub mod generate_workout_plan;
