pub mod body_analysis;
pub mod diet_plan;
pub mod recommendation;
pub mod workout_plan;

pub use body_analysis::*;
pub use diet_plan::*;
pub use recommendation::*;
pub use workout_plan::*;
