use std::sync::Arc;

use vitalcoach_core::application::VitalCoachService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: VitalCoachService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: VitalCoachService) -> Self {
        Self { args, service }
    }
}
