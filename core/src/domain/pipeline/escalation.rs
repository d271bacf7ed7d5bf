use std::fmt::Write as _;

use crate::domain::{
    llm::entities::Prompt,
    pipeline::{
        orchestrator::{AttemptOutcome, AttemptRecord},
        validator::MIN_EXERCISES_PER_DAY,
    },
};

/// Builds the prompt for `attempt` from the original prompt and the previous
/// attempt's record.
///
/// Corrections are always appended to `base`, never to an already escalated
/// prompt, so they do not pile up across attempts.
pub fn escalate(base: &Prompt, last: &AttemptRecord, attempt: u32) -> Prompt {
    let mut correction = format!("\n\nCorrection for attempt {attempt}:\n");
    line(
        &mut correction,
        "Reply with exactly one JSON object and nothing else: no markdown fences, no commentary.",
    );

    match &last.outcome {
        AttemptOutcome::ExtractionFailure => line(
            &mut correction,
            "The previous reply did not contain a complete JSON object. Make sure every brace and quote is closed.",
        ),
        AttemptOutcome::DecodeFailure { reason } => line(
            &mut correction,
            &format!(
                "The previous reply did not match the required structure ({reason}). Use the field names and value types of the template exactly."
            ),
        ),
        AttemptOutcome::GatewayFailure { .. }
        | AttemptOutcome::ValidationFailure
        | AttemptOutcome::Success => {}
    }

    if let Some(report) = &last.report {
        if !report.missing_keys.is_empty() {
            line(
                &mut correction,
                &format!("Add the missing keys: {}.", join(report.missing_keys.iter())),
            );
        }
        if !report.under_count_days.is_empty() {
            let days = report
                .under_count_days
                .iter()
                .map(|(day, count)| format!("{day} (had {count})"));
            line(
                &mut correction,
                &format!(
                    "Give each of these days at least {MIN_EXERCISES_PER_DAY} items: {}.",
                    join(days)
                ),
            );
        }
        if !report.extra_keys.is_empty() {
            line(
                &mut correction,
                &format!(
                    "Remove keys that were not requested: {}.",
                    join(report.extra_keys.iter())
                ),
            );
        }
    }

    if let Some(hint) = &base.corrective_hint {
        line(&mut correction, hint);
    }

    Prompt {
        system: base.system.clone(),
        user: format!("{}{}", base.user, correction.trim_end()),
        corrective_hint: base.corrective_hint.clone(),
    }
}

fn line(buffer: &mut String, text: &str) {
    let _ = writeln!(buffer, "- {text}");
}

fn join<I, S>(items: I) -> String
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    items
        .map(|item| item.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;
    use crate::domain::{llm::entities::GatewayError, pipeline::validator::ValidationReport};

    fn record(outcome: AttemptOutcome, report: Option<ValidationReport>) -> AttemptRecord {
        AttemptRecord {
            index: 1,
            outcome,
            report,
            completion_tokens: None,
        }
    }

    #[test]
    fn test_validation_failure_lists_corrections() {
        let base = Prompt::new("system", "Plan Monday, Wednesday and Friday.")
            .with_corrective_hint("Only use the selected days.");
        let report = ValidationReport {
            missing_keys: BTreeSet::from(["Friday".to_string()]),
            extra_keys: BTreeSet::from(["Sunday".to_string()]),
            under_count_days: BTreeMap::from([("Wednesday".to_string(), 2)]),
        };

        let escalated = escalate(&base, &record(AttemptOutcome::ValidationFailure, Some(report)), 2);

        assert_eq!(escalated.system, "system");
        assert!(escalated.user.starts_with("Plan Monday, Wednesday and Friday."));
        assert!(escalated.user.contains("Correction for attempt 2:"));
        assert!(escalated.user.contains("- Add the missing keys: Friday."));
        assert!(
            escalated
                .user
                .contains("- Give each of these days at least 3 items: Wednesday (had 2).")
        );
        assert!(escalated.user.contains("- Remove keys that were not requested: Sunday."));
        assert!(escalated.user.ends_with("- Only use the selected days."));
    }

    #[test]
    fn test_extraction_failure_asks_for_complete_object() {
        let base = Prompt::new("system", "Analyze me.");
        let escalated = escalate(&base, &record(AttemptOutcome::ExtractionFailure, None), 2);

        assert!(escalated.user.contains("did not contain a complete JSON object"));
        assert!(!escalated.user.contains("missing keys"));
    }

    #[test]
    fn test_escalation_does_not_accumulate() {
        let base = Prompt::new("system", "Plan.");
        let failed = record(
            AttemptOutcome::GatewayFailure {
                error: GatewayError::NoChoices,
            },
            None,
        );

        let second = escalate(&base, &failed, 2);
        let third = escalate(&base, &failed, 3);

        assert_eq!(third.user.matches("Correction for attempt").count(), 1);
        assert_eq!(
            second.user.replace("attempt 2", "attempt 3"),
            third.user
        );
    }
}
