use crate::{
    progress_ratio, terminal_status, AutoAction, AutoplayConfig, AutoplayError, AutoplayResult,
    FinalMetrics, RunStatus, Simulator, StepRecord, SummaryStats,
};
use chainhand_core::RunState;
use std::time::Instant;

/// Drives `run` with the greedy policy until it finishes or `max_steps`
/// actions have been applied.
pub fn run_autoplay(run: RunState, config: &AutoplayConfig) -> Result<AutoplayResult, AutoplayError> {
    let started_at = Instant::now();
    let mut sim = Simulator::new(run);
    sim.events.drain().for_each(drop);
    let mut records: Vec<StepRecord> = Vec::new();
    let mut plays = 0u32;
    let mut purchases = 0u32;
    let mut status = None;

    for step in 0..config.max_steps {
        let before = sim.metrics();
        if let Some(done) = terminal_status(before) {
            status = Some(done);
            break;
        }
        let Some(action) = sim.greedy_action(config) else {
            status = Some(RunStatus::NoLegalAction);
            break;
        };
        let phase_before = sim.phase_name();
        let action_detail = sim.describe_action(&action);
        let event_count = sim.apply_action(&action)?;
        let after = sim.metrics();
        tracing::debug!(step, action = %action.short_label(), score = after.score, "autoplay step");
        match action {
            AutoAction::Play { .. } => plays += 1,
            AutoAction::Buy { .. } => purchases += 1,
            _ => {}
        }
        records.push(StepRecord {
            step,
            phase_before,
            level_before: before.level,
            target_before: before.target,
            score_before: before.score,
            gold_before: before.gold,
            action,
            action_detail,
            phase_after: sim.phase_name(),
            level_after: after.level,
            target_after: after.target,
            score_after: after.score,
            gold_after: after.gold,
            event_count,
        });
    }

    let status = status
        .or_else(|| terminal_status(sim.metrics()))
        .unwrap_or(RunStatus::MaxSteps);
    let last = sim.metrics();
    tracing::info!(?status, steps = records.len(), score = last.score, "autoplay finished");
    Ok(AutoplayResult {
        status,
        seed: sim.run.seed(),
        final_metrics: FinalMetrics {
            phase: sim.phase_name(),
            level: last.level,
            score: last.score,
            target: last.target,
            gold: last.gold,
            progress: progress_ratio(last),
        },
        level_targets: sim.run.config.level_targets.clone(),
        summary: SummaryStats {
            steps: u32::try_from(records.len()).unwrap_or(u32::MAX),
            plays,
            purchases,
            wall_time_ms: u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX),
        },
        steps: records,
    })
}
