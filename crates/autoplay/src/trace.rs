use crate::{AutoAction, AutoplayError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Failed,
    MaxSteps,
    NoLegalAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: u32,
    pub phase_before: String,
    pub level_before: u8,
    pub target_before: f64,
    pub score_before: f64,
    pub gold_before: f64,
    pub action: AutoAction,
    #[serde(default)]
    pub action_detail: Option<String>,
    pub phase_after: String,
    pub level_after: u8,
    pub target_after: f64,
    pub score_after: f64,
    pub gold_after: f64,
    pub event_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalMetrics {
    pub phase: String,
    pub level: u8,
    pub score: f64,
    pub target: f64,
    pub gold: f64,
    pub progress: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    pub steps: u32,
    pub plays: u32,
    pub purchases: u32,
    pub wall_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoplayResult {
    pub status: RunStatus,
    pub seed: u64,
    pub final_metrics: FinalMetrics,
    #[serde(default)]
    pub level_targets: Vec<f64>,
    pub steps: Vec<StepRecord>,
    pub summary: SummaryStats,
}

impl AutoplayResult {
    pub fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!("status: {}", run_status_label(self.status)),
            format!("seed: {}", self.seed),
            format!(
                "final: {} level {} score {}/{} gold {} progress {:.0}%",
                self.final_metrics.phase,
                self.final_metrics.level,
                self.final_metrics.score,
                self.final_metrics.target,
                self.final_metrics.gold,
                self.final_metrics.progress * 100.0
            ),
            format!(
                "summary: steps={} plays={} purchases={} wall_ms={}",
                self.summary.steps,
                self.summary.plays,
                self.summary.purchases,
                self.summary.wall_time_ms
            ),
            String::new(),
            "level targets:".to_string(),
        ];
        if self.level_targets.is_empty() {
            lines.push("  (none)".to_string());
        } else {
            for (idx, target) in self.level_targets.iter().enumerate() {
                lines.push(format!("  level {:>2}: {}", idx + 1, target));
            }
        }
        lines.push(String::new());
        lines.push("steps:".to_string());
        for step in &self.steps {
            lines.push(format!(
                "  step {:>4} | {}",
                step.step,
                step.action.short_label()
            ));
            lines.push(format!(
                "    state: {} level {} target {} score {} gold {}",
                step.phase_before,
                step.level_before,
                step.target_before,
                step.score_before,
                step.gold_before
            ));
            lines.push(format!(
                "      -> {} level {} target {} score {} gold {}",
                step.phase_after,
                step.level_after,
                step.target_after,
                step.score_after,
                step.gold_after
            ));
            lines.push(format!("    events: {}", step.event_count));
            if let Some(detail) = step.action_detail.as_ref() {
                for row in detail.lines() {
                    lines.push(format!("    detail: {row}"));
                }
            }
            lines.push(String::new());
        }
        lines.join("\n")
    }
}

fn run_status_label(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Completed => "Completed",
        RunStatus::Failed => "Failed",
        RunStatus::MaxSteps => "MaxSteps",
        RunStatus::NoLegalAction => "NoLegalAction",
    }
}

pub fn write_json(path: &Path, result: &AutoplayResult) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(result)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn write_text(path: &Path, result: &AutoplayResult) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, result.to_text_report())?;
    Ok(())
}
