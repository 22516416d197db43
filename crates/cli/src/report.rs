//! Rendering of run and check results for the terminal.

use std::path::Path;

use sectiongen_core::{BalanceReport, RunReport, SchemaOrigin, StepStatus};

use crate::OutputFormat;

fn origin_label(origin: &SchemaOrigin) -> &'static str {
    match origin {
        SchemaOrigin::Service => "service",
        SchemaOrigin::Supplied => "supplied",
        SchemaOrigin::Fallback { .. } => "fallback",
    }
}

fn status_label(status: &StepStatus) -> &'static str {
    match status {
        StepStatus::Done => "done",
        StepStatus::Unchanged => "unchanged",
        StepStatus::Failed(_) => "failed",
    }
}

pub fn run_to_json(report: &RunReport) -> serde_json::Value {
    let fallback_reason = match &report.origin {
        SchemaOrigin::Fallback { reason } => Some(reason.clone()),
        _ => None,
    };
    let steps: Vec<serde_json::Value> = report
        .steps
        .iter()
        .map(|s| {
            let mut entry = serde_json::json!({
                "step": s.step.to_string(),
                "status": status_label(&s.status),
                "detail": s.detail,
            });
            if let StepStatus::Failed(reason) = &s.status {
                entry["error"] = serde_json::Value::String(reason.clone());
            }
            entry
        })
        .collect();
    serde_json::json!({
        "success": report.success(),
        "dry_run": report.dry_run,
        "component_name": report.schema.component_name,
        "display_name": report.schema.display_name,
        "layout": report.schema.layout_type.as_str(),
        "origin": origin_label(&report.origin),
        "fallback_reason": fallback_reason,
        "steps": steps,
        "files": report.files.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        "warnings": report.warnings,
        "next_steps": report.next_steps,
        "error": report.error.as_ref().map(|e| e.to_string()),
    })
}

/// Print a run report; failures go to stderr through `report_error`.
pub fn print_run(report: &RunReport, output: OutputFormat, quiet: bool) {
    if let OutputFormat::Json = output {
        if !quiet {
            let json = serde_json::to_string_pretty(&run_to_json(report))
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", json);
        }
        return;
    }

    if !quiet {
        let schema = &report.schema;
        println!(
            "{}{} ({}, {})",
            if report.dry_run { "[dry run] " } else { "" },
            schema.component_name,
            schema.display_name,
            origin_label(&report.origin)
        );
        for step in &report.steps {
            let mark = match &step.status {
                StepStatus::Done => "ok",
                StepStatus::Unchanged => "--",
                StepStatus::Failed(_) => "!!",
            };
            if step.detail.is_empty() {
                println!("  [{}] {}", mark, step.step);
            } else {
                println!("  [{}] {}: {}", mark, step.step, step.detail);
            }
        }
        for warning in &report.warnings {
            println!("warning: {}", warning);
        }
    }

    if let Some(err) = &report.error {
        crate::report_error(&format!("error: {}", err), output, quiet);
        return;
    }

    if !quiet {
        println!();
        println!(
            "{} {} file(s):",
            if report.dry_run { "Would write" } else { "Wrote" },
            report.files.len()
        );
        for file in &report.files {
            println!("  {}", file.display());
        }
        println!();
        println!("Next steps:");
        for (i, step) in report.next_steps.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
    }
}

pub fn check_to_json(path: &Path, report: &BalanceReport) -> serde_json::Value {
    serde_json::json!({
        "file": path.display().to_string(),
        "balanced": report.is_balanced(),
        "braces": [report.open_braces, report.close_braces],
        "parens": [report.open_parens, report.close_parens],
        "warnings": report.warnings().iter().map(|w| w.to_string()).collect::<Vec<_>>(),
    })
}

pub fn print_check_text(path: &Path, report: &BalanceReport) {
    let warnings = report.warnings();
    if warnings.is_empty() {
        println!("{}: balanced", path.display());
    }
    for warning in warnings {
        println!("{}: warning: {}", path.display(), warning);
    }
}
