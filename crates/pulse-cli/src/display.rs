//! Terminal rendering of the derived session view.

use colored::Colorize;
use pulse_core::{IssueStatus, PipelineStage, SessionState, Severity};
use pulse_proto::ActorKind;
use std::fmt::Write;

/// Renders the full derived view: stage rail, actor turn, issues, and the
/// bounded event window.
pub fn render_session(session: &SessionState) -> String {
    let mut out = String::new();

    render_stages(&mut out, session);
    render_turn(&mut out, session);
    render_issues(&mut out, session);
    render_window(&mut out, session);

    out
}

fn render_stages(out: &mut String, session: &SessionState) {
    let state = session.step_state();

    let rail = PipelineStage::ALL
        .iter()
        .map(|&stage| {
            let label = stage.label();
            if stage == state.current_stage && !state.is_completed(stage) {
                format!("{} {}", "◉".yellow(), label.yellow().bold())
            } else if state.is_completed(stage) {
                format!("{} {}", "●".green(), label.green())
            } else {
                format!("{} {}", "○".dimmed(), label.dimmed())
            }
        })
        .collect::<Vec<_>>()
        .join("  ");

    let _ = writeln!(out, "{rail}");
}

fn render_turn(out: &mut String, session: &SessionState) {
    let turn = session.turn();
    let actor = match turn.actor {
        ActorKind::User => "your turn".cyan().bold(),
        ActorKind::Ai => "assistant".magenta(),
    };
    let _ = writeln!(out, "{} {} {}", actor, "·".dimmed(), turn.message);
}

fn render_issues(out: &mut String, session: &SessionState) {
    let report = session.issue_report();
    if report.issues.is_empty() {
        return;
    }

    let _ = writeln!(out);
    for issue in &report.issues {
        let severity = match issue.severity {
            Severity::Critical => "critical".red().bold(),
            Severity::Error => "error".red(),
            Severity::Warning => "warning".yellow(),
            Severity::Info => "info".normal(),
        };
        let status = match issue.status {
            IssueStatus::Active => "active".red(),
            IssueStatus::Fixing => "fixing".yellow(),
            IssueStatus::Resolved => "resolved".green(),
        };
        let _ = writeln!(
            out,
            "  {:10} {:9} {:9} {} {}",
            issue.id.dimmed(),
            severity,
            status,
            issue.category,
            format!("- {}", issue.message).dimmed()
        );
    }

    let stats = report.stats;
    let _ = writeln!(
        out,
        "  {} active, {} fixing, {} resolved ({} critical, {} errors, {} warnings)",
        stats.active, stats.fixing, stats.resolved, stats.critical, stats.errors, stats.warnings
    );
}

fn render_window(out: &mut String, session: &SessionState) {
    let window = session.window();
    let _ = writeln!(out);

    for section in &window.summarized_sections {
        let _ = writeln!(
            out,
            "  {} {} earlier events ({} .. {}){}",
            "▸".dimmed(),
            section.count,
            section.start.format("%H:%M:%S"),
            section.end.format("%H:%M:%S"),
            if section.expanded { " [expanded]" } else { "" }
        );
    }

    for event in &window.recent_events {
        let status = match event.status.as_str() {
            "passed" => event.status.as_str().green(),
            "failed" => event.status.as_str().red(),
            "pending" => event.status.as_str().yellow(),
            _ => event.status.as_str().normal(),
        };
        let _ = writeln!(
            out,
            "  {} {:9} {} ({})",
            event.timestamp.format("%H:%M:%S").to_string().dimmed(),
            status,
            event.step,
            event.who
        );
    }

    let _ = writeln!(
        out,
        "  {} of {} events shown",
        window.recent_events.len(),
        window.total_events()
    );
}
