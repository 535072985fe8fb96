//! Plain-text summary printed by `detox status`.

use detox_core::{BlockerSummary, DashboardSummary, QuickStats, SessionData};

/// Renders the dashboard as plain text, one fact per line.
pub fn status_report(data: &SessionData) -> String {
    let summary = DashboardSummary::of(data);
    let blocker = BlockerSummary::of(data);
    let quick = QuickStats::of(data);
    let mut lines: Vec<String> = Vec::new();

    lines.push("Today's Overview".to_string());
    for card in &summary.cards {
        lines.push(format!("  {:<18} {}", card.label, card.value));
    }
    lines.push(format!("  {:<18} {}%", "Focus Ratio", quick.focus_ratio_percent));

    lines.push(String::new());
    lines.push(format!(
        "Apps ({} tracked, {} blocked)",
        blocker.tracked_apps, blocker.currently_blocked
    ));
    if summary.apps.is_empty() {
        lines.push("  No apps tracked".to_string());
    }
    for app in &summary.apps {
        lines.push(format!(
            "  {} {:<16} {:<14} {:>4.0}%  {}",
            app.icon,
            app.name,
            app.usage_display,
            app.fraction * 100.0,
            app.status
        ));
    }

    if !summary.achievements.is_empty() {
        lines.push(String::new());
        lines.push("Achievements".to_string());
        for achievement in &summary.achievements {
            lines.push(format!("  * {}", achievement.title));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
