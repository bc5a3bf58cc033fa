// Result and usage text printed once the terminal has been restored.

use crate::domain::tuning::Difficulty;
use crate::domain::{RunReport, Verdict};
use std::fmt::Write;

const RULE: &str = "========================================";

pub fn to_text(report: &RunReport) -> String {
    let verdict = match report.verdict {
        Verdict::DefeatOverrun => "*** DEFEAT! (too many reached the ground) ***",
        Verdict::Victory => "*** VICTORY! ***",
        Verdict::DefeatShortfall => "*** DEFEAT! (destroyed less than half) ***",
    };

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{RULE}\n               GAME OVER\n{RULE}");
    let _ = writeln!(out, "Difficulty: {}", report.difficulty);
    let _ = writeln!(out, "Final Score: {}", report.score);
    let _ = writeln!(
        out,
        "Threats Destroyed: {} / {}",
        report.destroyed, report.total
    );
    let _ = writeln!(out, "Threats Reached Ground: {}", report.reached);
    let _ = writeln!(
        out,
        "Shots: {} | Hits: {} | Accuracy: {:.1}%",
        report.shots_fired, report.shots_hit, report.accuracy
    );
    let _ = writeln!(out, "Best Streak: {}", report.best_streak);
    let _ = writeln!(out, "Time: {}s", report.elapsed_secs);
    let _ = writeln!(out, "{verdict}");
    let _ = write!(out, "{RULE}");
    out
}

pub fn to_json(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

pub fn usage() -> String {
    let mut out = String::from("Usage: skyshield [difficulty]\n\n");
    for tier in Difficulty::PRESETS {
        let spawn = if tier.spawn_min == tier.spawn_max {
            format!("{:.1}s", tier.spawn_min.as_secs_f64())
        } else {
            format!(
                "{:.1}-{:.1}s",
                tier.spawn_min.as_secs_f64(),
                tier.spawn_max.as_secs_f64()
            )
        };
        let _ = writeln!(
            out,
            "  {} - {:<6} ({} threats, {} spawn, {} launchers, {}ms reload)",
            tier.level,
            tier.name,
            tier.total_threats,
            spawn,
            tier.launchers,
            tier.reload.as_millis()
        );
    }
    out.push_str(
        "\nRules:\n  \
         Run ends when every threat is destroyed or has reached the ground,\n  \
         or at once when more than half of them reach the ground.\n  \
         Victory requires destroying at least half of the threats.\n\n\
         Controls:\n  \
         A/D Move | W/Q/E/Z/C Direction | SPACE Fire | X/ESC Quit\n\n\
         Environment:\n  \
         SKYSHIELD_DIFFICULTY, SKYSHIELD_SEED, SKYSHIELD_LOG_FILE,\n  \
         REPORT_FORMAT=json, LOG_FORMAT=json, RUST_LOG\n",
    );
    out
}
