// src/message.rs

//! Digest message formatting.
//!
//! Pure string assembly, no network or filesystem access. Problems are
//! rendered in the order the selector produced them.

use crate::models::Problem;

/// Build the weekly announcement message for a Discord webhook.
pub fn build_message(problems: &[Problem]) -> String {
    let total = problems.len();
    let mut lines: Vec<String> = Vec::new();

    lines.push("@everyone 이번 주 백준 알고리즘 문제입니다 🎯\n".to_string());
    lines.push(format!("이번 주 문제 수: {total}문제\n"));

    for (idx, problem) in problems.iter().enumerate() {
        let title = problem.title_ko.as_deref().unwrap_or("");
        let level_note = problem
            .level
            .map(|level| format!(" (level {level})"))
            .unwrap_or_default();

        lines.push(format!(
            "{}. {}번 - {}{}\n   {}",
            idx + 1,
            problem.problem_id,
            title,
            level_note,
            problem.page_url()
        ));
    }

    lines.push("\n즐코하세요 🔥".to_string());

    lines.join("\n")
}
