//! Savings goal display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{SavingsGoal, SavingsSummary};

const BAR_WIDTH: usize = 20;

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "#")]
    id: u32,
    #[tabled(rename = "Goal")]
    name: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

impl From<&SavingsGoal> for GoalRow {
    fn from(goal: &SavingsGoal) -> Self {
        let progress = goal.progress();
        Self {
            id: goal.id,
            name: goal.name.clone(),
            saved: goal.current_amount.to_string(),
            target: goal.target_amount.to_string(),
            progress: format!("{} {:>3.0}%", format_bar(progress), progress * 100.0),
            status: if goal.completed { "done" } else { "" },
        }
    }
}

/// Format the goal list followed by the totals
pub fn format_goal_table(goals: &[SavingsGoal], summary: &SavingsSummary) -> String {
    if goals.is_empty() {
        return "No savings goals yet.\n".to_string();
    }

    let mut table = Table::new(goals.iter().map(GoalRow::from));
    table.with(Style::psql());

    format!(
        "{}\nSaved {} of {} ({} to go, {} of {} goals complete)\n",
        table,
        summary.total_saved,
        summary.total_target,
        summary.remaining,
        summary.completed,
        goals.len()
    )
}

/// Format a single goal
pub fn format_goal_details(goal: &SavingsGoal) -> String {
    let mut output = format!("Goal #{}: {}\n", goal.id, goal.name);
    output.push_str(&format!(
        "  {} of {} ({:.0}%)\n",
        goal.current_amount,
        goal.target_amount,
        goal.progress() * 100.0
    ));
    if goal.completed {
        output.push_str("  Goal reached!\n");
    } else {
        output.push_str(&format!("  {} to go\n", goal.remaining()));
    }
    if !goal.description.is_empty() {
        output.push_str(&format!("  {}\n", goal.description));
    }
    output
}

/// Progress bar for a fraction in 0.0..=1.0
fn format_bar(fraction: f64) -> String {
    let filled = ((fraction * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
