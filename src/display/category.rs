//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{BudgetCategory, BudgetFrequency, Money};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Frequency")]
    frequency: BudgetFrequency,
    #[tabled(rename = "Budget")]
    budget: Money,
    #[tabled(rename = "Per Month")]
    monthly: Money,
}

/// Format the category budgets as a table, with the monthly total
pub fn format_category_table(categories: &[BudgetCategory]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let rows: Vec<CategoryRow> = categories
        .iter()
        .map(|c| CategoryRow {
            name: c.name.clone(),
            frequency: c.frequency,
            budget: c.budget,
            monthly: c.monthly_equivalent(),
        })
        .collect();
    let total: Money = categories.iter().map(|c| c.monthly_equivalent()).sum();

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\nTotal monthly budget: {}\n", table, total)
}

/// Format a single category
pub fn format_category_details(category: &BudgetCategory) -> String {
    let mut output = format!(
        "{}: {} {}",
        category.name, category.budget, category.frequency
    );
    if category.frequency == BudgetFrequency::Weekly {
        output.push_str(&format!(" (~{} per month)", category.monthly_equivalent()));
    }
    output.push('\n');
    output
}
