//! Transaction display formatting
//!
//! Register tables and detail views for the transaction log.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Transaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(txn: &Transaction) -> Self {
        // Income is stored negative; show it as money coming in
        let amount = if txn.is_income() {
            format!("+{}", -txn.amount)
        } else {
            txn.amount.to_string()
        };

        Self {
            id: txn.id.short(),
            when: txn.formatted_timestamp(),
            category: txn.category.clone(),
            amount,
            description: truncate(&txn.description, 30),
        }
    }
}

/// Format transactions as a register table
pub fn format_transaction_table(transactions: &[&Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<TransactionRow> = transactions.iter().map(|t| TransactionRow::from(*t)).collect();
    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("When:        {}\n", txn.formatted_timestamp()));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Amount:      {}\n", txn.amount));
    output.push_str(&format!("Frequency:   {}\n", txn.frequency));

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output
}

/// Truncate a string to a maximum length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, Money};
    use chrono::NaiveDate;

    fn txn(amount: i64, description: &str) -> Transaction {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 8)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        Transaction::expense(ts, "Groceries", Money::from_dollars(amount), description, Frequency::Weekly)
    }

    #[test]
    fn test_table_lists_each_transaction() {
        let a = txn(12, "Bread");
        let b = txn(40, "Weekly shop");
        let text = format_transaction_table(&[&a, &b]);

        assert!(text.contains("Category"));
        assert!(text.contains(&a.id.short()));
        assert!(text.contains("2025-01-08 12:30"));
        assert!(text.contains("$40.00"));
    }

    #[test]
    fn test_income_shows_as_inflow() {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let income = Transaction::income(ts, Money::from_dollars(2000), Frequency::Monthly);
        let text = format_transaction_table(&[&income]);
        assert!(text.contains("+$2000.00"));
        assert!(text.contains("Monthly Income"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_transaction_table(&[]), "No transactions found.\n");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long description", 10), "this is...");
    }
}
