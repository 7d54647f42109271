//! Expense ledger
//!
//! Every change to the log moves the balance by the same amount:
//! adding a transaction subtracts its signed amount, deleting one adds it
//! back. Transactions outside the open budget month cannot be deleted.

use chrono::NaiveDateTime;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{PaceError, PaceResult};
use crate::models::{
    Frequency, Money, MonthKey, SessionState, Transaction, UNBUDGETED_CATEGORY,
};

use super::period::{is_archived, transactions_in_month};

/// Service for recording and deleting transactions
pub struct LedgerService<'a> {
    session: &'a mut SessionState,
}

impl<'a> LedgerService<'a> {
    pub fn new(session: &'a mut SessionState) -> Self {
        Self { session }
    }

    /// Record an expense against a category or the unbudgeted bucket
    ///
    /// The category is matched case-insensitively; its frequency is copied
    /// onto the transaction. Unbudgeted expenses are stamped Monthly.
    pub fn add_expense(
        &mut self,
        category: &str,
        amount: Money,
        description: &str,
        now: NaiveDateTime,
    ) -> PaceResult<Transaction> {
        if !amount.is_positive() {
            return Err(PaceError::Validation(
                "Expense amount must be greater than zero".into(),
            ));
        }

        let (name, frequency) = if category.trim().eq_ignore_ascii_case(UNBUDGETED_CATEGORY) {
            (UNBUDGETED_CATEGORY.to_string(), Frequency::Monthly)
        } else {
            let found = self
                .session
                .profile
                .find_category(category)
                .ok_or_else(|| PaceError::category_not_found(category.trim()))?;
            (found.name.clone(), Frequency::from(found.frequency))
        };

        let txn = Transaction::expense(now, name, amount, description.trim(), frequency);
        self.add_transaction(txn.clone(), now);
        Ok(txn)
    }

    /// Append any transaction and apply it to the balance
    pub fn add_transaction(&mut self, txn: Transaction, now: NaiveDateTime) {
        self.session.profile.current_balance -= txn.amount;
        self.session.queue_audit(AuditEntry::create(
            now,
            EntityType::Transaction,
            txn.id.short(),
            Some(txn.category.clone()),
            &txn,
        ));
        self.session.transactions.push(txn);
    }

    /// Delete a transaction from the open month and reverse its balance effect
    pub fn delete(&mut self, identifier: &str, now: NaiveDateTime) -> PaceResult<Transaction> {
        let index = find_index(&self.session.transactions, identifier)?;

        if is_archived(self.session, &self.session.transactions[index]) {
            let txn = &self.session.transactions[index];
            return Err(PaceError::Locked(format!(
                "{} belongs to archived month {}",
                txn.id.short(),
                txn.budget_month(self.session.reset_day())
            )));
        }

        let txn = self.session.transactions.remove(index);
        self.session.profile.current_balance += txn.amount;
        self.session.queue_audit(AuditEntry::delete(
            now,
            EntityType::Transaction,
            txn.id.short(),
            Some(txn.category.clone()),
            &txn,
        ));

        Ok(txn)
    }
}

fn find_index(log: &[Transaction], identifier: &str) -> PaceResult<usize> {
    let mut matches = log
        .iter()
        .enumerate()
        .filter(|(_, t)| t.id.matches(identifier))
        .map(|(i, _)| i);

    match (matches.next(), matches.next()) {
        (Some(index), None) => Ok(index),
        (None, _) => Err(PaceError::transaction_not_found(identifier)),
        (Some(_), Some(_)) => Err(PaceError::Validation(format!(
            "'{}' matches more than one transaction; use a longer id",
            identifier
        ))),
    }
}

/// Look up a transaction by full id or unique id prefix
pub fn find_transaction<'a>(session: &'a SessionState, identifier: &str) -> PaceResult<&'a Transaction> {
    let index = find_index(&session.transactions, identifier)?;
    Ok(&session.transactions[index])
}

/// Transactions of a budget month, newest first
pub fn list_for_month(session: &SessionState, month: MonthKey) -> Vec<&Transaction> {
    let mut txns = transactions_in_month(&session.transactions, month, session.reset_day());
    txns.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    txns
}
