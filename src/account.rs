// SPDX-License-Identifier: AGPL-3.0-or-later
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Account management.
//!
//! Each [`Account`] guards its balance, credit limit and per-account ledger
//! behind a single mutex. Applying a transaction is one critical section:
//! read the balance, check the overdraft floor, write the new balance and
//! append the ledger entry. Either all of it happens or none of it does.
//!
//! # Example
//!
//! ```
//! use ledger_api_rs::{Account, AccountId, EntryKind};
//!
//! let account = Account::new(AccountId(1), 1000);
//! let snapshot = account
//!     .apply(EntryKind::Debit, 500, "lunch".to_string())
//!     .unwrap();
//! assert_eq!(snapshot.balance, -500);
//! ```

use crate::base::AccountId;
use crate::transaction::{description_is_valid, EntryKind, LedgerEntry};
use crate::TransactionError;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::time::Duration;

/// Number of ledger entries returned in a statement.
pub const STATEMENT_ENTRIES: usize = 10;

/// Bounded wait for the account lock before giving up with
/// [`TransactionError::Contended`].
const LOCK_TIMEOUT: Duration = Duration::from_secs(1);

/// Balance and limit of an account after a successful transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub balance: i64,
    pub credit_limit: i64,
}

/// Snapshot of an account plus its most recent ledger entries, newest first.
#[derive(Debug, Clone)]
pub struct Statement {
    pub balance: i64,
    pub credit_limit: i64,
    /// Time the statement was assembled.
    pub as_of: DateTime<Utc>,
    /// At most [`STATEMENT_ENTRIES`] entries, newest first.
    pub entries: Vec<LedgerEntry>,
}

#[derive(Debug)]
struct AccountData {
    id: AccountId,
    balance: i64,
    credit_limit: i64,
    /// Append-only ledger, oldest first. Statements read it from the tail.
    ledger: Vec<LedgerEntry>,
}

impl AccountData {
    fn new(id: AccountId, credit_limit: i64) -> Self {
        Self {
            id,
            balance: 0,
            credit_limit,
            ledger: Vec::new(),
        }
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance >= -self.credit_limit,
            "Invariant violated: balance {} below overdraft floor -{}",
            self.balance,
            self.credit_limit
        );
    }

    /// Applies a movement: limit check, balance write and ledger append.
    fn apply(
        &mut self,
        kind: EntryKind,
        amount: i64,
        description: String,
    ) -> Result<BalanceSnapshot, TransactionError> {
        if amount <= 0 {
            return Err(TransactionError::InvalidAmount);
        }
        if !description_is_valid(&description) {
            return Err(TransactionError::InvalidDescription);
        }

        let delta = kind
            .signed_delta(amount)
            .ok_or(TransactionError::InvalidAmount)?;
        let new_balance = self
            .balance
            .checked_add(delta)
            .ok_or(TransactionError::InvalidAmount)?;

        if new_balance < -self.credit_limit {
            return Err(TransactionError::LimitExceeded);
        }

        self.balance = new_balance;
        self.ledger.push(LedgerEntry {
            amount,
            kind,
            description,
            created_at: Utc::now(),
        });
        self.assert_invariants();

        Ok(BalanceSnapshot {
            balance: self.balance,
            credit_limit: self.credit_limit,
        })
    }

    fn statement(&self) -> Statement {
        let entries = self
            .ledger
            .iter()
            .rev()
            .take(STATEMENT_ENTRIES)
            .cloned()
            .collect();

        Statement {
            balance: self.balance,
            credit_limit: self.credit_limit,
            as_of: Utc::now(),
            entries,
        }
    }
}

/// Ledger account with a balance and an overdraft limit.
#[derive(Debug)]
pub struct Account {
    inner: Mutex<AccountData>,
}

impl Account {
    pub fn new(id: AccountId, credit_limit: i64) -> Self {
        Self {
            inner: Mutex::new(AccountData::new(id, credit_limit)),
        }
    }

    pub fn id(&self) -> AccountId {
        self.inner.lock().id
    }

    pub fn balance(&self) -> i64 {
        self.inner.lock().balance
    }

    pub fn credit_limit(&self) -> i64 {
        self.inner.lock().credit_limit
    }

    /// Number of ledger entries recorded so far.
    pub fn ledger_len(&self) -> usize {
        self.inner.lock().ledger.len()
    }

    /// Atomically validates and applies one credit or debit.
    ///
    /// Concurrent calls for the same account serialize on the account mutex.
    /// The wait is bounded; a call that cannot acquire the lock in time fails
    /// with [`TransactionError::Contended`] instead of blocking indefinitely.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::InvalidAmount`] - amount is not a positive value
    ///   that can be applied.
    /// - [`TransactionError::InvalidDescription`] - description is empty or
    ///   longer than 10 characters.
    /// - [`TransactionError::LimitExceeded`] - the debit would push the
    ///   balance below `-credit_limit`. Balance and ledger are unchanged.
    /// - [`TransactionError::Contended`] - the lock was not acquired within
    ///   the bounded wait.
    pub fn apply(
        &self,
        kind: EntryKind,
        amount: i64,
        description: String,
    ) -> Result<BalanceSnapshot, TransactionError> {
        let mut data = self
            .inner
            .try_lock_for(LOCK_TIMEOUT)
            .ok_or(TransactionError::Contended)?;
        data.apply(kind, amount, description)
    }

    /// Assembles a statement: balance, limit and the last
    /// [`STATEMENT_ENTRIES`] ledger entries, newest first.
    pub fn statement(&self) -> Result<Statement, TransactionError> {
        let data = self
            .inner
            .try_lock_for(LOCK_TIMEOUT)
            .ok_or(TransactionError::Contended)?;
        Ok(data.statement())
    }
}
