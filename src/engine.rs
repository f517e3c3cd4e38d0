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

//! Transaction processing engine.
//!
//! The [`Engine`] owns the account store and exposes the two ledger
//! operations: processing a credit/debit and assembling a statement.
//!
//! # Thread Safety
//!
//! Accounts live in a [`DashMap`], so requests for different accounts do not
//! block each other. Each account carries its own mutex, so requests for the
//! same account serialize: no lost balance updates, no double-spend past the
//! credit limit.

use crate::account::{Account, BalanceSnapshot, Statement};
use crate::base::AccountId;
use crate::transaction::{description_is_valid, EntryKind};
use crate::TransactionError;
use dashmap::DashMap;

/// Transaction processing engine that owns the account store.
///
/// # Invariants
///
/// - `balance >= -credit_limit` for every account at all times, enforced at
///   transaction-processing time.
/// - Ledger entries are append-only; a successful transaction appends exactly
///   one entry, a failed one appends none.
/// - Accounts are created by provisioning only; processing never creates or
///   removes accounts.
pub struct Engine {
    /// Accounts indexed by id.
    accounts: DashMap<AccountId, Account>,
}

impl Engine {
    /// Creates an engine with an empty account store.
    pub fn new() -> Self {
        Engine {
            accounts: DashMap::new(),
        }
    }

    /// Creates an engine provisioned with `(id, credit_limit)` pairs, each
    /// starting at zero balance.
    pub fn with_accounts<I>(seed: I) -> Self
    where
        I: IntoIterator<Item = (AccountId, i64)>,
    {
        let engine = Engine::new();
        for (id, credit_limit) in seed {
            engine.provision(id, credit_limit);
        }
        engine
    }

    /// Adds an account with the given overdraft limit and zero balance.
    ///
    /// Replaces any existing account with the same id; intended for startup
    /// provisioning only.
    pub fn provision(&self, id: AccountId, credit_limit: i64) {
        self.accounts.insert(id, Account::new(id, credit_limit));
    }

    /// Atomically validates and applies one transaction against an account.
    ///
    /// Validation happens before the store is touched; the limit check,
    /// balance write and ledger append happen inside the account's critical
    /// section. Returns the post-transaction balance and limit.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::InvalidAmount`] - `amount` is not positive.
    /// - [`TransactionError::InvalidDescription`] - `description` is empty or
    ///   longer than 10 characters.
    /// - [`TransactionError::AccountNotFound`] - no account with `id`.
    /// - [`TransactionError::LimitExceeded`] - the debit would breach the
    ///   overdraft floor; state is unchanged.
    /// - [`TransactionError::Contended`] - the account lock was not acquired
    ///   within the bounded wait.
    pub fn process(
        &self,
        id: AccountId,
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

        let account = self
            .accounts
            .get(&id)
            .ok_or(TransactionError::AccountNotFound)?;
        account.apply(kind, amount, description)
    }

    /// Assembles a statement for an account: balance, limit and the last 10
    /// ledger entries, newest first.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::AccountNotFound`] - no account with `id`.
    /// - [`TransactionError::Contended`] - the account lock was not acquired
    ///   within the bounded wait.
    pub fn statement(&self, id: AccountId) -> Result<Statement, TransactionError> {
        let account = self
            .accounts
            .get(&id)
            .ok_or(TransactionError::AccountNotFound)?;
        account.statement()
    }

    /// Retrieves an account by id.
    pub fn get_account(
        &self,
        id: &AccountId,
    ) -> Option<dashmap::mapref::one::Ref<'_, AccountId, Account>> {
        self.accounts.get(id)
    }

    /// Number of provisioned accounts.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
