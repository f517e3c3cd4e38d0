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

//! # Ledger API
//!
//! This library provides a minimal ledger: accounts carry a balance and a
//! credit (overdraft) limit, clients post credit/debit transactions and fetch
//! a statement with the balance and the last 10 ledger entries.
//!
//! ## Core Components
//!
//! - [`Engine`]: transaction processor and statement assembler over the
//!   account store
//! - [`Account`]: account with balance, credit limit and per-account ledger
//! - [`EntryKind`]: the two movement directions (credit, debit)
//! - [`TransactionError`]: error types for processing failures
//! - [`server`]: axum router exposing the two operations over HTTP
//!
//! ## Example
//!
//! ```
//! use ledger_api_rs::{AccountId, Engine, EntryKind};
//!
//! let engine = Engine::with_accounts([(AccountId(1), 1000)]);
//!
//! // Debit into the overdraft range
//! let snapshot = engine
//!     .process(AccountId(1), EntryKind::Debit, 500, "lunch".to_string())
//!     .unwrap();
//! assert_eq!(snapshot.balance, -500);
//!
//! // Statement lists the movement, newest first
//! let statement = engine.statement(AccountId(1)).unwrap();
//! assert_eq!(statement.entries.len(), 1);
//! ```
//!
//! ## Thread Safety
//!
//! The engine serializes transactions per account while allowing requests
//! for different accounts to proceed in parallel.

pub mod account;
mod base;
mod engine;
pub mod error;
pub mod server;
mod transaction;

pub use account::{Account, BalanceSnapshot, Statement, STATEMENT_ENTRIES};
pub use base::AccountId;
pub use engine::Engine;
pub use error::TransactionError;
pub use transaction::{description_is_valid, EntryKind, LedgerEntry, DESCRIPTION_MAX};
