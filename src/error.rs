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

//! Error types for transaction processing.

use thiserror::Error;

/// Transaction processing errors.
///
/// Domain failures (`AccountNotFound`, `LimitExceeded`) always leave account
/// state and the ledger unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// Referenced account id does not exist
    #[error("account not found")]
    AccountNotFound,

    /// Debit would push the balance below the overdraft floor
    #[error("transaction exceeds the credit limit")]
    LimitExceeded,

    /// Amount is zero, negative, or too large to apply
    #[error("invalid amount (must be positive)")]
    InvalidAmount,

    /// Description is empty or longer than 10 characters
    #[error("invalid description (must be 1 to 10 characters)")]
    InvalidDescription,

    /// Account lock could not be acquired within the bounded wait
    #[error("account is busy, retry later")]
    Contended,
}
