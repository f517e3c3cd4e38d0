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

//! Ledger entry types.
//!
//! A [`LedgerEntry`] is the immutable record of a single credit or debit
//! against an account. Entries are only ever appended, never updated or
//! removed; retrieval order is newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum description length accepted for a ledger entry, in characters.
pub const DESCRIPTION_MAX: usize = 10;

/// Direction of a ledger movement.
///
/// Serializes to the wire tokens `"c"` and `"d"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntryKind {
    /// Positive movement increasing the balance.
    #[serde(rename = "c")]
    Credit,
    /// Negative movement decreasing the balance, bounded by the credit limit.
    #[serde(rename = "d")]
    Debit,
}

impl EntryKind {
    /// Signed balance delta for a movement of `amount` in this direction.
    ///
    /// Returns `None` if the magnitude cannot be represented.
    pub fn signed_delta(self, amount: i64) -> Option<i64> {
        match self {
            EntryKind::Credit => Some(amount),
            EntryKind::Debit => amount.checked_neg(),
        }
    }
}

/// Immutable record of one movement against an account.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Positive magnitude of the movement, in whole currency units.
    pub amount: i64,
    pub kind: EntryKind,
    /// Short free-text label, 1 to [`DESCRIPTION_MAX`] characters.
    pub description: String,
    /// Assigned by the processor at commit time.
    pub created_at: DateTime<Utc>,
}

/// Checks that a description satisfies the 1..=10 character bound.
pub fn description_is_valid(description: &str) -> bool {
    let len = description.chars().count();
    (1..=DESCRIPTION_MAX).contains(&len)
}
