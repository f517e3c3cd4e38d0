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

//! REST API surface for the ledger engine.
//!
//! ## Endpoints
//!
//! - `POST /accounts/{id}/transactions` - apply a credit or debit
//! - `GET /accounts/{id}/statement` - balance, limit and last 10 entries
//!
//! ## Example Usage
//!
//! ```bash
//! curl -X POST http://localhost:9999/accounts/1/transactions \
//!   -H "Content-Type: application/json" \
//!   -d '{"valor": 500, "tipo": "d", "descricao": "lunch"}'
//!
//! curl http://localhost:9999/accounts/1/statement
//! ```
//!
//! The router is stateless beyond the injected engine handle; it parses and
//! validates the request, invokes one engine operation and maps the result to
//! an HTTP status. Unknown account ids map to 404 on both endpoints; 422 is
//! reserved for payload violations and limit breaches.

use crate::account::Statement;
use crate::base::AccountId;
use crate::transaction::EntryKind;
use crate::{Engine, TransactionError};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// === Request/Response DTOs ===

/// Request body for posting a transaction.
///
/// ```json
/// {"valor": 500, "tipo": "d", "descricao": "lunch"}
/// ```
///
/// `valor` must be a positive integer; fractional amounts fail JSON
/// deserialization and are rejected before the engine is invoked.
#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    pub valor: i64,
    pub tipo: EntryKind,
    pub descricao: String,
}

/// Response body for a successful transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub limite: i64,
    pub saldo: i64,
}

/// Balance section of a statement.
#[derive(Debug, Serialize)]
pub struct StatementBalance {
    pub total: i64,
    pub limite: i64,
    pub data_extrato: DateTime<Utc>,
}

/// One ledger entry as listed in a statement.
#[derive(Debug, Serialize)]
pub struct StatementEntry {
    pub valor: i64,
    pub tipo: EntryKind,
    pub descricao: String,
    pub realizada_em: DateTime<Utc>,
}

/// Response body for a statement.
#[derive(Debug, Serialize)]
pub struct StatementResponse {
    pub saldo: StatementBalance,
    pub ultimas_transacoes: Vec<StatementEntry>,
}

impl From<Statement> for StatementResponse {
    fn from(statement: Statement) -> Self {
        StatementResponse {
            saldo: StatementBalance {
                total: statement.balance,
                limite: statement.credit_limit,
                data_extrato: statement.as_of,
            },
            ultimas_transacoes: statement
                .entries
                .into_iter()
                .map(|entry| StatementEntry {
                    valor: entry.amount,
                    tipo: entry.kind,
                    descricao: entry.description,
                    realizada_em: entry.created_at,
                })
                .collect(),
        }
    }
}

/// Response body for errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// === Application State ===

/// Shared application state containing the ledger engine.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
}

// === Error Handling ===

/// Wrapper for converting [`TransactionError`] into HTTP responses.
pub struct AppError(TransactionError);

impl From<TransactionError> for AppError {
    fn from(err: TransactionError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            TransactionError::AccountNotFound => (StatusCode::NOT_FOUND, "ACCOUNT_NOT_FOUND"),
            TransactionError::LimitExceeded => {
                (StatusCode::UNPROCESSABLE_ENTITY, "LIMIT_EXCEEDED")
            }
            TransactionError::InvalidAmount => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_AMOUNT")
            }
            TransactionError::InvalidDescription => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_DESCRIPTION")
            }
            TransactionError::Contended => (StatusCode::SERVICE_UNAVAILABLE, "ACCOUNT_BUSY"),
        };

        if status.is_server_error() {
            log::warn!("request failed: {} ({})", self.0, code);
        } else {
            log::debug!("request rejected: {} ({})", self.0, code);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}

// === Handlers ===

/// POST /accounts/{id}/transactions - apply a credit or debit.
async fn post_transaction(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<TransactionResponse>, AppError> {
    let snapshot = state.engine.process(
        AccountId(id),
        request.tipo,
        request.valor,
        request.descricao,
    )?;

    Ok(Json(TransactionResponse {
        limite: snapshot.credit_limit,
        saldo: snapshot.balance,
    }))
}

/// GET /accounts/{id}/statement - balance, limit and recent entries.
async fn get_statement(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<StatementResponse>, AppError> {
    let statement = state.engine.statement(AccountId(id))?;
    Ok(Json(StatementResponse::from(statement)))
}

// === Router ===

/// Builds the application router over a shared engine.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/accounts/{id}/transactions", post(post_transaction))
        .route("/accounts/{id}/statement", get(get_statement))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::LedgerEntry;

    #[test]
    fn transaction_response_uses_wire_field_names() {
        let json = serde_json::to_value(TransactionResponse {
            limite: 1000,
            saldo: -500,
        })
        .unwrap();

        assert_eq!(json["limite"], 1000);
        assert_eq!(json["saldo"], -500);
    }

    #[test]
    fn statement_response_shape() {
        let statement = Statement {
            balance: -500,
            credit_limit: 1000,
            as_of: Utc::now(),
            entries: vec![LedgerEntry {
                amount: 500,
                kind: EntryKind::Debit,
                description: "lunch".to_string(),
                created_at: Utc::now(),
            }],
        };

        let json = serde_json::to_value(StatementResponse::from(statement)).unwrap();

        assert_eq!(json["saldo"]["total"], -500);
        assert_eq!(json["saldo"]["limite"], 1000);
        assert!(json["saldo"]["data_extrato"].is_string());

        let entries = json["ultimas_transacoes"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["valor"], 500);
        assert_eq!(entries[0]["tipo"], "d");
        assert_eq!(entries[0]["descricao"], "lunch");
        assert!(entries[0]["realizada_em"].is_string());
    }

    #[test]
    fn busy_account_maps_to_service_unavailable() {
        let response = AppError::from(TransactionError::Contended).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn error_status_mapping() {
        let cases = [
            (TransactionError::AccountNotFound, StatusCode::NOT_FOUND),
            (
                TransactionError::LimitExceeded,
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                TransactionError::InvalidAmount,
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                TransactionError::InvalidDescription,
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (TransactionError::Contended, StatusCode::SERVICE_UNAVAILABLE),
        ];

        for (error, expected) in cases {
            let response = AppError::from(error.clone()).into_response();
            assert_eq!(response.status(), expected, "wrong status for {:?}", error);
        }
    }

    #[test]
    fn request_rejects_fractional_amount() {
        let result = serde_json::from_str::<TransactionRequest>(
            r#"{"valor": 1.2, "tipo": "d", "descricao": "x"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn request_rejects_unknown_kind_token() {
        let result = serde_json::from_str::<TransactionRequest>(
            r#"{"valor": 1, "tipo": "x", "descricao": "x"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn request_rejects_null_description() {
        let result = serde_json::from_str::<TransactionRequest>(
            r#"{"valor": 1, "tipo": "c", "descricao": null}"#,
        );
        assert!(result.is_err());
    }
}
