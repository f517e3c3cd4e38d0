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

use clap::Parser;
use ledger_api_rs::server::{create_router, AppState};
use ledger_api_rs::{AccountId, Engine};
use std::net::SocketAddr;
use std::process;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Seed accounts provisioned at startup: `(id, credit_limit)` in whole
/// currency units.
const SEED_ACCOUNTS: [(u32, i64); 5] = [
    (1, 100_000),
    (2, 80_000),
    (3, 1_000_000),
    (4, 10_000_000),
    (5, 500_000),
];

/// Ledger API - serve account statements and credit/debit transactions
///
/// Accounts are provisioned at startup with a zero balance and a fixed
/// credit limit; the HTTP surface exposes one statement endpoint and one
/// transaction endpoint per account.
#[derive(Parser, Debug)]
#[command(name = "ledger-api-rs")]
#[command(about = "A minimal ledger HTTP API", long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 9999)]
    port: u16,

    /// Address to bind
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    bind: String,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let engine = Engine::with_accounts(
        SEED_ACCOUNTS
            .iter()
            .map(|&(id, limit)| (AccountId(id), limit)),
    );
    log::info!("provisioned {} seed accounts", engine.account_count());

    let state = AppState {
        engine: Arc::new(engine),
    };
    let app = create_router(state);

    let addr: SocketAddr = match format!("{}:{}", args.bind, args.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            log::error!("invalid bind address '{}:{}': {}", args.bind, args.port, e);
            process::exit(1);
        }
    };

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("failed to bind {}: {}", addr, e);
            process::exit(1);
        }
    };

    log::info!("ledger API listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("server error: {}", e);
        process::exit(1);
    }
}
