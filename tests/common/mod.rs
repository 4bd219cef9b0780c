//! Shared utilities for integration testing: an in-process stub chain
//! speaking just enough JSON-RPC for the disbursement pipeline, and a faucet
//! server harness on an ephemeral port.

use alloy::primitives::{keccak256, Bytes, U256};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use mantle_faucet::{FaucetConfig, FaucetServer};

/// Well-known test private key (Anvil's first account); operator address
/// 0xf39F...2266.
pub const TEST_OPERATOR_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Observable state of the stub chain.
pub struct StubChainState {
    /// Balance reported for every account.
    pub balance: Mutex<U256>,
    /// Raw transactions accepted via eth_sendRawTransaction.
    pub sent: Mutex<Vec<Bytes>>,
    /// Total JSON-RPC calls served.
    pub rpc_calls: AtomicUsize,
    pub chain_id: u64,
}

pub struct StubChain {
    pub addr: SocketAddr,
    pub state: Arc<StubChainState>,
}

impl StubChain {
    /// Number of transactions the stub has accepted.
    pub fn sent_count(&self) -> usize {
        self.state.sent.lock().unwrap().len()
    }

    /// The endpoint string a faucet request should name.
    pub fn network(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Start a stub chain reporting `balance` for every account.
pub async fn start_stub_chain(balance: U256) -> StubChain {
    let state = Arc::new(StubChainState {
        balance: Mutex::new(balance),
        sent: Mutex::new(Vec::new()),
        rpc_calls: AtomicUsize::new(0),
        chain_id: 31337,
    });

    let app = Router::new()
        .route("/", post(handle_rpc))
        .with_state(state.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubChain { addr, state }
}

async fn handle_rpc(
    State(state): State<Arc<StubChainState>>,
    Json(request): Json<Value>,
) -> Json<Value> {
    state.rpc_calls.fetch_add(1, Ordering::SeqCst);
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default();

    let result = match method {
        "eth_chainId" => json!(format!("{:#x}", state.chain_id)),
        "eth_getBalance" => json!(format!("{:#x}", *state.balance.lock().unwrap())),
        // Nonce grows with every accepted transaction.
        "eth_getTransactionCount" => {
            json!(format!("{:#x}", state.sent.lock().unwrap().len()))
        }
        "eth_gasPrice" => json!("0x3b9aca00"),           // 1 gwei
        "eth_maxPriorityFeePerGas" => json!("0x3b9aca00"),
        "eth_estimateGas" => json!("0x5208"),            // 21000
        "eth_sendRawTransaction" => {
            let raw = request["params"][0].as_str().unwrap_or_default();
            let bytes: Bytes = raw.parse().unwrap();
            // A node derives the hash from the payload; so does the stub.
            let hash = keccak256(&bytes);
            state.sent.lock().unwrap().push(bytes);
            json!(format!("{hash:#x}"))
        }
        other => {
            return Json(json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {"code": -32601, "message": format!("unknown method {other}")},
            }));
        }
    };

    Json(json!({"jsonrpc": "2.0", "id": id, "result": result}))
}

/// Explorer base used by the test faucet configuration.
pub const TEST_EXPLORER_URL: &str = "http://explorer.test/tx/";

/// Start a faucet server on an ephemeral port and return its address.
pub async fn start_faucet(cooldown_hours: u64) -> SocketAddr {
    let mut config = FaucetConfig::default();
    config.cooldown.interval_hours = cooldown_hours;
    config.chain.private_key = Some(TEST_OPERATOR_KEY.to_string());
    config.chain.rpc_timeout_secs = 5;
    config.chain.explorer_url = TEST_EXPLORER_URL.to_string();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = FaucetServer::new(config).unwrap();

    tokio::spawn(async move {
        server.run(listener).await.unwrap();
    });

    addr
}
