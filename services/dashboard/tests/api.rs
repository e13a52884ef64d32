//! HTTP API tests against the full router


use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bot_dashboard::{app, brain::TextGenerator, Advisor, AppState, Language, Translator};
use mock_generator::{EchoGenerator, GatedGenerator};
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tower::ServiceExt;

fn state_with(generator: impl TextGenerator + 'static) -> Arc<AppState> {
    let advisor = Advisor::new(Arc::new(generator), "gemini-2.5-flash");
    Arc::new(AppState::new(advisor, Translator::embedded(), Language::En))
}

fn test_state() -> Arc<AppState> {
    state_with(EchoGenerator::new("Markets look calm."))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_healthz() {
    let (status, _) = send(app(test_state()), get("/healthz")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_detail_reports_credential() {
    let (status, body) = send(app(state_with(EchoGenerator::unconfigured())), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    let checks = body["checks"].as_array().unwrap();
    assert!(checks.iter().any(|c| c["name"] == "ai_credential" && c["status"] == "missing"));
}

#[tokio::test]
async fn test_list_bots_in_seed_order() {
    let (status, body) = send(app(test_state()), get("/v1/bots")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    let names: Vec<&str> = body["bots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["DCA Master", "Grid Runner", "RSI Momentum", "Arbitrage Finder", "Scalp Pro"]
    );
    assert_eq!(body["bots"][1]["strategy"], "GRID");
    assert_eq!(body["bots"][1]["config"]["grids"], 20);
}

#[tokio::test]
async fn test_create_bot() {
    let state = test_state();
    let (status, bot) = send(
        app(state.clone()),
        with_json("POST", "/v1/bots", json!({"name": "Grid Two", "symbol": "eth/usdt", "strategy": "GRID"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bot["status"], "INACTIVE");
    assert_eq!(bot["symbol"], "ETH/USDT");
    assert_eq!(bot["pnl"], 0.0);
    assert_eq!(bot["capitalAllocation"], 0);
    assert_eq!(bot["config"], json!({"lowerPrice": 2000.0, "upperPrice": 4000.0, "grids": 10}));

    let (_, list) = send(app(state), get("/v1/bots")).await;
    assert_eq!(list["total"], 6);
}

#[tokio::test]
async fn test_create_bot_blank_name_is_rejected() {
    let state = test_state();
    let (status, body) = send(
        app(state.clone()),
        with_json("POST", "/v1/bots?lang=vi", json!({"name": "  ", "symbol": "BTC/USDT", "strategy": "DCA"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Vui lòng điền đầy đủ các trường bắt buộc.");

    let (_, list) = send(app(state), get("/v1/bots")).await;
    assert_eq!(list["total"], 5);
}

#[tokio::test]
async fn test_create_bot_accepts_long_symbol() {
    let state = test_state();
    let symbol = format!("{}/usdt", "x".repeat(40));
    let (status, bot) = send(
        app(state),
        with_json("POST", "/v1/bots", json!({"name": "Long", "symbol": symbol, "strategy": "DCA"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bot["symbol"], format!("{}/USDT", "X".repeat(40)));
}

#[tokio::test]
async fn test_toggle_bot() {
    let state = test_state();
    let (status, bot) = send(app(state.clone()), with_json("POST", "/v1/bots/1/toggle", Value::Null)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bot["status"], "INACTIVE");

    let (_, bot) = send(app(state.clone()), get("/v1/bots/1")).await;
    assert_eq!(bot["status"], "INACTIVE");

    let (status, _) = send(app(state), with_json("POST", "/v1/bots/missing/toggle", Value::Null)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_config() {
    let state = test_state();
    let grid = json!({"strategy": "GRID", "config": {"lowerPrice": 3000.0, "upperPrice": 3300.0, "grids": 8}});

    let (status, bot) = send(app(state.clone()), with_json("PUT", "/v1/bots/2/config", grid)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bot["config"]["grids"], 8);
    assert_eq!(bot["pnl"], 731.55);

    let dca = json!({"strategy": "DCA", "config": {"investment": 10.0, "frequency": "freq_1h"}});
    let (status, body) = send(app(state.clone()), with_json("PUT", "/v1/bots/2/config", dca)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Config for DCA cannot be saved on a GRID bot");

    let (_, bot) = send(app(state), get("/v1/bots/2")).await;
    assert_eq!(bot["config"]["upperPrice"], 3300.0);
}

#[tokio::test]
async fn test_edit_config_field() {
    let state = test_state();

    let (status, config) = send(app(state.clone()), get("/v1/bots/3/config")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(config["editableFields"], json!(["oversold", "overbought", "orderSize"]));

    let (status, bot) = send(
        app(state.clone()),
        with_json("PATCH", "/v1/bots/3/config", json!({"field": "orderSize", "value": "7.5"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bot["config"]["orderSize"], 7.5);
    assert_eq!(bot["config"]["oversold"], 30.0);

    let (status, _) = send(
        app(state.clone()),
        with_json("PATCH", "/v1/bots/3/config", json!({"field": "grids", "value": "4"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        app(state),
        with_json("PATCH", "/v1/bots/3/config", json!({"field": "oversold", "value": "low"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dashboard_summary() {
    let (status, body) = send(app(test_state()), get("/v1/dashboard?lang=en")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalPnl"], 1256.78);
    assert_eq!(body["pnlTrend"], "positive");
    assert_eq!(body["allocatedCapital"], 8500.0);
    assert_eq!(body["activeBots"], 3);
    assert_eq!(body["totalBots"], 5);
    assert_eq!(body["winRate24h"], 68.0);
    assert_eq!(body["recentActivity"].as_array().unwrap().len(), 3);
    assert_eq!(body["recentActivity"][2]["timeAgo"], "45 minutes ago");
}

#[tokio::test]
async fn test_allocation_view() {
    let (_, body) = send(app(test_state()), get("/v1/allocation?lang=en")).await;
    assert_eq!(
        body,
        json!([
            {"name": "Grid Runner (ETH)", "value": 45},
            {"name": "DCA Master (BTC)", "value": 30},
            {"name": "RSI Momentum (SOL)", "value": 15},
            {"name": "Reserved", "value": 10}
        ])
    );
}

#[tokio::test]
async fn test_system_components() {
    let (_, body) = send(app(test_state()), get("/v1/system/components?lang=vi")).await;
    let components = body.as_array().unwrap();
    assert_eq!(components.len(), 8);
    assert_eq!(components[4]["status"], "DEGRADED");
    assert_eq!(components[0]["statusLabel"], "Trực tuyến");
}

#[tokio::test]
async fn test_market_prices() {
    let state = test_state();
    let (_, pairs) = send(app(state.clone()), get("/v1/market/pairs")).await;
    assert_eq!(pairs.as_array().unwrap().len(), 3);

    let (status, series) = send(app(state.clone()), get("/v1/market/prices/BTC/USDT")).await;
    assert_eq!(status, StatusCode::OK);
    let points = series["points"].as_array().unwrap();
    assert_eq!(points.len(), 30);
    assert_eq!(points[0]["price"], 68000.0);
    assert!(points.iter().all(|p| p["price"].as_f64().unwrap() > 0.0));

    let (status, _) = send(app(state), get("/v1/market/prices/DOGE/USDT")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_analysis_without_credential_makes_no_call() {
    let generator = EchoGenerator::unconfigured();
    let calls = generator.call_counter();
    let state = state_with(generator);

    let (status, body) = send(
        app(state),
        with_json("POST", "/v1/ai/analysis?lang=en", json!({"topic": "BTC outlook"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"], "Error: API key for Gemini is not configured. Please check.");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_analysis() {
    let generator = EchoGenerator::new("Sideways with low volume.");
    let prompts = generator.prompt_log();
    let state = state_with(generator);

    let (status, body) = send(
        app(state.clone()),
        with_json("POST", "/v1/ai/analysis?lang=en", json!({"topic": "  ETH merge  "})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["topic"], "ETH merge");
    assert_eq!(body["analysis"], "Sideways with low volume.");
    assert!(prompts.lock().unwrap()[0].contains("\"ETH merge\""));

    let (status, body) = send(
        app(state),
        with_json("POST", "/v1/ai/analysis?lang=en", json!({"topic": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Please enter a topic to analyze.");
}

#[tokio::test]
async fn test_chat_transcript() {
    let state = test_state();

    let (status, body) = send(
        app(state.clone()),
        with_json("POST", "/v1/ai/chat", json!({"message": "Should I pause the grid bot?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], json!({"sender": "ai", "text": "Markets look calm."}));

    let (status, _) = send(app(state.clone()), with_json("POST", "/v1/ai/chat", json!({"message": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, transcript) = send(app(state), get("/v1/ai/chat")).await;
    assert_eq!(transcript["loading"], false);
    assert_eq!(
        transcript["messages"],
        json!([
            {"sender": "user", "text": "Should I pause the grid bot?"},
            {"sender": "ai", "text": "Markets look calm."}
        ])
    );
}

#[tokio::test]
async fn test_concurrent_analysis_is_refused() {
    let gate = Arc::new(Notify::new());
    let state = state_with(GatedGenerator::new(gate.clone()));

    let first = tokio::spawn(send(
        app(state.clone()),
        with_json("POST", "/v1/ai/analysis", json!({"topic": "BTC"})),
    ));

    while !state.analysis_latch.is_loading() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let (status, body) = send(
        app(state.clone()),
        with_json("POST", "/v1/ai/analysis?lang=en", json!({"topic": "ETH"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, "A request is already being processed.");

    gate.notify_one();
    let (status, body) = first.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"], "released");
    assert!(!state.analysis_latch.is_loading());
}

#[tokio::test]
async fn test_translation_lookup() {
    let state = test_state();
    let (status, body) = send(app(state.clone()), get("/v1/i18n/en/minutesAgo?count=7")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "7 minutes ago");

    let (_, body) = send(app(state.clone()), get("/v1/i18n/vi/missing_key")).await;
    assert_eq!(body["text"], "missing_key");

    let (_, table) = send(app(state.clone()), get("/v1/i18n/en")).await;
    assert_eq!(table["reserved"], "Reserved");

    let (status, _) = send(app(state), get("/v1/i18n/fr/reserved")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
