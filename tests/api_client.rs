//! API client against a local mock server

mod common;

use common::{MockServer, Response};
use expense_control::api::ApiClient;
use expense_control::error::ErrorKind;
use expense_control::models::{CardId, Money, Period};
use expense_control::reports::AnnualSeries;
use expense_control::ExpenseError;

const SUMMARY: &str = r#"{
    "totals": {"income": 1500, "expense": 420.5, "transactions": 6},
    "categories": [{"name": "Food", "amount": 300}, {"name": "Transport", "amount": 120.5}],
    "perCard": {"Visa": 120.5},
    "paymentMethods": {"cash": 300, "card": 120.5},
    "budgetAmount": 800
}"#;

#[test]
fn test_login_returns_token() {
    let server = MockServer::start(|req| match (req.method.as_str(), req.path.as_str()) {
        ("POST", "/api/auth/login") => Response::ok(
            r#"{"token":"abc123","user":{"name":"Ana","email":"ana@example.com"}}"#,
        ),
        _ => Response::not_found(),
    });

    let client = ApiClient::new(server.base_url(), None).unwrap();
    let response = client.login("ana@example.com", "secret").unwrap();

    assert_eq!(response.token, "abc123");
    assert_eq!(response.user.unwrap().name, "Ana");

    let sent = server.requests_to("/auth/login");
    assert_eq!(sent.len(), 1);
    assert!(sent[0].body.contains(r#""email":"ana@example.com""#));
    assert!(sent[0].header("authorization").is_none());
}

#[test]
fn test_login_failure_surfaces_server_message() {
    let server = MockServer::start(|_| Response::json(400, r#"{"message":"Invalid credentials"}"#));

    let client = ApiClient::new(server.base_url(), None).unwrap();
    let err = client.login("ana@example.com", "wrong").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.user_message("Login failed"), "Invalid credentials");
}

#[test]
fn test_error_without_message_uses_fallback() {
    let server = MockServer::start(|_| Response::json(500, "oops"));

    let client = ApiClient::new(server.base_url(), None).unwrap();
    let err = client.login("ana@example.com", "secret").unwrap_err();

    assert!(matches!(err, ExpenseError::Api { status: 500, message: None }));
    assert_eq!(err.user_message("Login failed"), "Login failed");
}

#[test]
fn test_unauthorized_status() {
    let server = MockServer::start(|_| Response::json(401, r#"{"error":"Token expired"}"#));

    let client = ApiClient::new(server.base_url(), Some("stale".into())).unwrap();
    let err = client.cards().unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.user_message("Could not load cards"), "Token expired");
    assert_eq!(
        server.requests()[0].header("authorization"),
        Some("Bearer stale")
    );
}

#[test]
fn test_summary_decodes_and_sends_period() {
    let server = MockServer::start(|req| match req.path.as_str() {
        "/api/stats/summary" => Response::ok(SUMMARY),
        _ => Response::not_found(),
    });

    let client = ApiClient::new(server.base_url(), Some("tok".into())).unwrap();
    let summary = client.summary(Period::month(2025, 3).unwrap()).unwrap();

    assert_eq!(summary.totals.income, Money::from_cents(150_000));
    assert_eq!(summary.totals.expense, Money::from_cents(42_050));
    assert_eq!(summary.categories.len(), 2);
    assert_eq!(summary.budget_amount, Some(Money::from_cents(80_000)));
    assert_eq!(server.requests()[0].param("period"), Some("2025-03"));
}

#[test]
fn test_bad_body_is_decode_error() {
    let server = MockServer::start(|_| Response::ok(r#"{"totals": "nope"}"#));

    let client = ApiClient::new(server.base_url(), Some("tok".into())).unwrap();
    let err = client.summary(Period::All).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn test_card_page_accepts_both_shapes() {
    let server = MockServer::start(|req| match req.param("page") {
        Some("1") => Response::ok(
            r#"{"items":[{"id":1,"type":"expense","description":"Bus","amount":2.5,
                "date":"2025-03-02","paymentMethod":"card","cardId":4}],"total":11}"#,
        ),
        _ => Response::ok(
            r#"[{"id":2,"type":"expense","description":"Taxi","amount":12,
                "date":"2025-03-04","paymentMethod":"card","Card":{"id":4,"name":"Visa"}}]"#,
        ),
    });

    let client = ApiClient::new(server.base_url(), Some("tok".into())).unwrap();

    let first = client.card_transactions_page(CardId::new(4), 1, 10).unwrap();
    assert_eq!(first.total, 11);
    assert_eq!(first.items[0].amount, Money::from_cents(250));

    let second = client.card_transactions_page(CardId::new(4), 2, 10).unwrap();
    assert_eq!(second.total, 1);
    assert_eq!(second.items[0].card_id, Some(CardId::new(4)));
    assert_eq!(second.items[0].card_name.as_deref(), Some("Visa"));

    let sent = server.requests();
    assert!(sent.iter().all(|r| r.param("cardId") == Some("4")));
    assert!(sent.iter().all(|r| r.param("limit") == Some("10")));
}

#[test]
fn test_connection_refused_is_network_error() {
    // Bind then drop to get a port nobody listens on
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let client = ApiClient::new(&format!("http://127.0.0.1:{}", port), None).unwrap();
    let err = client.cards().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
}

#[test]
fn test_annual_series_fetches_every_month() {
    let server = MockServer::start(|req| {
        let month = req
            .param("period")
            .and_then(|p| p.rsplit('-').next())
            .and_then(|m| m.parse::<i64>().ok())
            .unwrap_or(0);
        Response::ok(format!(
            r#"{{"totals":{{"income":{},"expense":10,"transactions":1}}}}"#,
            month * 100
        ))
    });

    let client = ApiClient::new(server.base_url(), Some("tok".into())).unwrap();
    let series = AnnualSeries::fetch_by_month(&client, 2024);

    assert!(!series.load_failed);
    assert_eq!(series.bars.len(), 12);
    assert_eq!(series.bars[0].income, Money::from_cents(10_000));
    assert_eq!(series.bars[11].income, Money::from_cents(120_000));
    assert_eq!(series.bars[5].expense, Money::from_cents(1_000));
    assert_eq!(server.requests_to("/stats/summary").len(), 12);
}

#[test]
fn test_annual_series_is_all_or_nothing() {
    let server = MockServer::start(|req| match req.param("period") {
        Some("2024-07") => Response::json(500, r#"{"message":"boom"}"#),
        _ => Response::ok(r#"{"totals":{"income":100,"expense":50,"transactions":2}}"#),
    });

    let client = ApiClient::new(server.base_url(), Some("tok".into())).unwrap();
    let series = AnnualSeries::fetch_by_month(&client, 2024);

    assert!(series.load_failed);
    assert!(series.advisory().is_some());
    assert_eq!(series.bars.len(), 12);
    assert!(series
        .bars
        .iter()
        .all(|b| b.income.is_zero() && b.expense.is_zero()));
}

#[test]
fn test_null_totals_count_as_zero() {
    let server = MockServer::start(|_| {
        Response::ok(r#"{"totals":{"income":null,"expense":null,"transactions":0},"categories":[]}"#)
    });

    let client = ApiClient::new(server.base_url(), Some("tok".into())).unwrap();
    let series = AnnualSeries::fetch_by_month(&client, 2024);

    assert!(!series.load_failed);
    assert!(series.bars.iter().all(|b| b.income.is_zero()));
}

#[test]
fn test_request_body_is_recorded() {
    let server = MockServer::start(|_| Response::ok(r#"{"token":"t"}"#));

    let client = ApiClient::new(server.base_url(), None).unwrap();
    client.login("ana@example.com", "secret").unwrap();

    let sent = &server.requests_to("/auth/login")[0];
    assert_eq!(sent.method, "POST");
    assert_eq!(sent.header("content-type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(&sent.body).unwrap();
    assert_eq!(body["password"], "secret");
}
