//! Blocking HTTP client for the Expense Control REST API
//!
//! Every call goes to `{base}/api/...` and carries `Authorization: Bearer
//! <token>` when a session exists. Failures are mapped into [`ExpenseError`]:
//! 401 becomes `Unauthorized`, other non-success statuses become `Api` with the
//! server's `{ "message": ... }` when one was sent, and bodies that do not match
//! the expected DTO become `Decode`.

use std::time::{Duration, Instant};

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::user::ResetStartResponse;
use crate::models::{
    Budget, BudgetId, BudgetInput, Card, CardId, CardInput, Category, Contribution,
    ContributionId, ContributionInput, LoginResponse, Period, PlanId, PlanInput, SavingsPlan,
    SavingsSummary, StatsSummary, Transaction, TransactionId, TransactionInput, UserProfile,
};

use super::StatsSource;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One page of a card's transactions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionPage {
    pub items: Vec<Transaction>,
    pub total: usize,
}

/// `/transactions?cardId&page&limit` answers with either shape
#[derive(Deserialize)]
#[serde(untagged)]
enum PageResponse {
    Paged {
        items: Vec<Transaction>,
        #[serde(default)]
        total: Option<usize>,
    },
    Bare(Vec<Transaction>),
}

impl From<PageResponse> for TransactionPage {
    fn from(resp: PageResponse) -> Self {
        match resp {
            PageResponse::Paged { items, total } => {
                let total = total.unwrap_or(items.len());
                Self { items, total }
            }
            PageResponse::Bare(items) => Self {
                total: items.len(),
                items,
            },
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct Registration<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct EmailOnly<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordChange<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileUpdate<'a> {
    name: &'a str,
    email: &'a str,
    current_password: &'a str,
}

/// Client for the REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    api_root: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client for `base_url` (the `/api` suffix is added here)
    pub fn new(base_url: &str, token: Option<String>) -> ExpenseResult<Self> {
        let api_root = api_root(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ExpenseError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_root,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// The resolved `{base}/api/` URL
    pub fn api_root(&self) -> &Url {
        &self.api_root
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Replace the bearer token (after login or logout)
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token.filter(|t| !t.is_empty());
    }

    // ---- Auth ----

    pub fn login(&self, email: &str, password: &str) -> ExpenseResult<LoginResponse> {
        self.send_json(Method::POST, "auth/login", Some(&Credentials { email, password }), &[])
    }

    pub fn register(&self, name: &str, email: &str, password: &str) -> ExpenseResult<()> {
        self.send_empty(
            Method::POST,
            "auth/register",
            Some(&Registration {
                name,
                email,
                password,
            }),
        )
    }

    /// First reset step: does an account exist for this email?
    pub fn reset_start(&self, email: &str) -> ExpenseResult<bool> {
        let resp: ResetStartResponse =
            self.send_json(Method::POST, "auth/reset-start", Some(&EmailOnly { email }), &[])?;
        Ok(resp.exists)
    }

    pub fn reset_password(&self, email: &str, password: &str) -> ExpenseResult<()> {
        self.send_empty(Method::POST, "auth/reset", Some(&Credentials { email, password }))
    }

    // ---- User ----

    pub fn me(&self) -> ExpenseResult<UserProfile> {
        self.get("user/me", &[])
    }

    pub fn update_profile(
        &self,
        name: &str,
        email: &str,
        current_password: &str,
    ) -> ExpenseResult<UserProfile> {
        self.send_json(
            Method::PUT,
            "user/profile",
            Some(&ProfileUpdate {
                name,
                email,
                current_password,
            }),
            &[],
        )
    }

    pub fn change_password(&self, current_password: &str, new_password: &str) -> ExpenseResult<()> {
        self.send_empty(
            Method::POST,
            "user/change-password",
            Some(&PasswordChange {
                current_password,
                new_password,
            }),
        )
    }

    // ---- Categories ----

    pub fn categories(&self) -> ExpenseResult<Vec<Category>> {
        self.get("categories", &[])
    }

    // ---- Cards ----

    pub fn cards(&self) -> ExpenseResult<Vec<Card>> {
        self.get("cards", &[])
    }

    pub fn create_card(&self, input: &CardInput) -> ExpenseResult<Card> {
        self.send_json(Method::POST, "cards", Some(input), &[])
    }

    pub fn update_card(&self, id: CardId, input: &CardInput) -> ExpenseResult<()> {
        self.send_empty(Method::PUT, &format!("cards/{}", id), Some(input))
    }

    pub fn delete_card(&self, id: CardId) -> ExpenseResult<()> {
        self.send_empty::<()>(Method::DELETE, &format!("cards/{}", id), None)
    }

    // ---- Transactions ----

    pub fn transactions(&self) -> ExpenseResult<Vec<Transaction>> {
        self.get("transactions", &[])
    }

    /// Every transaction of one card, unpaginated
    pub fn card_transactions(&self, card: CardId) -> ExpenseResult<Vec<Transaction>> {
        let page: PageResponse = self.get("transactions", &[("cardId", card.to_string())])?;
        Ok(TransactionPage::from(page).items)
    }

    /// One server-side page of a card's transactions (pages start at 1)
    pub fn card_transactions_page(
        &self,
        card: CardId,
        page: usize,
        limit: usize,
    ) -> ExpenseResult<TransactionPage> {
        let resp: PageResponse = self.get(
            "transactions",
            &[
                ("cardId", card.to_string()),
                ("page", page.to_string()),
                ("limit", limit.to_string()),
            ],
        )?;
        Ok(resp.into())
    }

    pub fn create_transaction(&self, input: &TransactionInput) -> ExpenseResult<()> {
        self.send_empty(Method::POST, "transactions", Some(input))
    }

    pub fn update_transaction(&self, id: TransactionId, input: &TransactionInput) -> ExpenseResult<()> {
        self.send_empty(Method::PUT, &format!("transactions/{}", id), Some(input))
    }

    pub fn delete_transaction(&self, id: TransactionId) -> ExpenseResult<()> {
        self.send_empty::<()>(Method::DELETE, &format!("transactions/{}", id), None)
    }

    // ---- Budgets ----

    pub fn budgets(&self) -> ExpenseResult<Vec<Budget>> {
        self.get("budgets", &[])
    }

    pub fn create_budget(&self, input: &BudgetInput) -> ExpenseResult<()> {
        self.send_empty(Method::POST, "budgets", Some(input))
    }

    pub fn update_budget(&self, id: BudgetId, input: &BudgetInput) -> ExpenseResult<()> {
        self.send_empty(Method::PUT, &format!("budgets/{}", id), Some(input))
    }

    pub fn delete_budget(&self, id: BudgetId) -> ExpenseResult<()> {
        self.send_empty::<()>(Method::DELETE, &format!("budgets/{}", id), None)
    }

    // ---- Statistics ----

    pub fn summary(&self, period: Period) -> ExpenseResult<StatsSummary> {
        self.get("stats/summary", &[("period", period.to_string())])
    }

    /// Download the XLSX export for a period
    pub fn export(&self, period: Period) -> ExpenseResult<Vec<u8>> {
        let path = "stats/export";
        let request = self
            .request(Method::GET, path)?
            .header(ACCEPT, "*/*")
            .query(&[("period", period.to_string())]);
        let response = self.execute(Method::GET, path, request)?;
        let bytes = response.bytes()?;
        Ok(bytes.to_vec())
    }

    // ---- Savings ----

    pub fn plans(&self) -> ExpenseResult<Vec<SavingsPlan>> {
        self.get("savings/plans", &[])
    }

    pub fn create_plan(&self, input: &PlanInput) -> ExpenseResult<SavingsPlan> {
        self.send_json(Method::POST, "savings/plans", Some(input), &[])
    }

    pub fn update_plan(&self, id: PlanId, input: &PlanInput) -> ExpenseResult<SavingsPlan> {
        self.send_json(Method::PUT, &format!("savings/plans/{}", id), Some(input), &[])
    }

    pub fn delete_plan(&self, id: PlanId) -> ExpenseResult<()> {
        self.send_empty::<()>(Method::DELETE, &format!("savings/plans/{}", id), None)
    }

    pub fn plan_summary(&self, id: PlanId) -> ExpenseResult<SavingsSummary> {
        self.get(&format!("savings/plans/{}/summary", id), &[])
    }

    pub fn create_contribution(&self, input: &ContributionInput) -> ExpenseResult<Contribution> {
        self.send_json(Method::POST, "savings/contributions", Some(input), &[])
    }

    pub fn update_contribution(
        &self,
        id: ContributionId,
        input: &ContributionInput,
    ) -> ExpenseResult<()> {
        self.send_empty(Method::PUT, &format!("savings/contributions/{}", id), Some(input))
    }

    pub fn delete_contribution(&self, id: ContributionId) -> ExpenseResult<()> {
        self.send_empty::<()>(Method::DELETE, &format!("savings/contributions/{}", id), None)
    }

    // ---- Plumbing ----

    fn request(&self, method: Method, path: &str) -> ExpenseResult<RequestBuilder> {
        let url = self
            .api_root
            .join(path.trim_start_matches('/'))
            .map_err(|e| ExpenseError::Config(format!("Invalid API path '{}': {}", path, e)))?;

        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ExpenseResult<T> {
        self.send_json::<(), T>(Method::GET, path, None, query)
    }

    fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: &[(&str, String)],
    ) -> ExpenseResult<T> {
        let mut request = self.request(method.clone(), path)?;
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = self.execute(method, path, request)?;
        let text = response.text()?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(path, error = %e, "response did not match the expected shape");
            ExpenseError::Decode(format!("{}: {}", path, e))
        })
    }

    fn send_empty<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ExpenseResult<()> {
        let mut request = self.request(method.clone(), path)?;
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(method, path, request)?;
        Ok(())
    }

    fn execute(&self, method: Method, path: &str, request: RequestBuilder) -> ExpenseResult<Response> {
        let started = Instant::now();
        let response = request.send().map_err(|e| {
            tracing::warn!(%method, path, error = %e, "request failed");
            ExpenseError::Network(e.to_string())
        })?;

        let status = response.status();
        tracing::debug!(
            %method,
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "api request"
        );

        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().ok().and_then(|body| error_message(&body));
        if status == StatusCode::UNAUTHORIZED {
            Err(ExpenseError::Unauthorized { message })
        } else {
            Err(ExpenseError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

impl StatsSource for ApiClient {
    fn summary(&self, period: Period) -> ExpenseResult<StatsSummary> {
        ApiClient::summary(self, period)
    }
}

/// Normalize a base URL into `{base}/api/`
fn api_root(base_url: &str) -> ExpenseResult<Url> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let with_api = if trimmed.ends_with("/api") {
        format!("{}/", trimmed)
    } else {
        format!("{}/api/", trimmed)
    };

    let url = Url::parse(&with_api)
        .map_err(|e| ExpenseError::Config(format!("Invalid API URL '{}': {}", base_url, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ExpenseError::Config(format!(
            "Unsupported scheme '{}' for API URL (use http or https)",
            other
        ))),
    }
}

/// Pull `message` (or `error`) out of a JSON error body
fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}
