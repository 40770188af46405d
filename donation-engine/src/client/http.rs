// donation-engine/src/client/http.rs
// HTTP 适配器 - 通过 REST 接口访问后端服务

use crate::core::Config;
use crate::services::{CategorySource, ChildDirectory, CourierChargeSource, OrderSubmissionSink};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::donation::{DonationOrder, PaymentHandle};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
use shared::models::{Category, ChildCreate, ChildDependent, ChildUpdate, CourierChargeEntry};

const CATEGORIES_PATH: &str = "api/categories";
const COURIER_CHARGES_PATH: &str = "api/courier-charges";
const ORDERS_PATH: &str = "api/donations/orders";
const CHILDREN_PATH: &str = "api/children";

/// Response envelope of the backend (success/data/error format)
#[derive(serde::Deserialize)]
struct EnvelopeResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// REST 客户端, 实现全部外部协作接口
#[derive(Debug, Clone)]
pub struct HttpDonationApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpDonationApi {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::with_message(ErrorCode::ConfigError, e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// 设置登录令牌 (Bearer)
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.request(method, self.url(path));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn exchange(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<(StatusCode, String), reqwest::Error> {
        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;
        Ok((status, text))
    }

    async fn send<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> AppResult<T> {
        let (status, text) = self.exchange(req).await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(status_error(status, &text));
        }
        decode_envelope(&text)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.send(self.request(reqwest::Method::GET, path)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        self.send(self.request(reqwest::Method::POST, path).json(body))
            .await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        self.send(self.request(reqwest::Method::PUT, path).json(body))
            .await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.send(self.request(reqwest::Method::DELETE, path)).await
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::with_message(ErrorCode::TimeoutError, err.to_string())
    } else if err.is_decode() {
        AppError::with_message(ErrorCode::InvalidFormat, err.to_string())
    } else {
        AppError::network(err.to_string())
    }
}

/// Map a non-2xx response onto an [`AppError`]
fn status_error(status: StatusCode, body: &str) -> AppError {
    // 尝试解析为 API 错误响应
    if let Ok(response) = serde_json::from_str::<ApiResponse<Value>>(body)
        && let Err(err) = response.into_result()
    {
        return err;
    }
    if let Ok(EnvelopeResponse {
        error: Some(message),
        ..
    }) = serde_json::from_str::<EnvelopeResponse>(body)
    {
        return AppError::with_message(code_for_status(status), message);
    }
    // 降级到原来的处理方式
    AppError::with_message(code_for_status(status), format!("HTTP {}: {}", status, body))
}

fn code_for_status(status: StatusCode) -> ErrorCode {
    match status {
        StatusCode::NOT_FOUND => ErrorCode::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorCode::InvalidRequest,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ErrorCode::TimeoutError,
        StatusCode::CONFLICT => ErrorCode::AlreadyExists,
        _ => ErrorCode::InternalError,
    }
}

/// Classify an order submission response
///
/// Only answers that prove the order was not created become
/// `PaymentRejected`; anything after which the order may exist is
/// `PaymentOutcomeUnknown`.
fn submission_outcome(status: StatusCode, body: &str) -> AppResult<PaymentHandle> {
    if status.is_client_error() {
        return Err(rejected(status_error(status, body)));
    }
    if !status.is_success() {
        return Err(outcome_unknown(status_error(status, body)));
    }
    match decode_envelope(body) {
        Ok(handle) => Ok(handle),
        // Explicit `success: false`
        Err(err) if err.code == ErrorCode::Unknown => Err(rejected(err)),
        Err(err) => Err(outcome_unknown(err)),
    }
}

fn submission_transport_error(err: reqwest::Error) -> AppError {
    if err.is_connect() {
        // Never reached the backend
        AppError::with_message(ErrorCode::PaymentFailed, err.to_string())
    } else {
        outcome_unknown(transport_error(err))
    }
}

fn rejected(err: AppError) -> AppError {
    match err.code.category() {
        ErrorCategory::Payment => err,
        _ => AppError::payment_rejected(err.message).with_detail("code", err.code.code()),
    }
}

fn outcome_unknown(err: AppError) -> AppError {
    AppError::with_message(ErrorCode::PaymentOutcomeUnknown, err.message)
        .with_detail("code", err.code.code())
}

/// Decode the `{ success, data, error }` envelope
///
/// A missing `data` decodes as JSON `null`, so `()` responses work.
fn decode_envelope<T: DeserializeOwned>(body: &str) -> AppResult<T> {
    let envelope: EnvelopeResponse = serde_json::from_str(body)
        .map_err(|e| AppError::with_message(ErrorCode::InvalidFormat, e.to_string()))?;
    if !envelope.success {
        let message = envelope
            .error
            .unwrap_or_else(|| ErrorCode::Unknown.message().to_string());
        return Err(AppError::with_message(ErrorCode::Unknown, message));
    }
    serde_json::from_value(envelope.data.unwrap_or(Value::Null))
        .map_err(|e| AppError::with_message(ErrorCode::InvalidFormat, e.to_string()))
}

#[async_trait]
impl CategorySource for HttpDonationApi {
    async fn fetch_categories(&self) -> AppResult<Vec<Category>> {
        self.get(CATEGORIES_PATH).await
    }
}

#[async_trait]
impl CourierChargeSource for HttpDonationApi {
    async fn fetch_courier_charges(&self) -> AppResult<Vec<CourierChargeEntry>> {
        self.get(COURIER_CHARGES_PATH).await
    }
}

#[async_trait]
impl OrderSubmissionSink for HttpDonationApi {
    async fn submit(&self, order: &DonationOrder) -> AppResult<PaymentHandle> {
        let req = self.request(reqwest::Method::POST, ORDERS_PATH).json(order);
        let (status, body) = self
            .exchange(req)
            .await
            .map_err(submission_transport_error)?;
        submission_outcome(status, &body)
    }
}

#[async_trait]
impl ChildDirectory for HttpDonationApi {
    async fn list_children(&self) -> AppResult<Vec<ChildDependent>> {
        self.get(CHILDREN_PATH).await
    }

    async fn add_child(&self, child: &ChildCreate) -> AppResult<ChildDependent> {
        self.post(CHILDREN_PATH, child).await
    }

    async fn update_child(&self, id: &str, changes: &ChildUpdate) -> AppResult<ChildDependent> {
        self.put(&format!("{}/{}", CHILDREN_PATH, id), changes).await
    }

    async fn delete_child(&self, id: &str) -> AppResult<()> {
        self.delete(&format!("{}/{}", CHILDREN_PATH, id)).await
    }
}
