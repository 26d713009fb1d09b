//! # API Client
//!
//! Provides the typed operations the screens call. It wraps a shared [`Transport`] and
//! the host credential, and maps every failure onto [`ApiError`].
use crate::api::error::{ApiError, TransportError};
use crate::api::transport::{ApiRequest, Transport};
use crate::model::{
    AdminMessage, BroadcastMessage, BroadcastReport, Category, CategoryId, CustomerRecord,
    OrderRequest, Product, ProductId,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// The backend's uniform response shape.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// The payload of a successful response.
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(self.error));
        }
        self.data.ok_or(ApiError::MissingData)
    }

    /// Success or rejection, ignoring the payload.
    pub fn into_ack(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(self.error))
        }
    }
}

/// Client for the bakery backend.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    init_data: Option<String>,
}

impl ApiClient {
    /// `init_data` is attached to every request as the credential header when present.
    pub fn new(transport: Arc<dyn Transport>, init_data: Option<String>) -> Self {
        Self {
            transport,
            init_data,
        }
    }

    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        debug!("get_categories called");
        self.fetch(ApiRequest::get("/categories")).await
    }

    /// Products of one category, or the full catalog when `category_id` is `None`.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        category_id: Option<&CategoryId>,
    ) -> Result<Vec<Product>, ApiError> {
        debug!("get_products called");
        let path = match category_id {
            Some(id) => format!("/products?categoryId={}", urlencoding::encode(&id.0)),
            None => "/products".to_string(),
        };
        self.fetch(ApiRequest::get(path)).await
    }

    #[instrument(skip(self))]
    pub async fn get_product_by_id(&self, id: &ProductId) -> Result<Product, ApiError> {
        debug!("get_product_by_id called");
        self.fetch(ApiRequest::get(format!(
            "/products/{}",
            urlencoding::encode(&id.0)
        )))
        .await
    }

    /// Callers skip the request for a blank query.
    #[instrument(skip(self))]
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        debug!("search_products called");
        self.fetch(ApiRequest::get(format!(
            "/products/search?query={}",
            urlencoding::encode(query)
        )))
        .await
    }

    #[instrument(skip(self, order), fields(product = %order.product_id))]
    pub async fn create_order(&self, order: &OrderRequest) -> Result<(), ApiError> {
        debug!("create_order called");
        self.write("/orders", order).await
    }

    #[instrument(skip(self, customer), fields(telegram_id = %customer.telegram_id))]
    pub async fn save_customer(&self, customer: &CustomerRecord) -> Result<(), ApiError> {
        debug!("save_customer called");
        self.write("/customers", customer).await
    }

    #[instrument(skip(self, message))]
    pub async fn send_message_to_admin(&self, message: &AdminMessage) -> Result<(), ApiError> {
        debug!("send_message_to_admin called");
        self.write("/messages/admin", message).await
    }

    #[instrument(skip(self, message))]
    pub async fn broadcast_message(
        &self,
        message: &BroadcastMessage,
    ) -> Result<BroadcastReport, ApiError> {
        debug!("broadcast_message called");
        let body = to_body(message)?;
        self.fetch(ApiRequest::post("/messages/broadcast", body))
            .await
    }

    async fn write<B: Serialize>(&self, path: &str, payload: &B) -> Result<(), ApiError> {
        let body = to_body(payload)?;
        self.call::<Value>(ApiRequest::post(path, body))
            .await?
            .into_ack()
            .inspect_err(|e| warn!(path, error = %e, "Write rejected"))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let route = request.route().to_string();
        self.call::<T>(request)
            .await?
            .into_data()
            .inspect_err(|e| warn!(route = %route, error = %e, "Request rejected"))
    }

    /// Sends exactly once; the underlying cause is logged before it is wrapped.
    async fn call<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Envelope<T>, ApiError> {
        let method = request.method;
        let route = request.route().to_string();
        let body = self
            .transport
            .send(request.with_init_data(self.init_data.clone()))
            .await
            .inspect_err(|e| warn!(%method, route = %route, error = %e, "Request failed"))?;

        serde_json::from_str(&body).map_err(|e| {
            warn!(%method, route = %route, error = %e, "Response could not be decoded");
            ApiError::Transport(TransportError::Decode(e.to_string()))
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.init_data.is_some()
    }
}

fn to_body<B: Serialize>(payload: &B) -> Result<Value, ApiError> {
    serde_json::to_value(payload)
        .map_err(|e| ApiError::Transport(TransportError::Decode(e.to_string())))
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::GENERIC_FAILURE;
    use crate::api::mock::MockTransport;
    use crate::api::transport::{Method, INIT_DATA_HEADER};
    use serde_json::json;

    fn client(mock: &Arc<MockTransport>, init_data: Option<&str>) -> ApiClient {
        ApiClient::new(mock.clone(), init_data.map(str::to_string))
    }

    #[tokio::test]
    async fn test_categories_keep_server_order() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Get, "/categories").respond_ok(json!([
            {"id": "c2", "name": "Pies"},
            {"id": "c1", "name": "Cakes"}
        ]));

        let categories = client(&mock, None).get_categories().await.unwrap();

        let ids: Vec<_> = categories.iter().map(|c| c.id.0.as_str()).collect();
        assert_eq!(ids, ["c2", "c1"]);
    }

    #[tokio::test]
    async fn test_query_is_percent_encoded() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Get, "/products/search").respond_ok(json!([]));

        client(&mock, None)
            .search_products("торт & cream")
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(
            request.path,
            "/products/search?query=%D1%82%D0%BE%D1%80%D1%82%20%26%20cream"
        );
    }

    #[tokio::test]
    async fn test_credential_header_attached_when_present() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Get, "/categories").respond_ok(json!([]));

        client(&mock, Some("auth_date=1&hash=abc"))
            .get_categories()
            .await
            .unwrap();
        client(&mock, None).get_categories().await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests[0].init_data.as_deref(), Some("auth_date=1&hash=abc"));
        assert_eq!(requests[1].init_data, None);
        assert_eq!(INIT_DATA_HEADER, "telegram-init-data");
    }

    #[tokio::test]
    async fn test_rejection_carries_server_message() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Post, "/messages/admin")
            .respond_rejected("Message too long");

        let err = client(&mock, None)
            .send_message_to_admin(&AdminMessage {
                customer_name: "Anna".into(),
                telegram_username: "".into(),
                message: "hi".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::Rejected(Some("Message too long".into())));
        assert_eq!(err.user_message(), "Message too long");
    }

    #[tokio::test]
    async fn test_failed_write_is_sent_once() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Post, "/messages/broadcast")
            .fail(TransportError::Network("connection reset".into()));

        let result = client(&mock, None)
            .broadcast_message(&BroadcastMessage {
                message: "Fresh bread today".into(),
                sender_telegram_id: Some("123456789".into()),
            })
            .await;

        assert!(matches!(result, Err(ApiError::Transport(_))));
        assert_eq!(mock.count(Method::Post, "/messages/broadcast"), 1);
    }

    #[tokio::test]
    async fn test_save_customer_posts_record() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Post, "/customers").respond_ok(json!(null));
        let record = CustomerRecord {
            telegram_id: "42".into(),
            name: "Anna Petrova".into(),
            username: "anna_p".into(),
            contact: "+7 900 000-00-00".into(),
        };

        client(&mock, Some("auth_date=1&hash=abc"))
            .save_customer(&record)
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/customers");
        assert_eq!(request.init_data.as_deref(), Some("auth_date=1&hash=abc"));
        assert_eq!(
            request.body.unwrap(),
            json!({
                "telegramId": "42",
                "name": "Anna Petrova",
                "username": "anna_p",
                "contact": "+7 900 000-00-00"
            })
        );
    }

    #[tokio::test]
    async fn test_failed_customer_save_is_sent_once() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Post, "/customers")
            .fail(TransportError::Status {
                status: 503,
                body: "unavailable".into(),
            });
        let record = CustomerRecord {
            telegram_id: "42".into(),
            name: "Anna".into(),
            username: String::new(),
            contact: String::new(),
        };

        let err = client(&mock, None).save_customer(&record).await.unwrap_err();

        assert!(matches!(
            err,
            ApiError::Transport(TransportError::Status { status: 503, .. })
        ));
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        assert_eq!(mock.count(Method::Post, "/customers"), 1);
        assert_eq!(mock.writes(), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_decode_error() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Get, "/products/p1").respond_raw("<html>");

        let err = client(&mock, None)
            .get_product_by_id(&ProductId::from("p1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Transport(TransportError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_success_without_data() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Get, "/categories")
            .respond_raw(r#"{"success":true}"#);

        let err = client(&mock, None).get_categories().await.unwrap_err();
        assert_eq!(err, ApiError::MissingData);
    }

    #[tokio::test]
    async fn test_category_filter_in_query() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Get, "/products?categoryId=c1")
            .respond_ok(json!([{"id": "p1", "name": "Medovik", "categoryId": "c1"}]));
        mock.on(Method::Get, "/products").respond_ok(json!([]));

        let api = client(&mock, None);
        let in_category = api.get_products(Some(&CategoryId::from("c1"))).await.unwrap();
        let all = api.get_products(None).await.unwrap();

        assert_eq!(in_category.len(), 1);
        assert!(all.is_empty());
    }
}
