use async_trait::async_trait;
use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{ApiError, Credentials, Medication, MedicationApi, MedicationId, MedicationUpdate, NewMedication};

/// API client for the medication server
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create an API client rooted at `base_url`
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn medication_url(&self, id: MedicationId, action: Option<&str>) -> String {
        match action {
            Some(action) => self.url(&format!("/medications/{}/{}", id, action)),
            None => self.url(&format!("/medications/{}", id)),
        }
    }

    /// Send a request and turn transport failures and non-2xx statuses into `ApiError`
    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Status { status, body })
        }
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_text(request: RequestBuilder) -> Result<String, ApiError> {
        let response = Self::send(request).await?;
        response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl MedicationApi for ApiClient {
    async fn register(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let request = Request::post(&self.url("/auth/register")).query(credentials.query_pairs());
        Self::send_text(request).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let request = Request::post(&self.url("/auth/login")).query(credentials.query_pairs());
        Self::send_text(request).await
    }

    async fn list_medications(&self, username: &str) -> Result<Vec<Medication>, ApiError> {
        let request = Request::get(&self.url("/medications")).query([("username", username)]);
        Self::send_json(request).await
    }

    async fn add_medication(&self, new_medication: &NewMedication) -> Result<Medication, ApiError> {
        let request = Request::post(&self.url("/medications")).query(new_medication.query_pairs());
        Self::send_json(request).await
    }

    async fn update_medication(&self, id: MedicationId, update: &MedicationUpdate) -> Result<Medication, ApiError> {
        let request = Request::put(&self.medication_url(id, None)).query(update.query_pairs());
        Self::send_json(request).await
    }

    async fn delete_medication(&self, id: MedicationId) -> Result<(), ApiError> {
        Self::send(Request::delete(&self.medication_url(id, None))).await?;
        Ok(())
    }

    async fn take_medication(&self, id: MedicationId) -> Result<(), ApiError> {
        Self::send(Request::post(&self.medication_url(id, Some("take")))).await?;
        Ok(())
    }

    async fn snooze_medication(&self, id: MedicationId) -> Result<(), ApiError> {
        Self::send(Request::post(&self.medication_url(id, Some("snooze")))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_urls() {
        let client = ApiClient::with_base_url("http://example.test/api/".to_string());
        assert_eq!(client.url("/medications"), "http://example.test/api/medications");
        assert_eq!(client.medication_url(7, None), "http://example.test/api/medications/7");
        assert_eq!(client.medication_url(7, Some("snooze")), "http://example.test/api/medications/7/snooze");
    }

    #[wasm_bindgen_test]
    async fn test_unreachable_server_is_a_network_error() {
        let client = ApiClient::with_base_url("http://127.0.0.1:9/api".to_string());
        let error = client.list_medications("alice").await.unwrap_err();
        assert!(matches!(error, ApiError::Network(_)));
        assert_eq!(error.connection_reason(), "Server not reachable");
    }
}
