// src/client/mod.rs

pub mod view;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::dtos::product::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::services::product::PRODUCT_PATH;

pub use view::{ProductForm, ProductView, SortBy};

// Transport failures and non-2xx statuses both map to the operation's message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Could not fetch products")]
    FetchAll,
    #[error("Could not fetch product")]
    Fetch,
    #[error("Could not create product")]
    Create,
    #[error("Could not update product")]
    Update,
    #[error("Could not delete product")]
    Delete,
}

#[derive(Clone)]
pub struct ProductClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ProductClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), PRODUCT_PATH),
        }
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.endpoint, id)
    }

    pub async fn get_all_products(&self) -> Result<Vec<ProductResponse>, ClientError> {
        let response = send(self.http.get(&self.endpoint), ClientError::FetchAll).await?;
        decode(response, ClientError::FetchAll).await
    }

    pub async fn get_product(&self, id: i64) -> Result<ProductResponse, ClientError> {
        let response = send(self.http.get(self.item_url(id)), ClientError::Fetch).await?;
        decode(response, ClientError::Fetch).await
    }

    pub async fn create_product(&self, req: &CreateProductRequest) -> Result<ProductResponse, ClientError> {
        let response = send(self.http.post(&self.endpoint).json(req), ClientError::Create).await?;
        decode(response, ClientError::Create).await
    }

    pub async fn update_product(
        &self,
        id: i64,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ClientError> {
        let response = send(self.http.put(self.item_url(id)).json(req), ClientError::Update).await?;
        decode(response, ClientError::Update).await
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), ClientError> {
        send(self.http.delete(self.item_url(id)), ClientError::Delete).await?;
        Ok(())
    }
}

async fn send(request: RequestBuilder, err: ClientError) -> Result<Response, ClientError> {
    match request.send().await {
        Ok(response) if response.status().is_success() => Ok(response),
        Ok(response) => {
            debug!(status = %response.status(), "{err}");
            Err(err)
        }
        Err(e) => {
            debug!(error = %e, "{err}");
            Err(err)
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response, err: ClientError) -> Result<T, ClientError> {
    response.json::<T>().await.map_err(|e| {
        debug!(error = %e, "{err}");
        err
    })
}
