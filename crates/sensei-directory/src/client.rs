//! Async HTTP client for the remote student directory.

use std::{future::Future, time::Duration};

use reqwest::Client;
use sensei_core::student::{NewStudent, StudentPatch};

use crate::{
  Error, Result,
  api::DirectoryApi,
  wire::{StudentDto, create_body, update_body},
};

/// Connection settings for the directory service.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
  pub base_url: String,
}

/// HTTP implementation of [`DirectoryApi`].
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based. No retry
/// or backoff layer; a call resolves or fails once, within the client's
/// 30 s timeout.
#[derive(Clone)]
pub struct HttpDirectory {
  client: Client,
  config: DirectoryConfig,
}

impl HttpDirectory {
  pub fn new(config: DirectoryConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Pass a 2xx response through; turn anything else into [`Error::Http`]
  /// with the body text (or the status fallback) as the message.
  async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(Error::Http {
      status:  status.as_u16(),
      message: status_message(status.as_u16(), body),
    })
  }

  async fn decode<T>(resp: reqwest::Response) -> Result<T>
  where
    T: serde::de::DeserializeOwned,
  {
    let resp = Self::check(resp).await?;
    Ok(resp.json().await?)
  }
}

/// The error message for a non-2xx response: the body text when there is
/// any, otherwise `HTTP <status>`.
pub(crate) fn status_message(status: u16, body: String) -> String {
  if body.is_empty() {
    format!("HTTP {status}")
  } else {
    body
  }
}

impl DirectoryApi for HttpDirectory {
  fn list(&self) -> impl Future<Output = Result<Vec<StudentDto>>> + Send + '_ {
    async move {
      let resp = self.client.get(self.url("/students")).send().await?;
      Self::decode(resp).await
    }
  }

  fn fetch<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<StudentDto>> + Send + 'a {
    async move {
      let resp = self
        .client
        .get(self.url(&format!("/students/{id}")))
        .send()
        .await?;
      Self::decode(resp).await
    }
  }

  fn create<'a>(
    &'a self,
    input: &'a NewStudent,
  ) -> impl Future<Output = Result<StudentDto>> + Send + 'a {
    async move {
      let resp = self
        .client
        .post(self.url("/students"))
        .json(&create_body(input))
        .send()
        .await?;
      Self::decode(resp).await
    }
  }

  fn update<'a>(
    &'a self,
    id: &'a str,
    patch: &'a StudentPatch,
  ) -> impl Future<Output = Result<StudentDto>> + Send + 'a {
    async move {
      let resp = self
        .client
        .patch(self.url(&format!("/students/{id}")))
        .json(&update_body(patch))
        .send()
        .await?;
      Self::decode(resp).await
    }
  }

  fn delete<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<()>> + Send + 'a {
    async move {
      let resp = self
        .client
        .delete(self.url(&format!("/students/{id}")))
        .send()
        .await?;
      Self::check(resp).await?;
      Ok(())
    }
  }
}
