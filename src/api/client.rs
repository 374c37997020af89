use std::future::Future;
use std::time::Duration;

use color_eyre::{eyre::eyre, Result};
use url::Url;

use crate::config::ApiConfig;
use crate::resolver::{Entity, Remote};

use super::error::FetchError;

/// HTTP client for the remote directory.
///
/// The remote exposes two endpoints per collection: `GET /{kind}` for the
/// full collection and `GET /{kind}/{id}` for a single entity.
#[derive(Clone)]
pub struct ApiClient {
  http: reqwest::Client,
  base: Url,
}

impl ApiClient {
  pub fn new(config: &ApiConfig) -> Result<Self> {
    let base = Url::parse(&config.url)
      .map_err(|e| eyre!("Invalid API URL {}: {}", config.url, e))?;

    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { http, base })
  }

  fn endpoint(&self, path: &str) -> String {
    format!("{}/{}", self.base.as_str().trim_end_matches('/'), path)
  }
}

impl Remote for ApiClient {
  fn fetch_collection<T: Entity>(
    &self,
  ) -> impl Future<Output = Result<Vec<T>, FetchError>> + Send {
    let kind = T::kind();
    let url = self.endpoint(kind.as_str());
    let http = self.http.clone();

    async move {
      let response = http
        .get(&url)
        .send()
        .await
        .map_err(|e| FetchError::collection(kind, e))?;

      if !response.status().is_success() {
        return Err(FetchError::collection(
          kind,
          format!("server returned {}", response.status()),
        ));
      }

      response
        .json::<Vec<T>>()
        .await
        .map_err(|e| FetchError::collection(kind, e))
    }
  }

  fn fetch_item<T: Entity>(&self, id: &str) -> impl Future<Output = Result<T, FetchError>> + Send {
    let kind = T::kind();
    let url = self.endpoint(&format!("{}/{}", kind.as_str(), id));
    let http = self.http.clone();
    let id = id.to_string();

    async move {
      let response = http
        .get(&url)
        .send()
        .await
        .map_err(|e| FetchError::item(kind, id.clone(), e))?;

      if !response.status().is_success() {
        return Err(FetchError::item(
          kind,
          id,
          format!("server returned {}", response.status()),
        ));
      }

      response
        .json::<T>()
        .await
        .map_err(|e| FetchError::item(kind, id, e))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn client(url: &str) -> ApiClient {
    ApiClient::new(&ApiConfig {
      url: url.to_string(),
      timeout_secs: 5,
    })
    .expect("client")
  }

  #[test]
  fn test_endpoint_joins_without_double_slash() {
    let c = client("https://example.com/");
    assert_eq!(c.endpoint("users"), "https://example.com/users");
    assert_eq!(c.endpoint("users/3"), "https://example.com/users/3");
  }

  #[test]
  fn test_rejects_invalid_url() {
    let result = ApiClient::new(&ApiConfig {
      url: "not a url".to_string(),
      timeout_secs: 5,
    });
    assert!(result.is_err());
  }
}
