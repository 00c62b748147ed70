use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::{ClientError, Result};

pub(crate) async fn post_json<B, T>(http: &Client, url: &str, body: &B) -> Result<T>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let response = http.post(url).json(body).send().await?;

    let status = response.status();
    debug!("POST {} responded with {}", url, status);

    let text = response.text().await?;
    if !status.is_success() {
        return Err(ClientError::Status { status, body: text });
    }

    Ok(serde_json::from_str(&text)?)
}
