use anyhow::{Error, Result};
use reqwest::{Client, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Query values are percent-encoded, so symbols like `BRK.B` or `^GSPC` pass through intact.
pub fn build_request(
    client: &Client,
    base_url: &str,
    endpoint: &str,
    params: &[(&str, &str)],
) -> Result<Request> {
    let url = format!("{}/{}", base_url, endpoint);
    Ok(client.get(&url).query(params).build()?)
}

pub async fn make_request(
    client: &Client,
    base_url: &str,
    endpoint: &str,
    params: &[(&str, &str)],
) -> Result<Value> {
    let request = build_request(client, base_url, endpoint, params)?;
    let res = client.execute(request).await?;

    if !res.status().is_success() {
        return Err(Error::msg(format!("Request failed: {}", res.status())));
    }

    let text = res.text().await?;
    let data = serde_json::from_str::<Value>(&text)?;

    Ok(data)
}

pub fn parse_response_array<T>(data: Value, error_msg: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    match data {
        Value::Array(items) => {
            let result: Vec<T> = items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect();

            if result.is_empty() {
                Err(Error::msg(error_msg.to_string()))
            } else {
                Ok(result)
            }
        }
        _ => Err(Error::msg("Unexpected API response format: not an array")),
    }
}
