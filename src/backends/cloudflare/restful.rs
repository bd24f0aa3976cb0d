use std::time::Duration;

use crate::err::*;
use reqwest::Response;
use serde_json::Value as JsonVal;

/// Thin wrapper over one shared client with an explicit request timeout.
pub struct Restful {
    client: reqwest::Client,
}

enum ReqMethod {
    Get,
    Post,
    Patch,
}

impl Restful {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client })
    }

    fn request_builder(
        &self,
        url: &str,
        method: ReqMethod,
        headers: Option<Vec<(&str, &str)>>,
    ) -> reqwest::RequestBuilder {
        let mut builder = match method {
            ReqMethod::Get => self.client.get(url),
            ReqMethod::Post => self.client.post(url),
            ReqMethod::Patch => self.client.patch(url),
        };

        builder = builder.header("Content-Type", "application/json");

        if let Some(headers) = headers {
            for header in headers.into_iter() {
                builder = builder.header(header.0, header.1);
            }
        }

        builder
    }

    async fn non_success_to_error(resp: Response) -> Result<String> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(AppErr::Provider(format!("{} response: {}", status, body)));
        }

        Ok(body)
    }

    pub async fn get(&self, url: &str, headers: Option<Vec<(&str, &str)>>) -> Result<JsonVal> {
        let builder = self.request_builder(url, ReqMethod::Get, headers);

        let resp = builder.send().await?;
        let body = Self::non_success_to_error(resp).await?;
        let json: JsonVal = serde_json::from_str(&body)?;

        Ok(json)
    }

    pub async fn post(
        &self,
        url: &str,
        headers: Option<Vec<(&str, &str)>>,
        json: &JsonVal,
    ) -> Result<JsonVal> {
        let builder = self.request_builder(url, ReqMethod::Post, headers);

        let resp = builder.json(json).send().await?;
        let body = Self::non_success_to_error(resp).await?;
        let json: JsonVal = serde_json::from_str(&body)?;

        Ok(json)
    }

    pub async fn patch(
        &self,
        url: &str,
        headers: Option<Vec<(&str, &str)>>,
        json: &JsonVal,
    ) -> Result<JsonVal> {
        let builder = self.request_builder(url, ReqMethod::Patch, headers);

        let resp = builder.json(json).send().await?;
        let body = Self::non_success_to_error(resp).await?;
        let json: JsonVal = serde_json::from_str(&body)?;

        Ok(json)
    }
}
