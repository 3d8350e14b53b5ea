//! Shared reqwest plumbing.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use saferoute_core::Unavailable;
use serde::de::DeserializeOwned;

pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")
}

pub(crate) fn classify(err: reqwest::Error) -> Unavailable {
    if err.is_timeout() {
        Unavailable::Timeout
    } else if err.is_decode() {
        Unavailable::Malformed(err.to_string())
    } else if let Some(status) = err.status() {
        Unavailable::Status(status.as_u16())
    } else {
        Unavailable::Transport(err.to_string())
    }
}

/// Check the status and decode the JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, Unavailable> {
    let status = response.status();
    if !status.is_success() {
        return Err(Unavailable::Status(status.as_u16()));
    }
    response.json::<T>().await.map_err(classify)
}
