use std::time::Duration;

use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::GoogleUserInfo;

pub(super) fn build_client() -> Result<reqwest::Client, OAuth2Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .map_err(|e| OAuth2Error::Config(format!("Failed to create HTTP client: {e}")))
}

// The query of a userinfo URL carries the access token.
fn loggable_url(url: &reqwest::Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

/// Fetch the profile behind `access_token`.
///
/// Transport failures are `Network`; an unusable answer is `Provider`.
pub(super) async fn fetch_user_data_from_google(
    client: &reqwest::Client,
    userinfo_url: &str,
    access_token: &str,
) -> Result<GoogleUserInfo, OAuth2Error> {
    let response = client
        .get(userinfo_url)
        .query(&[("alt", "json"), ("access_token", access_token)])
        .send()
        .await
        .map_err(|e| OAuth2Error::Network(e.without_url().to_string()))?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!(
            "Userinfo request to {} failed with status {}",
            loggable_url(response.url()),
            status
        );
        return Err(OAuth2Error::Provider(format!(
            "Userinfo request failed with status {status}"
        )));
    }

    let response_body = response
        .text()
        .await
        .map_err(|e| OAuth2Error::Network(e.without_url().to_string()))?;

    tracing::debug!("Response Body: {:#?}", response_body);
    let user_data: GoogleUserInfo = serde_json::from_str(&response_body)
        .map_err(|e| OAuth2Error::Provider(format!("Failed to deserialize response body: {e}")))?;

    Ok(user_data)
}
