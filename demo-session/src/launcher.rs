use async_trait::async_trait;
use gofinances_auth::{OAuth2Error, RedirectLauncher, RedirectOutcome};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Terminal stand-in for the system browser.
///
/// Prints the authorization URL and waits for the redirect URL to be pasted
/// back. An empty line counts as a dismissed session.
pub(crate) struct StdinLauncher;

#[async_trait]
impl RedirectLauncher for StdinLauncher {
    async fn launch(&self, auth_url: &str) -> Result<RedirectOutcome, OAuth2Error> {
        let mut stdout = tokio::io::stdout();
        let prompt = format!(
            "Open this URL in a browser and sign in:\n\n  {auth_url}\n\nPaste the URL you were redirected to (empty to cancel): "
        );
        stdout
            .write_all(prompt.as_bytes())
            .await
            .map_err(|e| OAuth2Error::Provider(format!("Failed to write prompt: {e}")))?;
        stdout
            .flush()
            .await
            .map_err(|e| OAuth2Error::Provider(format!("Failed to write prompt: {e}")))?;

        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await
            .map_err(|e| OAuth2Error::Provider(format!("Failed to read redirect URL: {e}")))?;

        let outcome = RedirectOutcome::from_redirect_url(&line);
        tracing::debug!("Redirect outcome: {}", outcome.outcome_type);
        Ok(outcome)
    }
}
