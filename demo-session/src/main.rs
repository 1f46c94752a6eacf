use dotenvy::dotenv;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gofinances_auth::{
    NativeSignInAdapter, RedirectOAuthAdapter, RedirectOAuthConfig, SessionContext,
    SessionController, UnsupportedPlatformProvider, session_store_from_env,
};

mod launcher;

use crate::launcher::StdinLauncher;

const USAGE: &str = "usage: demo-session [status|google|apple|signout]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = session_store_from_env()?;
    let google =
        RedirectOAuthAdapter::new(RedirectOAuthConfig::from_env()?, Arc::new(StdinLauncher))?;
    let apple = NativeSignInAdapter::new(Arc::new(UnsupportedPlatformProvider));

    let controller = Arc::new(SessionController::new(
        store,
        Arc::new(google),
        Arc::new(apple),
    ));
    let context = SessionContext::new(controller);
    context.ready().await;

    let command = std::env::args().nth(1).unwrap_or_else(|| "status".to_string());
    match command.as_str() {
        "status" => {}
        "google" => context.sign_in_with_google().await?,
        "apple" => context.sign_in_with_apple().await?,
        "signout" => context.sign_out().await?,
        _ => {
            eprintln!("{USAGE}");
            return Ok(());
        }
    }

    match context.user() {
        Some(user) => println!(
            "Signed in as {} <{}> (id: {})",
            user.name, user.email, user.id
        ),
        None => println!("Not signed in"),
    }
    Ok(())
}
