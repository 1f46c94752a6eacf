mod config;
mod errors;
mod main;
mod types;

pub use config::RedirectOAuthConfig;
pub use errors::OAuth2Error;
pub use main::RedirectOAuthAdapter;
pub use types::{REDIRECT_SUCCESS, RedirectLauncher, RedirectOutcome};
