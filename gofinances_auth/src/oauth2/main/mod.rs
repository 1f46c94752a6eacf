mod core;
mod google;

pub use core::RedirectOAuthAdapter;
