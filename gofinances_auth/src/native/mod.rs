mod adapter;
mod errors;
mod types;

pub use adapter::NativeSignInAdapter;
pub use errors::CredentialError;
pub use types::{
    CredentialProvider, CredentialScope, FullName, NativeCredential, UnsupportedPlatformProvider,
};
