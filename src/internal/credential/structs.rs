pub mod cookie_record;
pub mod credential_error;
pub mod session_credentials;

pub use cookie_record::CookieRecord;
pub use credential_error::CredentialError;
pub use session_credentials::{SessionCredentials, DEFAULT_USER_AGENT};
