pub mod capture_credentials;

pub use capture_credentials::capture_credentials;
