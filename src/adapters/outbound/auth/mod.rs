mod credential_store;

pub use credential_store::{hash_password, AdminAccount, CredentialStoreAuthenticator};
