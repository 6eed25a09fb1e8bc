pub mod project;
pub mod user;

pub use project::Project;
pub use user::{Role, StoredCredentials, User};
