pub mod credentials;
pub mod extractor;
pub mod jwt;
pub mod password;
pub mod session;

pub use credentials::authorize;
pub use extractor::{AdminSession, CurrentSession, require_admin};
pub use jwt::SessionClaims;
pub use session::{current_session, issue_session};
