//! Authentication and authorization
//!
//! - [`JwtService`] - token issuance and validation
//! - [`CurrentUser`] - authenticated caller
//! - [`require_auth`] - authentication middleware
//! - [`ManagerCapability`] - MANAGER-only extractor
//! - [`TokenStore`] - where issued tokens are recorded

pub mod capability;
pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod session;

pub use capability::{ManagerCapability, check_manager};
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, RefreshClaims, TokenPair};
pub use middleware::{TOKEN_HEADER, require_auth};
pub use password::{hash_password, verify_password};
pub use session::{TokenStore, issue_and_persist, issue_for, refresh};
