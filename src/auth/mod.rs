//! Bearer-token authentication: header extraction, HS256 verification and
//! the `CurrentUser` request extractor.

mod extractors;
mod jwt;
mod token;

pub use extractors::CurrentUser;
pub use jwt::{AuthVerifier, Claims};
pub use token::TokenExtractor;
