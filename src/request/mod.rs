//! Wire-level request handling: types, structural validation, normalization

pub mod normalizer;
pub mod types;
pub mod validator;

pub use normalizer::RequestNormalizer;
pub use types::SendRequest;
pub use validator::{DefaultRequestValidator, RequestValidator, ValidationLimits};
