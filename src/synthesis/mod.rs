//! Canonical naming for decorator emission.

pub mod naming;
pub mod normalizer;

pub use naming::IdentifierGenerator;
pub use normalizer::SignatureNormalizer;
