pub mod contract;
pub mod stage;

pub use contract::{
    is_context_type, is_error_type, ContractDefinition, GeneratedArtifact, MethodSignature,
    Parameter, ParameterList, BLANK_NAME, CONTEXT_NAME, ERROR_NAME, ERROR_TYPE, VARIADIC_MARKER,
};
pub use stage::Stage;
