pub mod go;

pub use go::{parse_source, ContractLocator, DirectiveScanner, GoAst, LocateOutcome};
