pub mod paths;
pub mod real;
pub mod traits;

// Re-export I/O traits for convenient access
pub use paths::output_path;
pub use real::RealFileSystem;
pub use traits::FileSystem;
