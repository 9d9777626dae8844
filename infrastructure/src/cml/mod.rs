//! CML rendering and persistence

pub mod file_writer;
pub mod renderer;

pub use file_writer::CmlFileWriter;
pub use renderer::CmlRenderer;
