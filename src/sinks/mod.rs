//! Ready-made output sinks
//!
//! Any `std::io::Write + Send` value can be a sink; these cover the common
//! cases of keeping a handle to the output and appending to a file.

pub mod buffer;
pub mod file;

pub use buffer::SharedBuffer;
pub use file::FileSink;
