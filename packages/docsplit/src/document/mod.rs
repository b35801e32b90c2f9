//! Reading and writing wrapped elements as JSON or YAML files.

mod reader;
mod writer;

pub use reader::{parse_element, read_element};
pub use writer::{to_string, write_element};
