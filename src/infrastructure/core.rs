mod json_file;
mod memory;

pub use self::json_file::*;
pub use self::memory::*;
