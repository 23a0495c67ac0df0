pub mod boundary;
pub mod extractor;
pub mod file_magic;
pub mod multipart;
pub mod parameter_error_handler;
pub mod validate;

pub use boundary::guard;
pub use extractor::{SafeIDI64, SafeImageName};
pub use file_magic::validate_magic_bytes;
pub use multipart::{MultipartForm, read_multipart_form};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
