pub mod error_code;
pub mod outcome;
pub mod response;
pub mod upload;
