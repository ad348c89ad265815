pub mod constants;
pub mod device;
pub mod log_file;
pub mod model_resolver;
pub mod model_size;
