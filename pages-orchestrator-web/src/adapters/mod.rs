//! 存储适配器

mod json_file_config;

pub use json_file_config::JsonFileConfigRepository;
