//! Configuration module for recap
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::{
    GeneralSettings, LlmSettings, RetrySettings, Settings, TimeoutSettings, LLM_API_KEY_ENV,
    LLM_API_URL_ENV,
};
