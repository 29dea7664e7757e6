pub mod config;
pub mod consts;
pub mod gateway;
pub mod logging;
pub mod prompts;
pub mod upstream;
