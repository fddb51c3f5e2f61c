mod config;
mod input;
mod prompt;
mod registry;
