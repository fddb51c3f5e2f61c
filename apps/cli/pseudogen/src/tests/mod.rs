mod driver;
mod error;
