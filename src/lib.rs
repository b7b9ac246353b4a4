#![cfg_attr(doc, doc = include_str!("../README.md"))]

pub mod account;
pub mod config;
pub mod error;
pub mod immutables;
pub mod mapper;
pub(crate) mod serde_helpers;
pub mod types;
pub mod utils;

use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;
