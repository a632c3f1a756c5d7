#![forbid(unsafe_code)]

pub mod assemble;
pub mod cli;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod find;
pub mod formats;
pub mod locate;
pub mod logging;
pub mod normalize;
pub mod note_store;
pub mod pipeline;
