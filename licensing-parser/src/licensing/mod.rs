//! Main module for licensing library functionality

pub mod ast;
pub mod bounds;
pub mod building;
pub mod context;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod matching;
pub mod pipeline;
pub mod sorting;
pub mod testing;
pub mod vocabulary;
