#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod common;
pub mod config;
pub mod engine;
pub mod game;
pub mod input;
pub mod log;
pub mod pieces;
pub mod scheduler;
pub mod session;
pub mod shape;
