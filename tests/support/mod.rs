#![allow(dead_code)]

pub mod mock_peer;
pub mod mock_processor;
