#![allow(dead_code)]

pub mod backend_server;
pub mod fakes;
pub mod redis_container;
pub mod stub_gateway;
