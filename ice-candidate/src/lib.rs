#![warn(rust_2018_idioms)]
#![allow(dead_code)]

pub mod candidate;
pub mod local_ips;
pub mod priority;
pub mod relay;
