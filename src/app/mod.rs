pub mod ports;

pub use ports::{HttpClientPort, HttpGetResult};
