pub mod config;
pub mod logging;

pub mod failure;
pub mod headers;
pub mod http;
pub mod playlist;
pub mod probe;
pub mod scheduler;
pub mod source;
pub mod storage;
pub mod trace;
pub mod validator;
