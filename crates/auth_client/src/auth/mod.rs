pub mod refresh;
pub mod session;
