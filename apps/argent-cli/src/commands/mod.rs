pub mod domain;
pub mod register;

pub use domain::cmd_open;
pub use register::cmd_register;
