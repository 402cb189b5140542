pub mod context;
pub mod dispatch;
pub mod interpreter;
