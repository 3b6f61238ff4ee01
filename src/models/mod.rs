pub mod achievement;
pub mod club;
pub mod college;
pub mod common;
pub mod dashboard;
pub mod event;
pub mod partner;
pub mod user;

pub use achievement::*;
pub use club::*;
pub use college::*;
pub use common::*;
pub use dashboard::*;
pub use event::*;
pub use partner::*;
pub use user::*;
