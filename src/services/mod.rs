pub mod chronotype;
pub mod recommend;
pub mod solar;
