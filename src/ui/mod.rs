//! UI 渲染层

pub mod components;
pub mod home;
