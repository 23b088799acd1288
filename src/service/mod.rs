//! Service 模块
//!
//! 按链族划分的规则模块 + 状态编排入口

pub mod cosmos_validator;
pub mod ripple_validator;
pub mod status_service;

pub use cosmos_validator::CosmosValidator;
pub use ripple_validator::RippleValidator;
pub use status_service::StatusEngine;
