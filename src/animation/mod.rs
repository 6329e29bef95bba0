//! 翻页动画模块
//!
//! 提供每页一条的骨骼链、角度阻尼缓动和逐帧翻页动画。
//!
//! ## 功能特性
//!
//! - 骨骼链（索引式父子层级 + 蒙皮矩阵）
//! - 帧率无关的指数阻尼缓动
//! - 翻页动画服务与 ECS 系统
//!
//! ## 使用示例
//!
//! ```
//! use book_flip::animation::{BoneChain, PageFlipService};
//! use book_flip::geometry::{PAGE_SEGMENTS, SEGMENT_WIDTH};
//!
//! // 每个页面实例挂载时创建一条骨骼链
//! let mut chain = BoneChain::for_page(PAGE_SEGMENTS, SEGMENT_WIDTH);
//!
//! // 每帧由帧驱动方调用
//! PageFlipService::advance(&mut chain, 3, true, false, 1.0 / 60.0);
//! chain.update_pose();
//! ```

pub mod animator;
pub mod easing;
pub mod skeleton;

pub use animator::{
    page_animation_system, PageFlipService, EASING_FACTOR, INSIDE_CURVE_BONES,
    INSIDE_CURVE_STRENGTH, PAGE_FAN_DEGREES,
};
pub use easing::{damp, damp_angle};
pub use skeleton::{BoneChain, PageBone};
