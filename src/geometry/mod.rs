//! 页面几何模块
//!
//! 提供翻页动画所需的蒙皮页面几何体。
//!
//! ## 功能特性
//!
//! - 分段平板网格（宽度方向 S 段）
//! - 顶点蒙皮绑定（骨骼索引 + 权重）
//! - GPU 顶点缓冲区布局

pub mod page_plate;

pub use page_plate::{
    skin_binding, MeshGroup, PageGeometry, PageVertex, PAGE_DEPTH, PAGE_HEIGHT, PAGE_SEGMENTS,
    PAGE_WIDTH, SEGMENT_WIDTH,
};
