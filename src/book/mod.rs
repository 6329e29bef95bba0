//! 书本组合模块
//!
//! 把几何模板、骨骼链、材质与纹理组合成一本可翻动的书。
//!
//! ## 功能特性
//!
//! - `BookState` 资源：外部"当前页"值 + 有序页面描述符列表
//! - 页面组件与延迟挂载（纹理未就绪时先不挂网格/骨骼链）
//! - 共享基础材质 + 每实例正反面贴图材质
//! - 页面堆叠系统（按当前页计算堆叠深度）

pub mod materials;
pub mod page;
pub mod state;
pub mod systems;

pub use materials::{base_materials, PageMaterial, PageMaterialSet};
pub use page::{Page, SkinnedPage};
pub use state::{BookError, BookState, PageDescriptor};
pub use systems::{page_stacking_system, BookRoot, BookService, SharedPageGeometry};
