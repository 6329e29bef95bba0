//! 资源模块
//!
//! 页面纹理的加载与缓存。纹理由外部资产协作方在网格构建前异步获取；
//! 本模块只负责路径约定、解码入缓存与颜色空间标记。

pub mod textures;

pub use textures::{ColorSpace, PageTexture, TextureError, TextureLibrary};
