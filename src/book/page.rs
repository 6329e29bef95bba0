//! 页面组件
//!
//! `Page` 是页面的身份数据；`SkinnedPage` 持有共享几何模板与每实例
//! 材质集，只有正反面纹理都就绪后才会挂到实体上。

use bevy_ecs::prelude::*;
use std::sync::Arc;

use super::materials::PageMaterialSet;
use crate::geometry::PageGeometry;

/// 页面组件 - 序号与正反面纹理标识符
///
/// 动画与堆叠只读取 `number`；纹理标识符随实体携带，供延迟挂载的
/// 页面在纹理就绪后补挂网格（见 `BookService::remount_deferred`）。
#[derive(Component, Clone, Debug)]
pub struct Page {
    /// 页面在书中的序号（0 起）
    pub number: usize,
    /// 正面纹理标识符
    pub front: String,
    /// 背面纹理标识符
    pub back: String,
}

impl Page {
    pub fn new(number: usize, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            number,
            front: front.into(),
            back: back.into(),
        }
    }
}

/// 蒙皮页面网格组件
///
/// 几何体是全书共享的只读模板；材质集归本实例所有。
#[derive(Component)]
pub struct SkinnedPage {
    /// 共享几何模板
    pub geometry: Arc<PageGeometry>,
    /// 每实例材质集
    pub materials: PageMaterialSet,
    /// 投射阴影
    pub cast_shadow: bool,
    /// 接收阴影
    pub receive_shadow: bool,
    /// 参与视锥剔除（翻页中的页面会大幅越出包围盒，默认关闭）
    pub frustum_culled: bool,
}

impl SkinnedPage {
    pub fn new(geometry: Arc<PageGeometry>, materials: PageMaterialSet) -> Self {
        Self {
            geometry,
            materials,
            cast_shadow: true,
            receive_shadow: true,
            frustum_culled: false,
        }
    }
}
