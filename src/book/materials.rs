//! 页面材质
//!
//! 四个白色基础材质（纸芯四个侧面）在所有页面实例间以 `Arc` 只读共享；
//! 正反面两个贴图材质由每个实例各自持有，避免任何消费方改动材质时
//! 串染到其他页面。

use std::sync::{Arc, OnceLock};

use crate::resources::PageTexture;

/// 页面材质
#[derive(Clone, Debug)]
pub struct PageMaterial {
    /// 基础颜色
    pub color: [f32; 4],
    /// 粗糙度
    pub roughness: f32,
    /// 环境贴图强度
    pub env_map_intensity: f32,
    /// 表面贴图（基础材质无贴图）
    pub texture: Option<Arc<PageTexture>>,
}

impl PageMaterial {
    /// 白色基础材质
    pub fn base() -> Self {
        Self {
            color: [1.0; 4],
            roughness: 0.5,
            env_map_intensity: 1.0,
            texture: None,
        }
    }

    /// 带表面贴图的页面材质
    pub fn textured(texture: Arc<PageTexture>) -> Self {
        Self {
            color: [1.0; 4],
            roughness: 1.0,
            env_map_intensity: 0.2,
            texture: Some(texture),
        }
    }
}

/// 共享基础材质列表（只读，跨实例复用）
pub fn base_materials() -> &'static Arc<[PageMaterial; 4]> {
    static BASE: OnceLock<Arc<[PageMaterial; 4]>> = OnceLock::new();
    BASE.get_or_init(|| {
        Arc::new([
            PageMaterial::base(),
            PageMaterial::base(),
            PageMaterial::base(),
            PageMaterial::base(),
        ])
    })
}

/// 每页材质集
///
/// 材质槽与几何体面组对应：0..=3 为共享基础材质，4 为正面贴图，
/// 5 为背面贴图。
pub struct PageMaterialSet {
    base: Arc<[PageMaterial; 4]>,
    /// 正面贴图材质（每实例独有）
    pub front: PageMaterial,
    /// 背面贴图材质（每实例独有）
    pub back: PageMaterial,
}

impl PageMaterialSet {
    /// 用正反面纹理构建材质集
    pub fn new(front: Arc<PageTexture>, back: Arc<PageTexture>) -> Self {
        Self {
            base: base_materials().clone(),
            front: PageMaterial::textured(front),
            back: PageMaterial::textured(back),
        }
    }

    /// 材质槽数量
    pub fn len(&self) -> usize {
        self.base.len() + 2
    }

    /// 材质槽是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按材质槽取材质
    pub fn material(&self, material_index: usize) -> Option<&PageMaterial> {
        match material_index {
            0..=3 => self.base.get(material_index),
            4 => Some(&self.front),
            5 => Some(&self.back),
            _ => None,
        }
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ColorSpace;
    use image::RgbaImage;

    fn texture() -> Arc<PageTexture> {
        Arc::new(PageTexture {
            image: RgbaImage::new(2, 2),
            color_space: ColorSpace::Srgb,
        })
    }

    #[test]
    fn test_base_materials_shared_by_reference() {
        let set_a = PageMaterialSet::new(texture(), texture());
        let set_b = PageMaterialSet::new(texture(), texture());
        assert!(Arc::ptr_eq(&set_a.base, &set_b.base));
    }

    #[test]
    fn test_material_slots_match_mesh_groups() {
        let set = PageMaterialSet::new(texture(), texture());
        assert_eq!(set.len(), 6);
        for slot in 0..4 {
            assert!(set.material(slot).unwrap().texture.is_none());
        }
        assert!(set.material(4).unwrap().texture.is_some());
        assert!(set.material(5).unwrap().texture.is_some());
        assert!(set.material(6).is_none());
    }

    #[test]
    fn test_textured_material_constants() {
        let material = PageMaterial::textured(texture());
        assert_eq!(material.roughness, 1.0);
        assert!((material.env_map_intensity - 0.2).abs() < 1e-6);
        assert_eq!(material.color, [1.0; 4]);
    }
}
