//! 页面纹理库
//!
//! 按 `<根目录>/<标识符>.jpg` 的路径约定加载页面贴图，解码为 RGBA8
//! 并标记为 sRGB 颜色空间，加载结果以 `Arc` 缓存共享。

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;
use thiserror::Error;

use crate::book::PageDescriptor;

/// 纹理加载错误
#[derive(Debug, Error)]
pub enum TextureError {
    /// 读取或解码失败
    #[error("failed to load texture {path:?}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// 颜色空间标记
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorSpace {
    Linear,
    Srgb,
}

/// 已加载的页面纹理
#[derive(Clone, Debug)]
pub struct PageTexture {
    /// RGBA8 像素数据
    pub image: RgbaImage,
    /// 颜色空间
    pub color_space: ColorSpace,
}

impl PageTexture {
    /// 对应的 wgpu 纹理格式
    pub fn wgpu_format(&self) -> wgpu::TextureFormat {
        match self.color_space {
            ColorSpace::Srgb => wgpu::TextureFormat::Rgba8UnormSrgb,
            ColorSpace::Linear => wgpu::TextureFormat::Rgba8Unorm,
        }
    }

    /// 纹理尺寸
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// 页面纹理库
///
/// 同一标识符只解码一次，之后命中缓存。
pub struct TextureLibrary {
    root: PathBuf,
    cache: HashMap<String, Arc<PageTexture>>,
}

impl TextureLibrary {
    /// 创建纹理库，`root` 为纹理根目录
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
        }
    }

    /// 标识符对应的文件路径
    pub fn path_for(&self, identifier: &str) -> PathBuf {
        self.root.join(format!("{identifier}.jpg"))
    }

    /// 加载（或命中缓存）一张页面纹理
    ///
    /// 显示用贴图统一标记为 sRGB。
    pub fn load(&mut self, identifier: &str) -> Result<Arc<PageTexture>, TextureError> {
        if let Some(texture) = self.cache.get(identifier) {
            return Ok(texture.clone());
        }

        let path = self.path_for(identifier);
        let image = image::open(&path)
            .map_err(|source| TextureError::Load {
                path: path.clone(),
                source,
            })?
            .to_rgba8();

        log::debug!(
            "loaded page texture {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );

        let texture = Arc::new(PageTexture {
            image,
            color_space: ColorSpace::Srgb,
        });
        self.cache.insert(identifier.to_string(), texture.clone());
        Ok(texture)
    }

    /// 查询缓存中的纹理
    pub fn get(&self, identifier: &str) -> Option<Arc<PageTexture>> {
        self.cache.get(identifier).cloned()
    }

    /// 预加载一组页面描述符的正反面纹理
    ///
    /// 加载失败只记录告警并继续，对应页面随后延迟挂载。
    pub fn preload(&mut self, pages: &[PageDescriptor]) {
        for page in pages {
            for identifier in [&page.front, &page.back] {
                if let Err(error) = self.load(identifier) {
                    log::warn!("page texture preload failed: {error}");
                }
            }
        }
    }

    /// 缓存中的纹理数量
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// 缓存是否为空
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn write_texture(dir: &std::path::Path, identifier: &str) {
        let mut image = image::RgbImage::new(4, 4);
        for pixel in image.pixels_mut() {
            *pixel = image::Rgb([255, 255, 255]);
        }
        image.save(dir.join(format!("{identifier}.jpg"))).unwrap();
    }

    #[test]
    fn test_path_convention() {
        let library = TextureLibrary::new("/assets/textures");
        assert_eq!(
            library.path_for("book-cover"),
            PathBuf::from("/assets/textures/book-cover.jpg")
        );
    }

    #[test]
    fn test_load_tags_srgb_and_caches() {
        let dir = tempfile::tempdir().unwrap();
        write_texture(dir.path(), "page-1");

        let mut library = TextureLibrary::new(dir.path());
        let texture = library.load("page-1").unwrap();
        assert_eq!(texture.color_space, ColorSpace::Srgb);
        assert_eq!(texture.wgpu_format(), wgpu::TextureFormat::Rgba8UnormSrgb);
        assert_eq!(texture.dimensions(), (4, 4));

        // 第二次加载命中缓存，返回同一份数据
        let again = library.load("page-1").unwrap();
        assert!(Arc::ptr_eq(&texture, &again));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_missing_texture_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = TextureLibrary::new(dir.path());
        assert!(library.load("missing").is_err());
        assert!(library.get("missing").is_none());
    }

    #[test]
    fn test_preload_continues_past_failures() {
        let dir = tempfile::tempdir().unwrap();
        write_texture(dir.path(), "page-2");

        let mut library = TextureLibrary::new(dir.path());
        library.preload(&[
            PageDescriptor::new("missing-front", "page-2"),
            PageDescriptor::new("page-2", "missing-back"),
        ]);

        assert_eq!(library.len(), 1);
        assert!(library.get("page-2").is_some());
    }
}
