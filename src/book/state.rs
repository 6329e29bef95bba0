//! 书本状态
//!
//! 外部 UI / 状态协作方提供一个整数"当前页"与有序页面描述符列表；
//! `opened` / `book_closed` 是当前页值的纯函数，每帧现算，不缓存。

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 书本状态错误
#[derive(Debug, Error)]
pub enum BookError {
    /// 页面描述符列表解析失败
    #[error("failed to parse page descriptor list")]
    Parse(#[from] serde_json::Error),
}

/// 页面描述符 - 正反面纹理标识符
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescriptor {
    /// 正面纹理标识符
    pub front: String,
    /// 背面纹理标识符
    pub back: String,
}

impl PageDescriptor {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// 书本状态资源
///
/// `current_page` 的取值范围是 `0..=page_count`：0 表示整本合在起始侧，
/// `page_count` 表示整本合在结尾侧。
#[derive(Resource, Clone, Debug, Default)]
pub struct BookState {
    current_page: usize,
    pages: Vec<PageDescriptor>,
}

impl BookState {
    /// 用页面描述符列表创建书本状态（当前页为 0，整本合上）
    pub fn new(pages: Vec<PageDescriptor>) -> Self {
        Self {
            current_page: 0,
            pages,
        }
    }

    /// 从 JSON 数组解析页面描述符列表
    pub fn from_json(json: &str) -> Result<Self, BookError> {
        let pages: Vec<PageDescriptor> = serde_json::from_str(json)?;
        Ok(Self::new(pages))
    }

    /// 页面描述符列表
    pub fn pages(&self) -> &[PageDescriptor] {
        &self.pages
    }

    /// 页数
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// 当前页
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// 设置当前页（钳制到 `0..=page_count`）
    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page.min(self.page_count());
    }

    /// 某一页是否已翻开（其序号低于当前页标记）
    pub fn is_opened(&self, number: usize) -> bool {
        self.current_page > number
    }

    /// 书是否完全合上（当前页位于任一端）
    pub fn is_closed(&self) -> bool {
        self.current_page == 0 || self.current_page == self.page_count()
    }
}

// ============================================================================
// 测试
// ============================================================================
