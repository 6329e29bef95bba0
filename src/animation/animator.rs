//! 翻页动画器
//!
//! 每帧为页面骨骼链中的每根骨骼计算目标旋转角，并以指数阻尼平滑逼近，
//! 形成页面卷曲翻转的视觉效果。
//!
//! 页面状态（opened / book_closed）每帧由外部"当前页"值现算，不缓存，
//! 避免陈旧状态。

use bevy_ecs::prelude::*;
use std::f32::consts::FRAC_PI_2;

use super::easing;
use super::skeleton::BoneChain;
use crate::book::{BookState, Page};
use crate::ecs::Time;

// ============================================================================
// 动画常量
// ============================================================================

/// 阻尼时间常数（秒）
pub const EASING_FACTOR: f32 = 0.5;
/// 书脊侧卷曲强度
pub const INSIDE_CURVE_STRENGTH: f32 = 0.15;
/// 参与卷曲的骨骼数量（索引 >= 该值的骨骼不卷曲）
pub const INSIDE_CURVE_BONES: usize = 8;
/// 展开状态下每页的扇形偏移角（度）
pub const PAGE_FAN_DEGREES: f32 = 0.8;

// ============================================================================
// 翻页动画服务
// ============================================================================

/// 翻页动画服务 - 封装逐帧骨骼目标角计算与阻尼逼近
pub struct PageFlipService;

impl PageFlipService {
    /// 页面的基础目标角
    ///
    /// 已翻开的页面转向 -90°，未翻开的转向 +90°；书未完全合上时
    /// 叠加 `number * 0.8°` 的扇形偏移，使闭合书堆中的页面略微散开。
    pub fn target_rotation(number: usize, opened: bool, book_closed: bool) -> f32 {
        let mut target = if opened { -FRAC_PI_2 } else { FRAC_PI_2 };
        if !book_closed {
            target += (number as f32 * PAGE_FAN_DEGREES).to_radians();
        }
        target
    }

    /// 书脊侧卷曲强度系数
    ///
    /// 靠近书脊的骨骼卷曲更明显，按 `sin(i * 0.2 + 0.25)` 分布，
    /// 从第 [`INSIDE_CURVE_BONES`] 根骨骼起不再卷曲。
    pub fn curl_intensity(bone_index: usize) -> f32 {
        if bone_index < INSIDE_CURVE_BONES {
            (bone_index as f32 * 0.2 + 0.25).sin()
        } else {
            0.0
        }
    }

    /// 单根骨骼的目标旋转角
    ///
    /// 完全合上的书：根骨骼铰接到整页目标角，其余骨骼保持伸直；
    /// 其余状态：所有骨骼按卷曲系数跟随目标角（根骨骼不做特殊处理）。
    pub fn bone_target(bone_index: usize, number: usize, opened: bool, book_closed: bool) -> f32 {
        let target_rotation = Self::target_rotation(number, opened, book_closed);
        if book_closed {
            if bone_index == 0 {
                target_rotation
            } else {
                0.0
            }
        } else {
            INSIDE_CURVE_STRENGTH * Self::curl_intensity(bone_index) * target_rotation
        }
    }

    /// 推进一帧：将链上每根骨骼的旋转阻尼逼近各自目标角
    ///
    /// 就地修改骨骼旋转，无返回值。`delta` 为本帧经过的秒数。
    pub fn advance(
        chain: &mut BoneChain,
        number: usize,
        opened: bool,
        book_closed: bool,
        delta: f32,
    ) {
        for i in 0..chain.bone_count() {
            let target = Self::bone_target(i, number, opened, book_closed);
            let next = easing::damp_angle(chain.rotation(i), target, EASING_FACTOR, delta);
            chain.set_rotation(i, next);
        }
    }
}

// ============================================================================
// ECS 系统
// ============================================================================

/// 翻页动画系统 - 每渲染帧推进所有页面的骨骼链
///
/// opened / book_closed 由 `BookState` 现算；骨骼链尚未就绪的页面
/// 本帧静默跳过（延迟挂载，不是错误）。
pub fn page_animation_system(
    time: Res<Time>,
    book: Res<BookState>,
    mut query: Query<(&Page, Option<&mut BoneChain>)>,
) {
    for (page, chain) in query.iter_mut() {
        let Some(mut chain) = chain else {
            continue;
        };
        PageFlipService::advance(
            &mut chain,
            page.number,
            book.is_opened(page.number),
            book.is_closed(),
            time.delta_seconds,
        );
        chain.update_pose();
    }
}

// ============================================================================
// 测试
// ============================================================================
