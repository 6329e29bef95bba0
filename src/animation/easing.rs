//! 角度阻尼缓动
//!
//! 以指数衰减将当前值平滑逼近目标值，由时间常数与帧时间增量参数化，
//! 得到与帧率无关的平滑运动：目标处保持不动，偏差单调收敛，不会越过
//! 目标震荡。

use std::f32::consts::{PI, TAU};

/// 指数阻尼：将 `current` 向 `target` 逼近一帧
///
/// `smooth_time` 为时间常数（秒），每经过一个时间常数偏差衰减到约 37%。
/// `delta` 非正时原样返回当前值。
pub fn damp(current: f32, target: f32, smooth_time: f32, delta: f32) -> f32 {
    if delta <= 0.0 || smooth_time <= 0.0 {
        return current;
    }
    target + (current - target) * (-delta / smooth_time).exp()
}

/// 角度版指数阻尼：沿最短弧向目标角逼近
///
/// 先把目标角换算到与当前角相差不超过 π 的等价表示，再按 [`damp`]
/// 收敛，避免跨越 ±π 时绕远路。
pub fn damp_angle(current: f32, target: f32, smooth_time: f32, delta: f32) -> f32 {
    let shortest = current + wrap_angle(target - current);
    damp(current, shortest, smooth_time, delta)
}

/// 把角度差规范到 (-π, π]
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_damp_idempotent_at_target() {
        let value = damp(FRAC_PI_2, FRAC_PI_2, 0.5, DT);
        assert!((value - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_damp_monotonic_convergence() {
        // 反复调用严格逼近目标，且不越过
        let target = FRAC_PI_2;
        let mut current = 0.0f32;
        let mut previous_error = (target - current).abs();
        for _ in 0..400 {
            current = damp(current, target, 0.5, DT);
            let error = (target - current).abs();
            assert!(error < previous_error);
            assert!(current <= target);
            previous_error = error;
        }
        // 有界帧数内收敛
        assert!(previous_error < 1e-3);
    }

    #[test]
    fn test_damp_frame_rate_independent() {
        // 相同墙钟时间，不同帧率，结果一致（指数衰减的可加性）
        let target = 1.0f32;
        let mut coarse = 0.0f32;
        coarse = damp(coarse, target, 0.5, 0.2);

        let mut fine = 0.0f32;
        for _ in 0..10 {
            fine = damp(fine, target, 0.5, 0.02);
        }
        assert!((coarse - fine).abs() < 1e-4);
    }

    #[test]
    fn test_damp_zero_delta_is_noop() {
        let value = damp(0.3, 1.0, 0.5, 0.0);
        assert_eq!(value, 0.3);
    }

    #[test]
    fn test_damp_angle_shortest_arc() {
        // 从 +170° 到 -170° 应跨越 ±180°，而不是绕 340°
        let current = 170.0f32.to_radians();
        let target = -170.0f32.to_radians();
        let next = damp_angle(current, target, 0.5, DT);
        assert!(next > current);
    }

    #[test]
    fn test_wrap_angle_range() {
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-6);
        assert!((wrap_angle(-FRAC_PI_2) + FRAC_PI_2).abs() < 1e-6);
        assert!(wrap_angle(0.0).abs() < 1e-6);
    }
}
