//! 页面骨骼链
//!
//! 每个页面实例拥有一条独立的骨骼链：S+1 根骨骼，0 号为根（书脊处），
//! 其余每根是前一根的子骨骼，局部 x 偏移为单段宽度。骨骼以索引数组
//! （arena）存储，父子关系通过父索引表达，矩阵计算按索引遍历。

use bevy_ecs::prelude::*;
use glam::{Mat4, Vec3};

// ============================================================================
// 骨骼节点
// ============================================================================

/// 骨骼节点
#[derive(Clone, Copy, Debug)]
pub struct PageBone {
    /// 父骨骼索引（None 表示根骨骼）
    pub parent_index: Option<usize>,
    /// 局部偏移（相对于父骨骼）
    pub local_offset: Vec3,
    /// 绕 +Y 轴的当前旋转角（弧度）
    pub rotation: f32,
    /// 逆绑定矩阵（将顶点从模型空间变换到骨骼空间）
    pub inverse_bind_matrix: Mat4,
}

impl PageBone {
    /// 局部变换矩阵（先平移到父骨骼末端，再绕 Y 旋转）
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.local_offset) * Mat4::from_rotation_y(self.rotation)
    }
}

// ============================================================================
// 骨骼链组件
// ============================================================================

/// 页面骨骼链组件
///
/// 由所属页面实体独占，仅在该页面的逐帧更新中被修改。
#[derive(Component)]
pub struct BoneChain {
    /// 所有骨骼（0 号为根）
    pub bones: Vec<PageBone>,
    /// 当前姿态的骨骼矩阵（模型空间）
    pub bone_matrices: Vec<Mat4>,
    /// 最终蒙皮矩阵（bone_matrix * inverse_bind_matrix）
    pub skin_matrices: Vec<Mat4>,
    /// GPU 骨骼矩阵缓冲区
    pub matrix_buffer: Option<wgpu::Buffer>,
    /// 是否需要更新 GPU 缓冲区
    pub dirty: bool,
}

impl BoneChain {
    /// 为一个页面创建骨骼链
    ///
    /// `segments` 段对应 `segments + 1` 根骨骼；骨骼 i 的绑定位姿位于
    /// `x = i * segment_width`，逆绑定矩阵据此预先算好。
    pub fn for_page(segments: usize, segment_width: f32) -> Self {
        let bone_count = segments + 1;
        let mut bones = Vec::with_capacity(bone_count);

        for i in 0..bone_count {
            let offset = if i == 0 { 0.0 } else { segment_width };
            bones.push(PageBone {
                parent_index: if i == 0 { None } else { Some(i - 1) },
                local_offset: Vec3::new(offset, 0.0, 0.0),
                rotation: 0.0,
                inverse_bind_matrix: Mat4::from_translation(Vec3::new(
                    -(i as f32) * segment_width,
                    0.0,
                    0.0,
                )),
            });
        }

        Self {
            bones,
            bone_matrices: vec![Mat4::IDENTITY; bone_count],
            skin_matrices: vec![Mat4::IDENTITY; bone_count],
            matrix_buffer: None,
            dirty: true,
        }
    }

    /// 骨骼数量
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// 读取骨骼旋转角
    pub fn rotation(&self, index: usize) -> f32 {
        self.bones[index].rotation
    }

    /// 设置骨骼旋转角
    pub fn set_rotation(&mut self, index: usize, rotation: f32) {
        if let Some(bone) = self.bones.get_mut(index) {
            bone.rotation = rotation;
            self.dirty = true;
        }
    }

    /// 计算所有骨骼的模型空间矩阵
    ///
    /// 父骨骼索引恒小于子骨骼索引，按序遍历即可。
    pub fn compute_bone_matrices(&mut self) {
        for i in 0..self.bones.len() {
            let local_matrix = self.bones[i].local_matrix();

            self.bone_matrices[i] = if let Some(parent_idx) = self.bones[i].parent_index {
                self.bone_matrices[parent_idx] * local_matrix
            } else {
                local_matrix
            };
        }
    }

    /// 计算最终蒙皮矩阵
    pub fn compute_skin_matrices(&mut self) {
        for i in 0..self.bones.len() {
            self.skin_matrices[i] = self.bone_matrices[i] * self.bones[i].inverse_bind_matrix;
        }
    }

    /// 更新骨骼姿态（模型空间矩阵 + 蒙皮矩阵）
    pub fn update_pose(&mut self) {
        self.compute_bone_matrices();
        self.compute_skin_matrices();
    }

    /// 骨骼关节在模型空间中的位置
    pub fn joint_position(&self, index: usize) -> Vec3 {
        self.bone_matrices[index].w_axis.truncate()
    }

    /// 更新 GPU 缓冲区
    pub fn update_gpu_buffer(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        if !self.dirty {
            return;
        }

        let buffer_size =
            (self.skin_matrices.len() * std::mem::size_of::<Mat4>()) as wgpu::BufferAddress;

        if self.matrix_buffer.is_none() {
            self.matrix_buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Page Bone Matrix Buffer"),
                size: buffer_size.max(256),
                usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
        }

        if let Some(buffer) = &self.matrix_buffer {
            let data: Vec<[[f32; 4]; 4]> = self
                .skin_matrices
                .iter()
                .map(|m| m.to_cols_array_2d())
                .collect();
            queue.write_buffer(buffer, 0, bytemuck::cast_slice(&data));
        }

        self.dirty = false;
    }
}

// ============================================================================
// 测试
// ============================================================================
