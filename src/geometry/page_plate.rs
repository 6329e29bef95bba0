//! 页面平板几何构建器
//!
//! 一次性构建所有页面实例共享的分段平板网格：宽度方向分为
//! `PAGE_SEGMENTS` 段，每个顶点按宽度偏移绑定到相邻两根骨骼。
//! 构建后的几何体是只读模板，通过 `Arc` 在页面实例间共享。

use std::sync::Arc;

// ============================================================================
// 页面尺寸常量
// ============================================================================

/// 页面宽度
pub const PAGE_WIDTH: f32 = 1.48;
/// 页面高度
pub const PAGE_HEIGHT: f32 = 2.1;
/// 页面厚度
pub const PAGE_DEPTH: f32 = 0.003;
/// 宽度方向的分段数（骨骼数 = PAGE_SEGMENTS + 1）
pub const PAGE_SEGMENTS: usize = 30;
/// 单段宽度
pub const SEGMENT_WIDTH: f32 = PAGE_WIDTH / PAGE_SEGMENTS as f32;

/// 高度方向分段数（与蒙皮无关）
const HEIGHT_SEGMENTS: usize = 2;
/// 厚度方向分段数
const DEPTH_SEGMENTS: usize = 1;

// ============================================================================
// 蒙皮顶点数据
// ============================================================================

/// 蒙皮页面顶点（包含骨骼索引与权重）
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PageVertex {
    /// 位置
    pub position: [f32; 3],
    /// 法线
    pub normal: [f32; 3],
    /// 纹理坐标
    pub uv: [f32; 2],
    /// 骨骼索引（仅前两个槽位有效）
    pub bone_indices: [u32; 4],
    /// 骨骼权重（仅前两个槽位有效，总和为 1.0）
    pub bone_weights: [f32; 4],
}

impl PageVertex {
    /// 顶点缓冲区布局描述
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PageVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Normal
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // UV
                wgpu::VertexAttribute {
                    offset: 24,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // Bone Indices
                wgpu::VertexAttribute {
                    offset: 32,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Uint32x4,
                },
                // Bone Weights
                wgpu::VertexAttribute {
                    offset: 48,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

// ============================================================================
// 蒙皮绑定
// ============================================================================

/// 根据顶点的宽度偏移计算蒙皮绑定
///
/// 返回 `(骨骼索引对, 权重对)`：主骨骼 `i = floor(x / segment_width)`
/// 钳制在 `[0, segments]`，混合权重为段内插值系数。两个权重总和恒为 1，
/// 次骨骼索引在最后一个关节处钳制为 `segments`。
pub fn skin_binding(x: f32, segments: usize, segment_width: f32) -> ([u32; 2], [f32; 2]) {
    let step = x / segment_width;
    let index = (step.floor().max(0.0) as usize).min(segments);
    let fract = (step - index as f32).clamp(0.0, 1.0);
    (
        [index as u32, (index + 1).min(segments) as u32],
        [1.0 - fract, fract],
    )
}

// ============================================================================
// 页面几何体
// ============================================================================

/// 三角形索引子区间与材质槽的对应关系
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshGroup {
    /// 子区间在索引缓冲区中的起始位置
    pub start: usize,
    /// 索引数量
    pub count: usize,
    /// 材质槽（0..4 为共享基础材质，4 = 正面贴图，5 = 背面贴图）
    pub material_index: usize,
}

/// 分段页面几何体（共享只读模板）
#[derive(Clone, Debug)]
pub struct PageGeometry {
    /// 顶点数据
    pub vertices: Vec<PageVertex>,
    /// 三角形索引
    pub indices: Vec<u32>,
    /// 面组（按材质槽划分）
    pub groups: Vec<MeshGroup>,
}

impl PageGeometry {
    /// 构建页面几何体
    ///
    /// 平板被平移为沿 x 轴覆盖 `[0, PAGE_WIDTH]`，使根骨骼位于书脊边缘。
    pub fn build() -> Self {
        let mut geometry = Self::build_box(
            PAGE_WIDTH,
            PAGE_HEIGHT,
            PAGE_DEPTH,
            PAGE_SEGMENTS,
            HEIGHT_SEGMENTS,
            DEPTH_SEGMENTS,
        );
        geometry.translate(PAGE_WIDTH / 2.0, 0.0, 0.0);
        geometry.assign_skin_bindings(PAGE_SEGMENTS, SEGMENT_WIDTH);
        geometry
    }

    /// 构建并包装为跨页面实例共享的只读模板
    pub fn build_shared() -> Arc<Self> {
        Arc::new(Self::build())
    }

    /// 顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 索引数量
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 构建分段盒体（六个面，各面按轴向分段）
    fn build_box(
        width: f32,
        height: f32,
        depth: f32,
        width_segments: usize,
        height_segments: usize,
        depth_segments: usize,
    ) -> Self {
        let mut geometry = Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            groups: Vec::new(),
        };

        // 轴索引：0 = x, 1 = y, 2 = z
        // +x / -x
        geometry.build_plane(2, 1, 0, -1.0, -1.0, depth, height, width, depth_segments, height_segments, 0);
        geometry.build_plane(2, 1, 0, 1.0, -1.0, depth, height, -width, depth_segments, height_segments, 1);
        // +y / -y
        geometry.build_plane(0, 2, 1, 1.0, 1.0, width, depth, height, width_segments, depth_segments, 2);
        geometry.build_plane(0, 2, 1, 1.0, -1.0, width, depth, -height, width_segments, depth_segments, 3);
        // +z（正面）/ -z（背面）
        geometry.build_plane(0, 1, 2, 1.0, -1.0, width, height, depth, width_segments, height_segments, 4);
        geometry.build_plane(0, 1, 2, -1.0, -1.0, width, height, -depth, width_segments, height_segments, 5);

        geometry
    }

    /// 构建盒体的一个面：在 (u, v) 轴展开网格，w 轴为面法线方向
    #[allow(clippy::too_many_arguments)]
    fn build_plane(
        &mut self,
        u: usize,
        v: usize,
        w: usize,
        udir: f32,
        vdir: f32,
        width: f32,
        height: f32,
        depth: f32,
        grid_x: usize,
        grid_y: usize,
        material_index: usize,
    ) {
        let segment_width = width / grid_x as f32;
        let segment_height = height / grid_y as f32;
        let width_half = width / 2.0;
        let height_half = height / 2.0;
        let depth_half = depth / 2.0;
        let grid_x1 = grid_x + 1;
        let grid_y1 = grid_y + 1;
        let vertex_offset = self.vertices.len() as u32;

        for iy in 0..grid_y1 {
            let y = iy as f32 * segment_height - height_half;
            for ix in 0..grid_x1 {
                let x = ix as f32 * segment_width - width_half;

                let mut position = [0.0f32; 3];
                position[u] = x * udir;
                position[v] = y * vdir;
                position[w] = depth_half;

                let mut normal = [0.0f32; 3];
                normal[w] = if depth > 0.0 { 1.0 } else { -1.0 };

                self.vertices.push(PageVertex {
                    position,
                    normal,
                    uv: [ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32],
                    bone_indices: [0; 4],
                    bone_weights: [1.0, 0.0, 0.0, 0.0],
                });
            }
        }

        let group_start = self.indices.len();
        for iy in 0..grid_y {
            for ix in 0..grid_x {
                let a = vertex_offset + (ix + grid_x1 * iy) as u32;
                let b = vertex_offset + (ix + grid_x1 * (iy + 1)) as u32;
                let c = vertex_offset + (ix + 1 + grid_x1 * (iy + 1)) as u32;
                let d = vertex_offset + (ix + 1 + grid_x1 * iy) as u32;

                self.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        self.groups.push(MeshGroup {
            start: group_start,
            count: self.indices.len() - group_start,
            material_index,
        });
    }

    /// 平移所有顶点
    fn translate(&mut self, x: f32, y: f32, z: f32) {
        for vertex in &mut self.vertices {
            vertex.position[0] += x;
            vertex.position[1] += y;
            vertex.position[2] += z;
        }
    }

    /// 为每个顶点写入蒙皮绑定属性
    fn assign_skin_bindings(&mut self, segments: usize, segment_width: f32) {
        for vertex in &mut self.vertices {
            let (indices, weights) = skin_binding(vertex.position[0], segments, segment_width);
            vertex.bone_indices = [indices[0], indices[1], 0, 0];
            vertex.bone_weights = [weights[0], weights[1], 0.0, 0.0];
        }
    }
}

// ============================================================================
// 测试
// ============================================================================
