//! 书本服务与系统
//!
//! 生成书本实体、延迟挂载页面网格，以及每帧的页面堆叠系统。
//! 动画本身见 `animation::page_animation_system`。

use bevy_ecs::prelude::*;
use glam::Quat;
use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use super::materials::PageMaterialSet;
use super::page::{Page, SkinnedPage};
use super::state::BookState;
use crate::animation::BoneChain;
use crate::ecs::Transform;
use crate::geometry::{PageGeometry, PAGE_DEPTH, PAGE_SEGMENTS, SEGMENT_WIDTH};
use crate::resources::{PageTexture, TextureLibrary};

/// 书本根实体标记（整本书绕 Y 轴转 90°，书脊朝向相机）
#[derive(Component)]
pub struct BookRoot;

/// 共享页面几何模板资源
///
/// `spawn_book` 构建一次后插入，后续补挂复用同一份模板。
#[derive(Resource, Clone)]
pub struct SharedPageGeometry(pub Arc<PageGeometry>);

/// 书本服务 - 封装书本的生成与挂载逻辑
pub struct BookService;

impl BookService {
    /// 生成整本书
    ///
    /// 构建一次共享几何模板，生成根实体和每页一个实体。正反面纹理
    /// 都已就绪的页面直接带上蒙皮网格与骨骼链；未就绪的页面先以
    /// 身份组件挂载（动画系统对其静默跳过），纹理到位后再补挂。
    /// 返回页面实体列表，顺序与描述符一致。
    pub fn spawn_book(world: &mut World, library: &mut TextureLibrary) -> Vec<Entity> {
        let pages = world.resource::<BookState>().pages().to_vec();
        let geometry = PageGeometry::build_shared();
        world.insert_resource(SharedPageGeometry(geometry.clone()));

        world.spawn((
            BookRoot,
            Transform {
                rot: Quat::from_rotation_y(FRAC_PI_2),
                ..Default::default()
            },
        ));

        let mut entities = Vec::with_capacity(pages.len());
        for (number, descriptor) in pages.iter().enumerate() {
            let page = Page::new(number, &descriptor.front, &descriptor.back);
            let transform = Transform::default();

            let entity = match (library.load(&descriptor.front), library.load(&descriptor.back)) {
                (Ok(front), Ok(back)) => world
                    .spawn((page, transform))
                    .insert(Self::page_mesh_bundle(geometry.clone(), front, back))
                    .id(),
                _ => {
                    log::warn!("page {number} textures not ready, mounting deferred");
                    world.spawn((page, transform)).id()
                }
            };
            entities.push(entity);
        }
        entities
    }

    /// 重试所有延迟挂载的页面
    ///
    /// 扫描尚无蒙皮网格的页面，用其组件上携带的纹理标识符重新加载；
    /// 正反面都就绪的页面当场补挂，其余留待下次重试。返回本次
    /// 补挂成功的页面数。
    pub fn remount_deferred(world: &mut World, library: &mut TextureLibrary) -> usize {
        let geometry = world.resource::<SharedPageGeometry>().0.clone();

        let mut deferred = Vec::new();
        let mut query = world.query_filtered::<(Entity, &Page), Without<SkinnedPage>>();
        for (entity, page) in query.iter(world) {
            deferred.push((entity, page.front.clone(), page.back.clone()));
        }

        let mut mounted = 0;
        for (entity, front, back) in deferred {
            let (Ok(front), Ok(back)) = (library.load(&front), library.load(&back)) else {
                continue;
            };
            world
                .entity_mut(entity)
                .insert(Self::page_mesh_bundle(geometry.clone(), front, back));
            mounted += 1;
        }
        if mounted > 0 {
            log::debug!("remounted {mounted} deferred pages");
        }
        mounted
    }

    /// 为延迟挂载的页面补挂蒙皮网格与骨骼链
    pub fn mount_page(
        world: &mut World,
        entity: Entity,
        geometry: Arc<PageGeometry>,
        front: Arc<PageTexture>,
        back: Arc<PageTexture>,
    ) {
        world
            .entity_mut(entity)
            .insert(Self::page_mesh_bundle(geometry, front, back));
    }

    fn page_mesh_bundle(
        geometry: Arc<PageGeometry>,
        front: Arc<PageTexture>,
        back: Arc<PageTexture>,
    ) -> (SkinnedPage, BoneChain) {
        (
            SkinnedPage::new(geometry, PageMaterialSet::new(front, back)),
            BoneChain::for_page(PAGE_SEGMENTS, SEGMENT_WIDTH),
        )
    }

    /// 页面堆叠深度：当前页之前的页堆到一侧，之后的堆到另一侧
    pub fn stacking_offset(current_page: usize, number: usize) -> f32 {
        (current_page as f32 - number as f32) * PAGE_DEPTH
    }
}

// ============================================================================
// ECS 系统
// ============================================================================

/// 页面堆叠系统 - 把堆叠深度写入页面的 Transform
pub fn page_stacking_system(book: Res<BookState>, mut query: Query<(&Page, &mut Transform)>) {
    for (page, mut transform) in query.iter_mut() {
        transform.pos.z = BookService::stacking_offset(book.current_page(), page.number);
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::state::PageDescriptor;
    use bevy_ecs::schedule::Schedule;

    fn write_texture(dir: &std::path::Path, identifier: &str) {
        image::RgbImage::new(4, 4)
            .save(dir.join(format!("{identifier}.jpg")))
            .unwrap();
    }

    #[test]
    fn test_spawn_book_mounts_ready_pages() {
        let dir = tempfile::tempdir().unwrap();
        write_texture(dir.path(), "cover");
        write_texture(dir.path(), "page-1");

        let mut world = World::default();
        world.insert_resource(BookState::new(vec![
            PageDescriptor::new("cover", "page-1"),
            PageDescriptor::new("missing", "missing-too"),
        ]));
        let mut library = TextureLibrary::new(dir.path());

        let entities = BookService::spawn_book(&mut world, &mut library);
        assert_eq!(entities.len(), 2);

        // 纹理就绪的页面带网格与骨骼链
        assert!(world.get::<SkinnedPage>(entities[0]).is_some());
        assert!(world.get::<BoneChain>(entities[0]).is_some());

        // 纹理缺失的页面延迟挂载
        assert!(world.get::<SkinnedPage>(entities[1]).is_none());
        assert!(world.get::<BoneChain>(entities[1]).is_none());
        assert!(world.get::<Page>(entities[1]).is_some());
    }

    #[test]
    fn test_remount_deferred_uses_page_identifiers() {
        let dir = tempfile::tempdir().unwrap();
        write_texture(dir.path(), "cover");
        write_texture(dir.path(), "page-1");

        let mut world = World::default();
        world.insert_resource(BookState::new(vec![
            PageDescriptor::new("cover", "page-1"),
            PageDescriptor::new("page-2", "page-3"),
        ]));
        let mut library = TextureLibrary::new(dir.path());
        let entities = BookService::spawn_book(&mut world, &mut library);
        assert!(world.get::<SkinnedPage>(entities[1]).is_none());

        // 纹理仍缺失：重试不挂载任何页面
        assert_eq!(BookService::remount_deferred(&mut world, &mut library), 0);
        assert!(world.get::<SkinnedPage>(entities[1]).is_none());

        // 纹理到位后，凭组件上的标识符补挂
        write_texture(dir.path(), "page-2");
        write_texture(dir.path(), "page-3");
        assert_eq!(BookService::remount_deferred(&mut world, &mut library), 1);
        assert!(world.get::<SkinnedPage>(entities[1]).is_some());
        assert!(world.get::<BoneChain>(entities[1]).is_some());

        // 补挂的页面复用共享几何模板
        let template = world.resource::<SharedPageGeometry>().0.clone();
        let mounted = world.get::<SkinnedPage>(entities[1]).unwrap();
        assert!(Arc::ptr_eq(&mounted.geometry, &template));
    }

    #[test]
    fn test_mount_page_attaches_mesh_and_chain() {
        let dir = tempfile::tempdir().unwrap();
        write_texture(dir.path(), "late");

        let mut world = World::default();
        world.insert_resource(BookState::new(vec![PageDescriptor::new("late", "late")]));
        let mut library = TextureLibrary::new(dir.path());

        let entity = world.spawn((Page::new(0, "late", "late"), Transform::default())).id();
        let texture = library.load("late").unwrap();
        BookService::mount_page(
            &mut world,
            entity,
            PageGeometry::build_shared(),
            texture.clone(),
            texture,
        );

        assert!(world.get::<SkinnedPage>(entity).is_some());
        assert!(world.get::<BoneChain>(entity).is_some());
    }

    #[test]
    fn test_book_root_rotated_ninety_degrees() {
        let dir = tempfile::tempdir().unwrap();
        let mut world = World::default();
        world.insert_resource(BookState::new(vec![]));
        let mut library = TextureLibrary::new(dir.path());
        BookService::spawn_book(&mut world, &mut library);

        let mut query = world.query_filtered::<&Transform, With<BookRoot>>();
        let transform = query.single(&world);
        let expected = Quat::from_rotation_y(FRAC_PI_2);
        assert!(transform.rot.angle_between(expected) < 1e-5);
    }

    #[test]
    fn test_stacking_offset_follows_current_page() {
        assert_eq!(BookService::stacking_offset(0, 0), 0.0);
        assert!((BookService::stacking_offset(3, 1) - 2.0 * PAGE_DEPTH).abs() < 1e-7);
        assert!((BookService::stacking_offset(1, 3) + 2.0 * PAGE_DEPTH).abs() < 1e-7);
    }

    #[test]
    fn test_stacking_system_writes_transform_z() {
        let mut world = World::default();
        let mut state = BookState::new(vec![
            PageDescriptor::new("a", "b"),
            PageDescriptor::new("c", "d"),
        ]);
        state.set_current_page(2);
        world.insert_resource(state);

        let first = world.spawn((Page::new(0, "a", "b"), Transform::default())).id();
        let second = world.spawn((Page::new(1, "c", "d"), Transform::default())).id();

        let mut schedule = Schedule::default();
        schedule.add_systems(page_stacking_system);
        schedule.run(&mut world);

        let z0 = world.get::<Transform>(first).unwrap().pos.z;
        let z1 = world.get::<Transform>(second).unwrap().pos.z;
        assert!((z0 - 2.0 * PAGE_DEPTH).abs() < 1e-7);
        assert!((z1 - PAGE_DEPTH).abs() < 1e-7);
    }
}
