//! 翻页动画性能基准测试
//!
//! 测试每帧骨骼链推进与几何模板构建的性能

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use book_flip::animation::{BoneChain, PageFlipService};
use book_flip::geometry::{PageGeometry, PAGE_SEGMENTS, SEGMENT_WIDTH};

fn bench_page_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_advance");
    let delta = 1.0 / 60.0;

    group.bench_function("fanned_full_chain", |b| {
        let mut chain = BoneChain::for_page(PAGE_SEGMENTS, SEGMENT_WIDTH);
        b.iter(|| {
            PageFlipService::advance(black_box(&mut chain), 3, true, false, delta);
        });
    });

    group.bench_function("closed_book_full_chain", |b| {
        let mut chain = BoneChain::for_page(PAGE_SEGMENTS, SEGMENT_WIDTH);
        b.iter(|| {
            PageFlipService::advance(black_box(&mut chain), 0, false, true, delta);
        });
    });

    group.bench_function("advance_and_pose", |b| {
        let mut chain = BoneChain::for_page(PAGE_SEGMENTS, SEGMENT_WIDTH);
        b.iter(|| {
            PageFlipService::advance(black_box(&mut chain), 3, true, false, delta);
            chain.update_pose();
        });
    });

    group.finish();
}

fn bench_geometry_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry_build");

    group.bench_function("page_plate", |b| {
        b.iter(|| black_box(PageGeometry::build()));
    });

    group.finish();
}

criterion_group!(benches, bench_page_advance, bench_geometry_build);
criterion_main!(benches);
