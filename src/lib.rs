//! # Book Flip
//!
//! An animated 3D flip-book built with Rust: a stack of skinned page meshes
//! that bend and rotate to simulate page turning, driven by a single
//! external "current page" value.
//!
//! ## Features
//!
//! - **Skinned Page Geometry**: procedurally generated segmented plate mesh
//!   with per-vertex bone indices/weights
//! - **Bone Chain Animation**: per-page skeleton posed every frame with
//!   frame-rate-independent exponential damping
//! - **ECS Architecture**: bevy_ecs components, resources and systems driven
//!   by an external frame scheduler
//! - **GPU Hand-off**: wgpu vertex layout and skin-matrix buffer upload for
//!   a render host
//!
//! ## Architecture Design
//!
//! This crate follows the **Anemic Domain Model (贫血模型)** pattern:
//! - **State (Component/Resource)**: pure data structures storing state
//! - **Service**: business logic encapsulation with static methods
//! - **System**: ECS systems for orchestration and scheduling
//!
//! ### Example
//!
//! ```
//! use book_flip::animation::{BoneChain, PageFlipService};
//! use book_flip::geometry::{PAGE_SEGMENTS, SEGMENT_WIDTH};
//!
//! let mut chain = BoneChain::for_page(PAGE_SEGMENTS, SEGMENT_WIDTH);
//! // 每帧由宿主调度器驱动
//! PageFlipService::advance(&mut chain, 0, false, true, 1.0 / 60.0);
//! chain.update_pose();
//! ```
//!
//! ## Modules
//!
//! - [`ecs`]: Minimal ECS vocabulary (time, transforms)
//! - [`geometry`]: Page Geometry Builder (segmented skinned plate)
//! - [`animation`]: Bone chains, easing and the page-flip animator
//! - [`book`]: Book composition (state, pages, materials, systems)
//! - [`resources`]: Texture loading and caching

/// Minimal ECS vocabulary shared by the systems
pub mod ecs;
/// Page Geometry Builder: segmented skinned plate mesh
pub mod geometry;
/// Bone chains, angle easing and the per-frame page animator
pub mod animation;
/// Book composition: state, pages, materials and systems
pub mod book;
/// Asset resources: texture loading and caching
pub mod resources;
