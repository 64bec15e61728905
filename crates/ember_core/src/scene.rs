//! Scene components
//!
//! Plain data the renderer reads: placement, CPU-side geometry and the
//! camera projection. GPU upload lives outside the core; `Mesh` only tracks
//! a revision so a renderer can tell when its copy is stale.

use crate::define_component;
use glam::{Mat4, Vec3};

/// Position, Euler rotation (radians) and scale of an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub pos: Vec3,
    pub rot: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn new(pos: Vec3, rot: Vec3, scale: Vec3) -> Self {
        Self { pos, rot, scale }
    }

    pub fn from_position(pos: Vec3) -> Self {
        Self {
            pos,
            ..Self::default()
        }
    }

    /// Model matrix: translate, then rotate about X, Y, Z, then scale.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.pos)
            * Mat4::from_rotation_x(self.rot.x)
            * Mat4::from_rotation_y(self.rot.y)
            * Mat4::from_rotation_z(self.rot.z)
            * Mat4::from_scale(self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            rot: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub pos: Vec3,
    pub norm: Vec3,
    pub color: Vec3,
}

/// CPU-side triangle list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    revision: u32,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self {
            vertices,
            revision: 1,
        }
    }

    /// The single RGB triangle the runtime boots with.
    pub fn triangle() -> Self {
        let corner = |pos: Vec3, color: Vec3| Vertex {
            pos,
            norm: Vec3::Z,
            color,
        };
        Self::new(vec![
            corner(Vec3::new(1.0, 1.0, 0.0), Vec3::X),
            corner(Vec3::new(-1.0, 1.0, 0.0), Vec3::Y),
            corner(Vec3::new(0.0, -1.0, 0.0), Vec3::Z),
        ])
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Replace the geometry and bump the revision.
    pub fn set_vertices(&mut self, vertices: Vec<Vertex>) {
        self.vertices = vertices;
        self.revision = self.revision.wrapping_add(1);
    }

    /// Incremented on every geometry change; 0 for an empty default mesh.
    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// Perspective camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Vertical field of view in radians.
    pub fov: f32,
    pub clip_near: f32,
    pub clip_far: f32,
}

impl Camera {
    pub fn projection(&self, width: f32, height: f32) -> Mat4 {
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        Mat4::perspective_rh(self.fov, aspect, self.clip_near, self.clip_far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov: 90f32.to_radians(),
            clip_near: 0.1,
            clip_far: 200.0,
        }
    }
}

define_component!(Transform, Mesh, Camera);
