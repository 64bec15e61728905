//! Demo systems driven by the headless frame loop

use ember_core::ecs::{EntityId, System, World};
use ember_core::glam::{Mat4, Vec3};
use ember_core::scene::{Camera, Mesh, Transform};

/// Rotates every `Transform` about the Y axis.
pub struct Spin {
    /// Radians per second.
    pub speed: f32,
}

impl Spin {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }
}

impl System for Spin {
    fn name(&self) -> &str {
        "spin"
    }

    fn update(&mut self, world: &mut World, dt: f64) {
        let step = self.speed * dt as f32;
        if let Err(err) = world.each_component::<Transform, _>(|_, transform| {
            transform.rot.y += step;
        }) {
            tracing::warn!(%err, "spin skipped");
        }
    }
}

/// One entry of the frame's draw list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub entity: EntityId,
    pub mvp: Mat4,
    pub mesh_revision: u32,
    pub triangles: usize,
}

/// Collects a draw list from every `Mesh` with a `Transform`.
///
/// Stands in for GPU submission. Runs in the late phase so it sees the
/// transforms the normal phase produced this frame.
pub struct RenderSubmit {
    width: f32,
    height: f32,
    draw_list: Vec<DrawCommand>,
    submitted: u64,
}

impl RenderSubmit {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            draw_list: Vec::new(),
            submitted: 0,
        }
    }

    /// Draw commands built by the last update.
    pub fn draw_list(&self) -> &[DrawCommand] {
        &self.draw_list
    }

    /// Total draw commands built since registration.
    pub fn submitted(&self) -> u64 {
        self.submitted
    }

    fn view_projection(&self, world: &World) -> Mat4 {
        // First camera entity wins; otherwise look at the origin from +Z
        let camera = world.iter_component::<Camera>().next();
        let (camera, view) = match camera {
            Some((id, camera)) => {
                let view = match world.get_component::<Transform>(id) {
                    Ok(Some(transform)) => transform.matrix().inverse(),
                    _ => Mat4::IDENTITY,
                };
                (*camera, view)
            }
            None => (
                Camera::default(),
                Mat4::look_at_rh(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO, Vec3::Y),
            ),
        };
        camera.projection(self.width, self.height) * view
    }
}

impl System for RenderSubmit {
    fn name(&self) -> &str {
        "render_submit"
    }

    fn update(&mut self, world: &mut World, _dt: f64) {
        let world = &*world;
        let view_projection = self.view_projection(world);

        self.draw_list.clear();
        for (entity, mesh) in world.iter_component::<Mesh>() {
            let Ok(Some(transform)) = world.get_component::<Transform>(entity) else {
                continue;
            };
            self.draw_list.push(DrawCommand {
                entity,
                mvp: view_projection * transform.matrix(),
                mesh_revision: mesh.revision(),
                triangles: mesh.triangle_count(),
            });
        }
        self.submitted += self.draw_list.len() as u64;
        tracing::trace!(draws = self.draw_list.len(), "built draw list");
    }

    fn exit(&mut self, _world: &mut World) {
        tracing::debug!(submitted = self.submitted, "render submission shut down");
        self.draw_list.clear();
    }
}
