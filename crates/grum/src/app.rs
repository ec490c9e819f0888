use anyhow::Result;

use grum_engine::coords::{Transform, Vec2};
use grum_engine::core::{App, AppControl, FrameCtx};
use grum_engine::input::MouseButton;
use grum_engine::paint::Paint;
use grum_engine::render::{MeshId, PathDraw, PathRenderer};
use grum_engine::time::PhaseClock;

use crate::character;

/// Tessellation tolerance in model units. The body scale triples it on
/// screen, which still lands well under a pixel.
const TESS_TOLERANCE: f32 = 0.02;

struct Meshes {
    body_fill: MeshId,
    body_outline: MeshId,
    nose_fill: MeshId,
    nose_outline: MeshId,
    smile: MeshId,
    frown: MeshId,
    eye: MeshId,
    pupil: MeshId,
}

/// The character application: owns the animation clock, the renderer, and
/// the meshes tessellated once at startup.
pub struct GrumApp {
    clock: PhaseClock,
    renderer: PathRenderer,
    meshes: Meshes,
}

impl GrumApp {
    pub fn new() -> Result<Self> {
        let mut renderer = PathRenderer::new();

        let body = character::body();
        let nose = character::nose();

        let meshes = Meshes {
            body_fill: renderer.register_mesh(body.fill_mesh(TESS_TOLERANCE)?),
            body_outline: renderer
                .register_mesh(body.stroke_mesh(character::OUTLINE_WIDTH, TESS_TOLERANCE)?),
            nose_fill: renderer.register_mesh(nose.fill_mesh(TESS_TOLERANCE)?),
            nose_outline: renderer
                .register_mesh(nose.stroke_mesh(character::OUTLINE_WIDTH, TESS_TOLERANCE)?),
            smile: renderer.register_mesh(
                character::smile().stroke_mesh(character::MOUTH_WIDTH, TESS_TOLERANCE)?,
            ),
            frown: renderer.register_mesh(
                character::frown().stroke_mesh(character::MOUTH_WIDTH, TESS_TOLERANCE)?,
            ),
            eye: renderer
                .register_mesh(character::eye_shape().fill_mesh(TESS_TOLERANCE)?),
            pupil: renderer
                .register_mesh(character::pupil_shape().fill_mesh(TESS_TOLERANCE)?),
        };

        Ok(Self {
            clock: PhaseClock::new(character::ROCK_PERIOD, character::ROCK_AMPLITUDE_DEG),
            renderer,
            meshes,
        })
    }

    /// Builds the frame's draw list, back to front.
    ///
    /// `pointer` is the pointer position in window pixels, if any; the eyes
    /// track the window origin when the pointer has never entered.
    fn frame_draws(
        &self,
        width: f32,
        height: f32,
        pointer: Option<(f32, f32)>,
        smiling: bool,
        angle_deg: f32,
    ) -> Vec<PathDraw> {
        let body = Transform::scale(character::BODY_SCALE)
            * Transform::translation(width / 2.0, height / 2.0);
        let mouth = Transform::rotation_degrees(angle_deg) * body;

        // Pointer in model units. A degenerate body transform cannot happen
        // with a fixed nonzero scale, but fall back to identity regardless.
        let to_model = body.invert().unwrap_or(Transform::IDENTITY);
        let (px, py) = pointer.unwrap_or((0.0, 0.0));
        let target = to_model.apply(Vec2::new(px, py));

        let primary = Paint::solid(character::primary());

        let mut draws = vec![
            PathDraw {
                mesh: self.meshes.body_fill,
                transform: body,
                paint: Paint::Radial(character::body_gradient()),
            },
            PathDraw {
                mesh: self.meshes.body_outline,
                transform: body,
                paint: primary.clone(),
            },
        ];

        for eye_center in character::eye_centers() {
            draws.push(PathDraw {
                mesh: self.meshes.eye,
                transform: Transform::translation(eye_center.x, eye_center.y) * body,
                paint: Paint::Radial(character::eye_gradient()),
            });
        }

        for eye_center in character::eye_centers() {
            let pupil = character::pupil_center(eye_center, target);
            draws.push(PathDraw {
                mesh: self.meshes.pupil,
                transform: Transform::translation(pupil.x, pupil.y) * body,
                paint: primary.clone(),
            });
        }

        // Nose and mouth rock together on the rotated transform.
        draws.push(PathDraw {
            mesh: self.meshes.nose_fill,
            transform: mouth,
            paint: Paint::solid(character::nose_fill()),
        });
        draws.push(PathDraw {
            mesh: self.meshes.nose_outline,
            transform: mouth,
            paint: primary.clone(),
        });
        draws.push(PathDraw {
            mesh: if smiling {
                self.meshes.smile
            } else {
                self.meshes.frown
            },
            transform: mouth,
            paint: primary,
        });

        draws
    }
}

impl App for GrumApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (width, height) = ctx.window.physical_size();

        let draws = self.frame_draws(
            width as f32,
            height as f32,
            ctx.input.pointer_pos,
            ctx.input.button_down(MouseButton::Left),
            self.clock.angle(),
        );

        let renderer = &mut self.renderer;
        ctx.render(character::background(), |rctx, target| {
            renderer.render(rctx, target, &draws);
        })
    }
}
