use tracing::{debug, info};

use crate::{
    config::Settings,
    engine::{Projection, Ray, cast_fan},
    renderer::{FrameStyle, PixelBuffer, Renderer, RendererExt, WallShading},
    sim::Avatar,
    world::{GridMap, TextureBank, TextureError},
};

/// Everything one session needs: the map, the viewer, the ray scratch and
/// the renderer. Built once after loading, then driven by
/// [`update`](Self::update) / [`render_frame`](Self::render_frame).
pub struct Engine<R: Renderer> {
    pub renderer: R,
    pub grid: GridMap,
    pub avatar: Avatar,
    pub texture_bank: TextureBank,
    pub settings: Settings,
    pub projection: Projection,
    pub style: FrameStyle,
    rays: Vec<Ray>,
}

impl<R: Renderer> Engine<R> {
    /// Fails if `settings.wall_texture` names a texture the bank does not
    /// hold.
    pub fn new(
        renderer: R,
        grid: GridMap,
        texture_bank: TextureBank,
        settings: Settings,
    ) -> Result<Self, TextureError> {
        let wall = match &settings.wall_texture {
            Some(name) => WallShading::Textured(texture_bank.require(name)?),
            None => WallShading::Flat {
                vertical: settings.wall_vertical,
                horizontal: settings.wall_horizontal,
            },
        };
        let style = FrameStyle {
            ceiling: settings.ceiling,
            floor: settings.floor,
            wall,
        };
        info!(
            level = grid.id(),
            rows = grid.rows(),
            cols = grid.cols(),
            width = settings.width,
            height = settings.height,
            "engine ready"
        );

        let mut engine = Self {
            renderer,
            avatar: Avatar::from_settings(&settings),
            projection: Projection::from_settings(&settings),
            rays: Vec::with_capacity(settings.num_rays()),
            grid,
            texture_bank,
            settings,
            style,
        };
        engine.cast();
        Ok(engine)
    }

    /// Rays from the last [`update`](Self::update), left to right.
    #[inline]
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    /// Move the avatar by `dt` seconds of input, then re-cast the view.
    pub fn update(&mut self, dt: f64) {
        self.avatar.update(dt, &self.grid);
        self.cast();
    }

    fn cast(&mut self) {
        cast_fan(
            &self.grid,
            self.avatar.pos,
            self.avatar.angle(),
            self.settings.fov,
            self.settings.num_rays(),
            &mut self.rays,
        );
        debug!(
            x = self.avatar.pos.x,
            y = self.avatar.pos.y,
            angle = self.avatar.angle(),
            "cast"
        );
    }

    /// Draw the current rays and loan the finished frame to `submit`.
    pub fn render_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&PixelBuffer),
    {
        let strips = self.projection.project_all(&self.rays, self.avatar.angle());
        self.renderer.draw_frame(
            self.settings.width,
            self.settings.height,
            strips,
            &self.style,
            &self.texture_bank,
            submit,
        );
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
