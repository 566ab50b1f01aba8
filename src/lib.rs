// The derive macros refer to `::floatlabel` paths, also from inside this crate
extern crate self as floatlabel;

pub mod animation;
pub mod description;
pub mod layout;
pub mod reactive;
pub mod renderer;
pub mod widgets;

use std::time::{Duration, Instant};

use animation::AnimationSettings;
use layout::Constraints;
use reactive::{
    clear_animation_flag, finish_frame, has_animations, provide_context, take_frame_request,
    with_app_state,
};
use renderer::{DrawCommand, PaintContext};
use widgets::{Color, Event, EventResponse, Widget};

pub mod prelude {
    pub use crate::animation::{AnimationSettings, TimingFunction, Transition};
    pub use crate::description::{DescriptionError, FieldDescription, Inspectable};
    pub use crate::layout::{Constraints, Size};
    pub use crate::reactive::{
        batch, create_effect, create_signal, provide_context, use_context, Effect, IntoMaybeDyn,
        MaybeDyn, Signal,
    };
    pub use crate::renderer::{DrawCommand, PaintContext};
    pub use crate::widgets::{
        text_input, Accessory, Color, Event, EventResponse, FloatingPlaceholderField, Font,
        FontFamily, FontWeight, Key, Label, Modifiers, MouseButton, PlaceholderState, Rect,
        TextInput, Underline, Widget,
    };
    pub use crate::{App, AppConfig, Frame};
}

pub struct AppConfig {
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    /// Provided as app context when the [`App`] is created
    pub animations: AnimationSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 120,
            background_color: Color::WHITE,
            animations: AnimationSettings::from_env(),
        }
    }
}

/// A callback that gets called each frame before anything else.
/// Use this to process external events (like channel messages) and update signals.
pub type UpdateCallback = Box<dyn FnMut()>;

/// The output of one frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub commands: Vec<DrawCommand>,
    /// Whether an animation wants another frame
    pub animating: bool,
}

/// Headless frame driver.
///
/// The host owns the widget tree and the clock; each [`frame`](Self::frame)
/// advances animations to the given instant, lays the root out in the
/// configured surface and records its paint commands.
///
/// ```ignore
/// let mut app = App::with_config(AppConfig {
///     animations: AnimationSettings::disabled(),
///     ..Default::default()
/// });
/// let mut field = FloatingPlaceholderField::new(Rect::new(20.0, 40.0, 280.0, 40.0));
/// field.set_placeholder("Email");
/// let frame = app.frame(&mut field, Instant::now());
/// ```
pub struct App {
    config: AppConfig,
    on_update: Option<UpdateCallback>,
    paint_ctx: PaintContext,
}

impl App {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        init_logging();
        provide_context(config.animations.clone());
        Self {
            config,
            on_update: None,
            paint_ctx: PaintContext::with_capacity(32),
        }
    }

    pub fn width(mut self, width: u32) -> Self {
        self.config.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.config.height = height;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.config.background_color = color;
        self
    }

    /// Replace the animation settings provided to widgets created from now on
    pub fn animations(mut self, settings: AnimationSettings) -> Self {
        provide_context(settings.clone());
        self.config.animations = settings;
        self
    }

    /// Set a callback that gets called at the start of every frame.
    pub fn on_update<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Deliver an input event to the root widget.
    pub fn dispatch<W: Widget + ?Sized>(&mut self, root: &mut W, event: &Event) -> EventResponse {
        root.event(event)
    }

    /// Whether anything changed since the last frame.
    pub fn needs_frame(&self) -> bool {
        has_animations() || with_app_state(|state| state.needs_layout() || state.needs_paint())
    }

    /// Produce one frame at `now`. The root keeps its own origin.
    pub fn frame<W: Widget + ?Sized>(&mut self, root: &mut W, now: Instant) -> Frame {
        if let Some(ref mut callback) = self.on_update {
            callback();
        }

        clear_animation_flag();
        let animating = root.advance_animations(now);

        let constraints = Constraints::new(
            0.0,
            0.0,
            self.config.width as f32,
            self.config.height as f32,
        );
        root.layout(constraints);

        self.paint_ctx.clear();
        root.paint(&mut self.paint_ctx);

        root.clear_dirty();
        finish_frame();
        take_frame_request();

        let commands = self.paint_ctx.take_commands();
        log::trace!("frame: {} draw commands, animating: {}", commands.len(), animating);

        Frame {
            width: self.config.width,
            height: self.config.height,
            background_color: self.config.background_color,
            commands,
            animating: animating || has_animations(),
        }
    }

    /// Run frames `step` apart, starting at `start`, until no animation is
    /// running or `max_frames` frames have been produced. Returns the last
    /// frame.
    pub fn run_until_idle<W: Widget + ?Sized>(
        &mut self,
        root: &mut W,
        start: Instant,
        step: Duration,
        max_frames: usize,
    ) -> Frame {
        let mut now = start;
        let mut frame = self.frame(root, now);
        let mut produced = 1;
        while frame.animating && produced < max_frames {
            now += step;
            frame = self.frame(root, now);
            produced += 1;
        }
        if frame.animating {
            log::warn!("still animating after {} frames", produced);
        }
        frame
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize `env_logger` once; later calls (one per test, say) are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}
