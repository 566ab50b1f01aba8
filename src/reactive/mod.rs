pub mod context;
pub mod effect;
pub mod focus;
pub mod invalidation;
pub mod maybe_dyn;
pub mod runtime;
pub mod signal;

pub use context::{
    has_context, provide_context, remove_context, reset_contexts, use_context, with_context,
};
pub use effect::{create_effect, Effect};
pub use focus::{focused_widget, has_focus, release_focus, request_focus};
pub use invalidation::{
    clear_animation_flag, finish_frame, has_animations, request_animation_frame, request_frame,
    take_frame_request, with_app_state, with_app_state_mut, ChangeFlags, WidgetId,
};
pub use maybe_dyn::{IntoMaybeDyn, MaybeDyn};
pub use runtime::batch;
pub use signal::{create_signal, Signal};
