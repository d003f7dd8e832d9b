mod transitions;

pub use transitions::*;

use bevy::prelude::*;
use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScreenFade>()
            .add_event::<FadeRequest>()
            .add_event::<FadeBlackPointEvent>()
            .add_event::<FadeCompleteEvent>();

        // ─── FADE OVERLAY, always present ───
        app.add_systems(Startup, transitions::spawn_fade_overlay);
        app.add_systems(
            Update,
            (
                transitions::handle_fade_requests,
                transitions::update_fade,
                transitions::sync_fade_overlay,
            )
                .chain(),
        );
    }
}
