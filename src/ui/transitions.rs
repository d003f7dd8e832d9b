use bevy::prelude::*;
use crate::shared::*;

/// Marker for the screen fade overlay
#[derive(Component)]
pub struct ScreenFadeOverlay;

/// Where a running fade is headed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadeStage {
    #[default]
    Idle,
    ToBlack,
    FromBlack,
}

/// What one `advance` step crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FadeProgress {
    pub reached_black: bool,
    pub completed: bool,
}

/// The one screen fade. Callers go through a `FadeTrigger` entity, which is
/// remembered as the last trigger so its actions run at the black point.
#[derive(Resource, Debug, Clone)]
pub struct ScreenFade {
    /// Current opacity 0.0 (transparent) to 1.0 (opaque black)
    pub alpha: f32,
    /// Speed of fade (alpha units per second)
    pub speed: f32,
    pub kind: FadeKind,
    pub stage: FadeStage,
    pub last_trigger: Option<Entity>,
}

impl Default for ScreenFade {
    fn default() -> Self {
        Self {
            alpha: 0.0,
            speed: 2.0,
            kind: FadeKind::FadeOnce,
            stage: FadeStage::Idle,
            last_trigger: None,
        }
    }
}

impl ScreenFade {
    pub fn is_active(&self) -> bool {
        self.stage != FadeStage::Idle
    }

    /// Start a fade from the current alpha. Returns true when the screen is
    /// black right away (a fade out starts from black).
    pub fn begin(&mut self, kind: FadeKind) -> bool {
        self.kind = kind;
        match kind {
            FadeKind::FadeIn | FadeKind::FadeOnce => {
                self.stage = FadeStage::ToBlack;
                false
            }
            FadeKind::FadeOut => {
                self.alpha = 1.0;
                self.stage = FadeStage::FromBlack;
                true
            }
        }
    }

    pub fn advance(&mut self, dt: f32) -> FadeProgress {
        let mut progress = FadeProgress::default();
        match self.stage {
            FadeStage::Idle => {}
            FadeStage::ToBlack => {
                self.alpha = (self.alpha + self.speed * dt).min(1.0);
                if self.alpha >= 1.0 {
                    progress.reached_black = true;
                    if self.kind == FadeKind::FadeOnce {
                        self.stage = FadeStage::FromBlack;
                    } else {
                        self.stage = FadeStage::Idle;
                        progress.completed = true;
                    }
                }
            }
            FadeStage::FromBlack => {
                self.alpha = (self.alpha - self.speed * dt).max(0.0);
                if self.alpha <= 0.0 {
                    self.stage = FadeStage::Idle;
                    progress.completed = true;
                }
            }
        }
        progress
    }
}

/// Something that can start a fade, plus what runs when the screen is black.
#[derive(Component, Debug, Clone, Default)]
pub struct FadeTrigger {
    pub kind: FadeKind,
    pub on_black: Vec<GameAction>,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct FadeBlackPointEvent {
    pub trigger: Option<Entity>,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct FadeCompleteEvent {
    pub trigger: Option<Entity>,
}

/// Spawn the fade overlay (always present but invisible)
pub fn spawn_fade_overlay(mut commands: Commands) {
    commands.spawn((
        ScreenFadeOverlay,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.0)),
        GlobalZIndex(100), // on top of everything
    ));
}

fn fire_black_point(
    trigger_entity: Option<Entity>,
    trigger: Option<&FadeTrigger>,
    actions: &mut EventWriter<GameActionEvent>,
    black: &mut EventWriter<FadeBlackPointEvent>,
) {
    if let Some(trigger) = trigger {
        for action in &trigger.on_black {
            actions.send(GameActionEvent {
                action: action.clone(),
                source: trigger_entity,
            });
        }
    }
    black.send(FadeBlackPointEvent {
        trigger: trigger_entity,
    });
}

/// Record the requesting trigger and start its fade.
pub fn handle_fade_requests(
    mut requests: EventReader<FadeRequest>,
    mut fade: ResMut<ScreenFade>,
    mut triggers: Query<&mut FadeTrigger>,
    mut actions: EventWriter<GameActionEvent>,
    mut black: EventWriter<FadeBlackPointEvent>,
) {
    for request in requests.read() {
        let Ok(mut trigger) = triggers.get_mut(request.trigger) else {
            error!(
                "[Fade] {:?} has no FadeTrigger; request ignored.",
                request.trigger
            );
            continue;
        };
        if let Some(replacement) = &request.replace_actions {
            trigger.on_black = replacement.clone();
        }
        let kind = request.kind.unwrap_or(trigger.kind);

        if fade.is_active() {
            info!("[Fade] Restarting mid-fade at alpha {:.2}.", fade.alpha);
        }
        fade.last_trigger = Some(request.trigger);
        info!("[Fade] {:?} via {:?}", kind, request.trigger);

        if fade.begin(kind) {
            fire_black_point(fade.last_trigger, Some(&*trigger), &mut actions, &mut black);
        }
    }
}

/// Animate the fade; dispatch the black point and completion.
pub fn update_fade(
    time: Res<Time>,
    mut fade: ResMut<ScreenFade>,
    triggers: Query<&FadeTrigger>,
    mut actions: EventWriter<GameActionEvent>,
    mut black: EventWriter<FadeBlackPointEvent>,
    mut complete: EventWriter<FadeCompleteEvent>,
) {
    if !fade.is_active() {
        return;
    }

    let progress = fade.advance(time.delta_secs());
    let last = fade.last_trigger;

    if progress.reached_black {
        let trigger = last.and_then(|e| triggers.get(e).ok());
        fire_black_point(last, trigger, &mut actions, &mut black);
    }
    if progress.completed {
        complete.send(FadeCompleteEvent { trigger: last });
        fade.last_trigger = None;
    }
}

/// Mirror the fade alpha onto the overlay.
pub fn sync_fade_overlay(
    fade: Res<ScreenFade>,
    mut query: Query<&mut BackgroundColor, With<ScreenFadeOverlay>>,
) {
    if !fade.is_changed() {
        return;
    }
    for mut bg in &mut query {
        *bg = BackgroundColor(Color::srgba(0.0, 0.0, 0.0, fade.alpha));
    }
}
