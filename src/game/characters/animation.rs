// Character animation clips

use super::state::AnimationState;
use crate::engine::assets::{AssetCache, AssetError, AssetType, FrameImage};
use std::ops::Range;

/// Errors building an animation clip
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnimationError {
    #[error("animation clip has no frames")]
    NoFrames,

    #[error("frame {index} has non-positive duration {duration_ms}ms")]
    InvalidDuration { index: usize, duration_ms: f32 },
}

/// A single displayed image and how long it stays on screen
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: FrameImage,
    pub duration_ms: f32,
}

impl Frame {
    pub fn new(image: FrameImage, duration_ms: f32) -> Self {
        Self { image, duration_ms }
    }

    pub fn width(&self) -> f32 {
        self.image.width() as f32
    }

    pub fn height(&self) -> f32 {
        self.image.height() as f32
    }
}

/// An ordered, timed sequence of frames
#[derive(Debug, Clone)]
pub struct AnimationClip {
    frames: Vec<Frame>,
    /// Whether the animation loops
    looping: bool,
    /// Current frame index
    current_frame: usize,
    /// Time accumulated on the current frame
    frame_timer_ms: f32,
}

impl AnimationClip {
    /// Create a clip from pre-loaded frames
    pub fn new(frames: Vec<Frame>, looping: bool) -> Result<Self, AnimationError> {
        if frames.is_empty() {
            return Err(AnimationError::NoFrames);
        }
        if let Some((index, frame)) = frames
            .iter()
            .enumerate()
            .find(|(_, f)| !(f.duration_ms > 0.0))
        {
            return Err(AnimationError::InvalidDuration {
                index,
                duration_ms: frame.duration_ms,
            });
        }

        Ok(Self {
            frames,
            looping,
            current_frame: 0,
            frame_timer_ms: 0.0,
        })
    }

    /// Create a looping clip
    #[cfg(test)]
    pub fn looping(frames: Vec<Frame>) -> Result<Self, AnimationError> {
        Self::new(frames, true)
    }

    /// Create a one-shot clip that holds its last frame
    #[cfg(test)]
    pub fn one_shot(frames: Vec<Frame>) -> Result<Self, AnimationError> {
        Self::new(frames, false)
    }

    /// Advance playback by `elapsed_ms`
    pub fn advance(&mut self, elapsed_ms: f32) {
        if self.is_finished() {
            return;
        }

        self.frame_timer_ms += elapsed_ms;

        while self.frame_timer_ms > self.frames[self.current_frame].duration_ms {
            self.frame_timer_ms -= self.frames[self.current_frame].duration_ms;
            self.current_frame += 1;

            if self.current_frame >= self.frames.len() {
                if self.looping {
                    self.current_frame = 0;
                } else {
                    // Stay on last frame
                    self.current_frame = self.frames.len() - 1;
                    self.frame_timer_ms = 0.0;
                    return;
                }
            }
        }
    }

    /// Rewind to the first frame
    pub fn restart(&mut self) {
        self.current_frame = 0;
        self.frame_timer_ms = 0.0;
    }

    pub fn current_frame(&self) -> &Frame {
        &self.frames[self.current_frame]
    }

    #[cfg(test)]
    pub fn frame_index(&self) -> usize {
        self.current_frame
    }

    /// A one-shot clip resting on its last frame
    pub fn is_finished(&self) -> bool {
        !self.looping && self.current_frame == self.frames.len() - 1
    }
}

/// Where the frames of one clip live on disk
#[derive(Debug, Clone)]
pub struct ClipSpec {
    pub state: AnimationState,
    /// File name pattern under the textures directory, `{}` is the frame number
    pub pattern: &'static str,
    pub frames: Range<u32>,
    pub frame_ms: f32,
    pub looping: bool,
}

/// The character's clips as shipped with the game
pub const STANDARD_CLIPS: [ClipSpec; 4] = [
    ClipSpec {
        state: AnimationState::Idle,
        pattern: "mainChar/Idle/BlueIdle{}.png",
        frames: 3..20,
        frame_ms: 60.0,
        looping: true,
    },
    ClipSpec {
        state: AnimationState::Walking,
        pattern: "mainChar/Walk/BlueWalking{}.png",
        frames: 3..20,
        frame_ms: 60.0,
        looping: true,
    },
    ClipSpec {
        state: AnimationState::Jumping,
        pattern: "mainChar/Jump/BlueJumping{}.png",
        frames: 0..8,
        frame_ms: 60.0,
        looping: false,
    },
    ClipSpec {
        state: AnimationState::Dashing,
        pattern: "mainChar/Jump/Dash2/teseter/DashAgain{}.png",
        frames: 0..16,
        frame_ms: 19.0,
        looping: true,
    },
];

/// Errors loading a clip from disk
#[derive(Debug, thiserror::Error)]
pub enum ClipLoadError {
    #[error("{state:?} clip: {source}")]
    Asset {
        state: AnimationState,
        #[source]
        source: AssetError,
    },

    #[error("{state:?} clip: {source}")]
    Animation {
        state: AnimationState,
        #[source]
        source: AnimationError,
    },
}

impl ClipSpec {
    /// Load every frame of this clip through the asset cache
    pub fn load(&self, assets: &mut AssetCache) -> Result<AnimationClip, ClipLoadError> {
        let state = self.state;
        let mut frames = Vec::with_capacity(self.frames.len());
        for n in self.frames.clone() {
            let name = self.pattern.replace("{}", &n.to_string());
            let image = assets
                .load_image(AssetType::Texture, &name)
                .map_err(|source| ClipLoadError::Asset { state, source })?;
            frames.push(Frame::new(image, self.frame_ms));
        }
        AnimationClip::new(frames, self.looping)
            .map_err(|source| ClipLoadError::Animation { state, source })
    }
}

/// One clip per animation state
#[derive(Debug, Clone)]
pub struct ClipSet {
    pub idle: AnimationClip,
    pub walking: AnimationClip,
    pub jumping: AnimationClip,
    pub dashing: AnimationClip,
}

impl ClipSet {
    /// Load the clip for each state described by `specs`
    pub fn load(assets: &mut AssetCache, specs: &[ClipSpec]) -> Result<Self, ClipLoadError> {
        let mut find = |state: AnimationState| -> Result<AnimationClip, ClipLoadError> {
            let spec = specs.iter().find(|s| s.state == state).ok_or(
                ClipLoadError::Animation {
                    state,
                    source: AnimationError::NoFrames,
                },
            )?;
            spec.load(assets)
        };

        Ok(Self {
            idle: find(AnimationState::Idle)?,
            walking: find(AnimationState::Walking)?,
            jumping: find(AnimationState::Jumping)?,
            dashing: find(AnimationState::Dashing)?,
        })
    }

    pub fn get(&self, state: AnimationState) -> &AnimationClip {
        match state {
            AnimationState::Idle => &self.idle,
            AnimationState::Walking => &self.walking,
            AnimationState::Jumping => &self.jumping,
            AnimationState::Dashing => &self.dashing,
        }
    }

    pub fn get_mut(&mut self, state: AnimationState) -> &mut AnimationClip {
        match state {
            AnimationState::Idle => &mut self.idle,
            AnimationState::Walking => &mut self.walking,
            AnimationState::Jumping => &mut self.jumping,
            AnimationState::Dashing => &mut self.dashing,
        }
    }
}
