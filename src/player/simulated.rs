// In-process stand-in for the embedded video widget. It keeps a wall clock
// instead of decoding anything, which is enough to drive the custom controls
// in the desktop app: position advances while playing, commands emit state
// events on the channel just like a real embed would.
//
// Queries take `&self`, so the clock lives in `Cell`s: a query that finds the
// position at the end stops the clock and announces `Ended` itself.

use std::cell::Cell;
use std::collections::HashMap;
use std::time::Instant;
use crate::core::Catalog;
use crate::player::format::parse_clock;
use crate::player::widget::{
    EmbedWidget, MountPoint, QualityLevel, WidgetConfig, WidgetError, WidgetEvent, WidgetEvents,
    WidgetFactory, WidgetState,
};

pub struct SimulatedWidget {
    video_id: String,
    duration: f64,
    state: Cell<WidgetState>,
    base_position: Cell<f64>,
    playing_since: Cell<Option<Instant>>,
    rate: f32,
    volume: u8,
    muted: bool,
    quality: QualityLevel,
    available: Vec<QualityLevel>,
    events: WidgetEvents,
    destroyed: bool,
}

impl SimulatedWidget {
    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    fn position_at(&self, now: Instant) -> f64 {
        let elapsed = self
            .playing_since
            .get()
            .map(|since| now.duration_since(since).as_secs_f64() * self.rate as f64)
            .unwrap_or(0.0);
        (self.base_position.get() + elapsed).clamp(0.0, self.duration)
    }

    /// Folds elapsed play time into the base position. Reaching the end
    /// while playing stops the clock and emits `Ended`.
    fn settle(&self) {
        let now = Instant::now();
        let position = self.position_at(now);
        self.base_position.set(position);

        if self.playing_since.get().is_none() {
            return;
        }
        if position >= self.duration {
            self.playing_since.set(None);
            self.transition(WidgetState::Ended);
        } else {
            self.playing_since.set(Some(now));
        }
    }

    fn transition(&self, state: WidgetState) {
        if self.state.get() == state {
            return;
        }
        self.state.set(state);
        if self.events.send(WidgetEvent::StateChanged(state)).is_err() {
            log::debug!("Simulated widget {} has no listener for state changes", self.video_id);
        }
    }
}

impl EmbedWidget for SimulatedWidget {
    fn play(&mut self) {
        if self.destroyed {
            return;
        }
        self.settle();
        if self.base_position.get() >= self.duration {
            self.base_position.set(0.0);
        }
        self.playing_since.set(Some(Instant::now()));
        self.transition(WidgetState::Playing);
    }

    fn pause(&mut self) {
        if self.destroyed {
            return;
        }
        self.settle();
        if self.state.get() == WidgetState::Ended {
            return;
        }
        self.playing_since.set(None);
        self.transition(WidgetState::Paused);
    }

    fn seek_to(&mut self, seconds: f64, _allow_seek_ahead: bool) {
        if self.destroyed {
            return;
        }
        self.base_position.set(seconds.clamp(0.0, self.duration));
        if self.playing_since.get().is_some() {
            self.playing_since.set(Some(Instant::now()));
        }
        self.settle();
    }

    fn current_time(&self) -> Result<f64, WidgetError> {
        if self.destroyed {
            return Err(WidgetError::Destroyed);
        }
        self.settle();
        Ok(self.base_position.get())
    }

    fn duration(&self) -> Result<f64, WidgetError> {
        if self.destroyed {
            return Err(WidgetError::Destroyed);
        }
        Ok(self.duration)
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
    }

    fn volume(&self) -> Result<u8, WidgetError> {
        if self.destroyed {
            return Err(WidgetError::Destroyed);
        }
        Ok(self.volume)
    }

    fn mute(&mut self) {
        self.muted = true;
    }

    fn unmute(&mut self) {
        self.muted = false;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_playback_rate(&mut self, rate: f32) {
        self.settle();
        self.rate = rate;
    }

    fn set_playback_quality(&mut self, quality: QualityLevel) {
        self.quality = quality;
    }

    fn playback_quality(&self) -> Result<QualityLevel, WidgetError> {
        if self.destroyed {
            return Err(WidgetError::Destroyed);
        }
        Ok(self.quality)
    }

    fn available_quality_levels(&self) -> Vec<QualityLevel> {
        self.available.clone()
    }

    fn state(&self) -> WidgetState {
        if !self.destroyed {
            self.settle();
        }
        self.state.get()
    }

    fn suppress_chrome(&mut self) -> Result<(), WidgetError> {
        if self.destroyed {
            return Err(WidgetError::Destroyed);
        }
        // Nothing native to hide
        Ok(())
    }

    fn destroy(&mut self) {
        self.playing_since.set(None);
        self.destroyed = true;
    }
}

pub struct SimulatedWidgetFactory {
    durations: HashMap<String, f64>,
    default_duration: f64,
    available: Vec<QualityLevel>,
}

impl SimulatedWidgetFactory {
    pub fn new(default_duration: f64) -> Self {
        Self {
            durations: HashMap::new(),
            default_duration,
            available: vec![
                QualityLevel::Hd1080,
                QualityLevel::Hd720,
                QualityLevel::Large,
                QualityLevel::Medium,
                QualityLevel::Small,
                QualityLevel::Tiny,
                QualityLevel::Auto,
            ],
        }
    }

    /// Takes each item's length from its catalog duration string.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut factory = Self::new(600.0);
        for item in catalog.items() {
            match parse_clock(&item.duration) {
                Some(seconds) if seconds > 0.0 => {
                    factory.durations.insert(item.video_id.clone(), seconds);
                }
                _ => log::debug!("No usable duration for {} ({:?})", item.video_id, item.duration),
            }
        }
        factory
    }
}

impl WidgetFactory for SimulatedWidgetFactory {
    type Widget = SimulatedWidget;

    fn create(
        &mut self,
        mount: MountPoint,
        video_id: &str,
        config: &WidgetConfig,
        events: WidgetEvents,
    ) -> Result<SimulatedWidget, WidgetError> {
        let duration = self
            .durations
            .get(video_id)
            .copied()
            .unwrap_or(self.default_duration);

        let mut widget = SimulatedWidget {
            video_id: video_id.to_string(),
            duration,
            state: Cell::new(WidgetState::Unstarted),
            base_position: Cell::new(0.0),
            playing_since: Cell::new(None),
            rate: 1.0,
            volume: 100,
            muted: false,
            quality: config.quality_hint,
            available: self.available.clone(),
            events,
            destroyed: false,
        };

        widget
            .events
            .send(WidgetEvent::Ready)
            .map_err(|_| WidgetError::Creation("event channel closed".to_string()))?;

        if config.autoplay {
            widget.play();
        } else {
            widget.transition(WidgetState::Cued);
        }

        log::debug!("Simulated widget created for {} on {:?} ({:.0}s)", video_id, mount, duration);
        Ok(widget)
    }
}
