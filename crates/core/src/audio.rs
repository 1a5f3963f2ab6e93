//! Audio collaborator: fire-and-forget sound cues.

use crate::types::SoundCue;

/// Anything that can play a cue. Playing never fails and returns nothing.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

impl<T: AudioSink + ?Sized> AudioSink for Box<T> {
    fn play(&mut self, cue: SoundCue) {
        (**self).play(cue);
    }
}

/// Sink that drops every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Sink that remembers what it was asked to play, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    cues: Vec<SoundCue>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> &[SoundCue] {
        &self.cues
    }

    /// Hand back everything recorded so far and start over.
    pub fn take(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}

/// Wraps a sink with a mute switch.
#[derive(Debug, Clone, Default)]
pub struct Mixer<A> {
    sink: A,
    muted: bool,
}

impl<A: AudioSink> Mixer<A> {
    pub fn new(sink: A) -> Self {
        Self { sink, muted: false }
    }

    pub fn play(&mut self, cue: SoundCue) {
        if self.muted {
            return;
        }
        log::trace!("cue {}", cue.as_str());
        self.sink.play(cue);
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn sink(&self) -> &A {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut A {
        &mut self.sink
    }
}
