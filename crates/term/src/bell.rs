//! Terminal bell audio sink.

use std::io::{self, Write};

use crate::core::AudioSink;
use crate::types::SoundCue;

const BEL: &[u8] = b"\x07";

/// Rings the terminal bell for every cue except `tap`.
pub struct BellSink<W: Write = io::Stdout> {
    out: W,
}

impl BellSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> BellSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn ring(&mut self) -> io::Result<()> {
        self.out.write_all(BEL)?;
        self.out.flush()
    }
}

impl<W: Write> AudioSink for BellSink<W> {
    fn play(&mut self, cue: SoundCue) {
        if cue == SoundCue::Tap {
            return;
        }
        if let Err(e) = self.ring() {
            log::debug!("bell for {} failed: {e}", cue.as_str());
        }
    }
}
