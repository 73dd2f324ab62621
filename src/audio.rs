use std::fmt;
use std::io::{self, Write};

/// Sound events emitted by the game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum AudioCue {
    Eat,
    GameOver,
    BackgroundStart,
    BackgroundStop,
}

impl AudioCue {
    pub(crate) fn tag(self) -> &'static str {
        match self {
            AudioCue::Eat => "eat",
            AudioCue::GameOver => "gameOver",
            AudioCue::BackgroundStart => "backgroundStart",
            AudioCue::BackgroundStop => "backgroundStop",
        }
    }
}

impl fmt::Display for AudioCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

/// Something that plays (or ignores) sound cues.  Errors are reported to the
/// caller, which is expected to carry on regardless.
pub(crate) trait AudioSink: fmt::Debug {
    fn cue(&mut self, cue: AudioCue) -> io::Result<()>;
}

/// Rings the terminal bell for one-shot cues.  There is no background music
/// in a terminal, so the background cues are ignored.
#[derive(Debug)]
pub(crate) struct TerminalBell<W> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub(crate) fn new(out: W) -> TerminalBell<W> {
        TerminalBell { out }
    }
}

impl<W: Write + fmt::Debug> AudioSink for TerminalBell<W> {
    fn cue(&mut self, cue: AudioCue) -> io::Result<()> {
        match cue {
            AudioCue::Eat | AudioCue::GameOver => {
                self.out.write_all(b"\x07")?;
                self.out.flush()
            }
            AudioCue::BackgroundStart | AudioCue::BackgroundStop => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AudioCue::Eat, "eat")]
    #[case(AudioCue::GameOver, "gameOver")]
    #[case(AudioCue::BackgroundStart, "backgroundStart")]
    #[case(AudioCue::BackgroundStop, "backgroundStop")]
    fn test_tags(#[case] cue: AudioCue, #[case] tag: &str) {
        assert_eq!(cue.tag(), tag);
        assert_eq!(cue.to_string(), tag);
    }

    #[test]
    fn bell_rings_for_one_shot_cues() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.cue(AudioCue::BackgroundStart).unwrap();
        bell.cue(AudioCue::Eat).unwrap();
        bell.cue(AudioCue::GameOver).unwrap();
        bell.cue(AudioCue::BackgroundStop).unwrap();
        assert_eq!(bell.out, b"\x07\x07");
    }
}
