/*!
 * Video/timecode collaborator.
 *
 * The edit panel never converts between times and frames itself; a host
 * supplies a `VideoController` that owns the loaded video and its timecodes.
 */

/// Which edge of a frame a time conversion refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// First time at which the frame is shown
    Start,
    /// Time at which a line whose last visible frame is this one ends
    End,
}

/// Video playback and timecode services used by the panel
pub trait VideoController {
    /// Whether a video is open
    fn is_loaded(&self) -> bool;

    /// Whether frame/time conversion is available
    fn timecodes_loaded(&self) -> bool;

    fn frame_at_time(&self, ms: u64, kind: FrameKind) -> i64;

    fn time_at_frame(&self, frame: i64, kind: FrameKind) -> u64;

    /// Stop playback
    fn stop(&mut self);

    /// Seek to a time
    fn jump_to_time(&mut self, ms: u64);
}

/// Controller for a session without video
#[derive(Debug, Default, Clone, Copy)]
pub struct NoVideo;

impl VideoController for NoVideo {
    fn is_loaded(&self) -> bool {
        false
    }

    fn timecodes_loaded(&self) -> bool {
        false
    }

    fn frame_at_time(&self, _ms: u64, _kind: FrameKind) -> i64 {
        0
    }

    fn time_at_frame(&self, _frame: i64, _kind: FrameKind) -> u64 {
        0
    }

    fn stop(&mut self) {}

    fn jump_to_time(&mut self, _ms: u64) {}
}
