//! Sprite-sheet frame animation

/// Arrangement of frames on a sprite sheet, read row by row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    /// Frames per row
    pub columns: u32,
    /// Number of rows
    pub rows: u32,
    /// Frames actually used (a sheet's last row may be partial)
    pub frame_count: u32,
}

impl FrameLayout {
    /// Full grid of `columns * rows` frames
    pub fn grid(columns: u32, rows: u32) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        Self {
            columns,
            rows,
            frame_count: columns * rows,
        }
    }

    /// A single row of `frames` frames
    pub fn strip(frames: u32) -> Self {
        Self::grid(frames, 1)
    }

    /// A still image
    pub fn single() -> Self {
        Self::grid(1, 1)
    }

    /// Use only the first `frame_count` cells of the grid
    pub fn with_frame_count(mut self, frame_count: u32) -> Self {
        self.frame_count = frame_count.clamp(1, self.columns * self.rows);
        self
    }

    /// `(column, row)` of a frame index
    pub fn cell(&self, frame: u32) -> (u32, u32) {
        (frame % self.columns, frame / self.columns)
    }
}

impl Default for FrameLayout {
    fn default() -> Self {
        Self::single()
    }
}

/// Playback state over a [`FrameLayout`]
///
/// A looping animation cycles forever. A one-shot animation holds its last
/// frame and reports [`is_finished`](Self::is_finished) once it has played
/// every frame for a full frame duration.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteAnimation {
    layout: FrameLayout,
    frame_rate: f32,
    looping: bool,
    elapsed: f32,
    frame: u32,
    finished: bool,
}

impl SpriteAnimation {
    /// Create an animation playing `frame_rate` frames per second
    ///
    /// A non-positive frame rate freezes the first frame.
    pub fn new(layout: FrameLayout, frame_rate: f32, looping: bool) -> Self {
        Self {
            layout,
            frame_rate: if frame_rate.is_finite() { frame_rate.max(0.0) } else { 0.0 },
            looping,
            elapsed: 0.0,
            frame: 0,
            finished: false,
        }
    }

    /// A single frame that never finishes
    pub fn still() -> Self {
        Self::new(FrameLayout::single(), 0.0, true)
    }

    /// Advance playback by `delta` seconds and return the current frame
    pub fn advance(&mut self, delta: f32) -> u32 {
        if self.finished || self.frame_rate <= 0.0 || delta <= 0.0 {
            return self.frame;
        }

        let count = self.layout.frame_count.max(1);
        self.elapsed += delta;

        if self.looping {
            let period = count as f32 / self.frame_rate;
            self.elapsed = self.elapsed.rem_euclid(period);
            self.frame = ((self.elapsed * self.frame_rate) as u32).min(count - 1);
        } else {
            let played = (self.elapsed * self.frame_rate) as u32;
            if played >= count {
                self.frame = count - 1;
                self.finished = true;
            } else {
                self.frame = played;
            }
        }
        self.frame
    }

    /// Restart from the first frame
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.frame = 0;
        self.finished = false;
    }

    /// Current frame index
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Sheet layout
    pub fn layout(&self) -> FrameLayout {
        self.layout
    }

    /// Whether playback wraps around
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Whether a one-shot animation has played out
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Default for SpriteAnimation {
    fn default() -> Self {
        Self::still()
    }
}
