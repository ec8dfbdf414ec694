/// Collects partial input until a full frame is available.
///
/// The cursor reaching the frame size is the trigger for a transform; the
/// framer consumes the frame immediately and calls [`reset`](Self::reset), so
/// a full accumulator is never observed between calls.
#[derive(Debug, Clone)]
pub struct InputAccumulator {
    frame: Vec<f32>,
    cursor: usize,
}

impl InputAccumulator {
    /// Create an empty accumulator for frames of `frame_size` samples
    pub fn new(frame_size: usize) -> Self {
        InputAccumulator {
            frame: vec![0.0; frame_size],
            cursor: 0,
        }
    }

    /// Frame size N
    pub fn frame_size(&self) -> usize {
        self.frame.len()
    }

    /// Samples collected so far
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Room left before the frame is full
    pub fn remaining(&self) -> usize {
        self.frame.len() - self.cursor
    }

    /// Copy as much of `input` as fits, returning the number of samples taken
    pub fn push(&mut self, input: &[f32]) -> usize {
        let take = input.len().min(self.remaining());
        self.frame[self.cursor..self.cursor + take].copy_from_slice(&input[..take]);
        self.cursor += take;
        take
    }

    /// Whether a full frame is ready for the denoiser
    pub fn is_full(&self) -> bool {
        self.cursor == self.frame.len()
    }

    /// The accumulated frame (complete only when [`is_full`](Self::is_full))
    pub fn frame(&self) -> &[f32] {
        &self.frame
    }

    /// Start collecting the next frame
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}
