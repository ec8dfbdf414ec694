/// Holds one denoised frame while the caller drains it in arbitrary pieces.
#[derive(Debug, Clone)]
pub struct OutputBacklog {
    frame: Vec<f32>,
    /// Read cursor; starts at N so a fresh backlog is empty
    read: usize,
}

impl OutputBacklog {
    /// Create an empty backlog for frames of `frame_size` samples
    pub fn new(frame_size: usize) -> Self {
        OutputBacklog {
            frame: vec![0.0; frame_size],
            read: frame_size,
        }
    }

    /// Unread denoised samples
    pub fn fill(&self) -> usize {
        self.frame.len() - self.read
    }

    /// Read cursor r
    pub fn read_cursor(&self) -> usize {
        self.read
    }

    /// Buffer to write the next denoised frame into.
    ///
    /// Must only be used once the previous frame is fully drained; follow with
    /// [`rewind`](Self::rewind) to make the new frame readable.
    pub fn frame_mut(&mut self) -> &mut [f32] {
        &mut self.frame
    }

    /// The current frame, read or not
    pub fn frame(&self) -> &[f32] {
        &self.frame
    }

    /// Mark the whole frame as unread
    pub fn rewind(&mut self) {
        self.read = 0;
    }

    /// Write the next `out.len()` samples: backlog first, then silence.
    pub fn drain_into(&mut self, out: &mut [f32]) {
        let take = out.len().min(self.fill());
        out[..take].copy_from_slice(&self.frame[self.read..self.read + take]);
        out[take..].fill(0.0);
        self.read += take;
    }
}
