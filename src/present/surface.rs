use crate::foundation::error::ParfillResult;
use crate::render::buffer::Frame;

/// Consumer of finished frames.
///
/// Called once per frame, after all fills for that frame have completed.
pub trait Presenter {
    /// Display or store `frame`.
    fn present(&mut self, frame: &Frame) -> ParfillResult<()>;
}

/// In-memory presenter for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryPresenter {
    frames: Vec<Frame>,
}

impl InMemoryPresenter {
    /// Create a new in-memory presenter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames in presentation order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Most recently presented frame.
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl Presenter for InMemoryPresenter {
    fn present(&mut self, frame: &Frame) -> ParfillResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn present(&mut self, frame: &Frame) -> ParfillResult<()> {
        (**self).present(frame)
    }
}
