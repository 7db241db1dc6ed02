use crate::ViewError;
use roomview_kernel::{ManualTime, TickDriver, TickQueue, TimeSource};
use roomview_render::{DebugTextRenderer, Renderer};
use roomview_scene::Scene;

/// What a [`RoomView`](crate::RoomView) needs from whatever embeds it: a
/// container size, a rendering surface, a tick source and a clock.
pub trait ViewHost {
    type Renderer: Renderer;

    /// Container size in pixels.
    fn size(&self) -> (u32, u32);

    /// Attach a renderer for `scene` to the host's surface.
    fn attach(&mut self, scene: &Scene) -> Result<Self::Renderer, ViewError>;

    fn tick_driver(&mut self) -> Box<dyn TickDriver>;

    fn time_source(&mut self) -> Box<dyn TimeSource>;
}

/// GPU-free host: text renderer, hand-advanced clock and a polled tick
/// queue.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    width: u32,
    height: u32,
    queue: TickQueue,
    time: ManualTime,
    list_objects: bool,
}

impl HeadlessHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            queue: TickQueue::new(),
            time: ManualTime::new(),
            list_objects: false,
        }
    }

    /// Make the text renderer print every object.
    pub fn listing_objects(mut self) -> Self {
        self.list_objects = true;
        self
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn queue(&self) -> &TickQueue {
        &self.queue
    }

    pub fn time(&self) -> &ManualTime {
        &self.time
    }
}

impl ViewHost for HeadlessHost {
    type Renderer = DebugTextRenderer;

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn attach(&mut self, _scene: &Scene) -> Result<DebugTextRenderer, ViewError> {
        let renderer = DebugTextRenderer::new(self.width, self.height);
        Ok(if self.list_objects {
            renderer.listing_objects()
        } else {
            renderer
        })
    }

    fn tick_driver(&mut self) -> Box<dyn TickDriver> {
        Box::new(self.queue.clone())
    }

    fn time_source(&mut self) -> Box<dyn TimeSource> {
        Box::new(self.time.clone())
    }
}
