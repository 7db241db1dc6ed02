use crate::{ViewConfig, ViewError, ViewHost};
use roomview_common::{Color, ViewId};
use roomview_input::{InputEvent, InputState, KeyBindings};
use roomview_kernel::{
    AnimationRegistry, CameraController, FrameScheduler, PerspectiveCamera, TickToken,
};
use roomview_render::{Frame, Renderer};
use roomview_scene::{RoomRig, Scene, furnish, layout::BACKGROUND};

/// State that exists only while mounted. Dropping it releases the renderer.
struct Mounted<R> {
    scene: Scene,
    rig: RoomRig,
    registry: AnimationRegistry,
    camera: PerspectiveCamera,
    controller: CameraController,
    input: InputState,
    scheduler: FrameScheduler,
    renderer: R,
}

/// The animated room as a mountable view.
pub struct RoomView<R: Renderer> {
    id: ViewId,
    config: ViewConfig,
    mounted: Option<Mounted<R>>,
}

impl<R: Renderer> RoomView<R> {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            id: ViewId::new(),
            config,
            mounted: None,
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.mounted.as_ref().map(|m| &m.scene)
    }

    pub fn rig(&self) -> Option<&RoomRig> {
        self.mounted.as_ref().map(|m| &m.rig)
    }

    pub fn camera(&self) -> Option<&PerspectiveCamera> {
        self.mounted.as_ref().map(|m| &m.camera)
    }

    pub fn input(&self) -> Option<&InputState> {
        self.mounted.as_ref().map(|m| &m.input)
    }

    pub fn renderer(&self) -> Option<&R> {
        self.mounted.as_ref().map(|m| &m.renderer)
    }

    /// Ticks run since the current mount; zero when unmounted.
    pub fn tick_count(&self) -> u64 {
        self.mounted.as_ref().map_or(0, |m| m.scheduler.ticks())
    }

    /// Build the room, attach the renderer and start ticking.
    pub fn mount<H>(&mut self, host: &mut H) -> Result<(), ViewError>
    where
        H: ViewHost<Renderer = R>,
    {
        let _span = tracing::info_span!("mount", view = %self.id.short()).entered();
        if self.mounted.is_some() {
            return Err(ViewError::AlreadyMounted);
        }
        let (width, height) = host.size();
        if width == 0 || height == 0 {
            tracing::error!(width, height, "refusing to mount into an empty container");
            return Err(ViewError::InvalidContainer { width, height });
        }

        let mut scene = Scene::new(Color::hex(BACKGROUND));
        let rig = furnish(&mut scene, self.config.seed);
        let registry = AnimationRegistry::for_room(&rig);
        let mut camera = self.config.camera(width, height);
        let mut controller = CameraController::new(self.config.camera, KeyBindings::default());
        controller.reset(&mut camera);

        let renderer = host.attach(&scene)?;
        tracing::info!(width, height, "surface attached");
        let scheduler = FrameScheduler::start(host.tick_driver(), host.time_source());

        tracing::info!(
            objects = scene.object_count(),
            lights = scene.light_count(),
            animated = registry.len(),
            seed = self.config.seed,
            "room view mounted"
        );
        self.mounted = Some(Mounted {
            scene,
            rig,
            registry,
            camera,
            controller,
            input: InputState::new(),
            scheduler,
            renderer,
        });
        Ok(())
    }

    /// Stop ticking, drop input state and release the renderer. Returns
    /// false if the view was not mounted.
    pub fn unmount(&mut self) -> bool {
        let Some(mut mounted) = self.mounted.take() else {
            return false;
        };
        mounted.scheduler.stop();
        let ticks = mounted.scheduler.ticks();
        drop(mounted);
        tracing::info!(view = %self.id.short(), ticks, "room view unmounted");
        true
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        let Some(m) = self.mounted.as_mut() else {
            return;
        };
        if width == 0 || height == 0 {
            tracing::debug!(width, height, "ignoring degenerate resize");
            return;
        }
        m.camera.set_aspect(width, height);
        m.renderer.resize(width, height);
        tracing::debug!(width, height, aspect = m.camera.aspect, "view resized");
    }

    /// Route a host input event into the view. Returns false, and does
    /// nothing, when unmounted.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match self.mounted.as_mut() {
            Some(m) => {
                m.input.apply(event);
                true
            }
            None => false,
        }
    }

    /// Run the tick identified by `token`: camera, animations, one render.
    pub fn on_tick(&mut self, token: TickToken) -> Result<R::Output, ViewError> {
        let Some(m) = self.mounted.as_mut() else {
            tracing::warn!(view = %self.id.short(), %token, "tick delivered to unmounted view");
            return Err(ViewError::NotMounted);
        };
        let Mounted {
            scene,
            registry,
            camera,
            controller,
            input,
            scheduler,
            renderer,
            ..
        } = m;
        let tick = scheduler.ticks() + 1;
        let output = scheduler.run(token, |time| {
            controller.update(camera, input, time.delta);
            registry.update_all(time.elapsed, scene);
            renderer.render(&Frame {
                scene: &*scene,
                camera: &*camera,
                time,
                tick,
            })
        })?;
        Ok(output)
    }
}

impl<R: Renderer> Drop for RoomView<R> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<R: Renderer> std::fmt::Debug for RoomView<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomView")
            .field("id", &self.id.short())
            .field("mounted", &self.is_mounted())
            .field("ticks", &self.tick_count())
            .finish()
    }
}
