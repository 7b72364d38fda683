use cosmic_engine::{
    BrushConfig, DrawingScene, FrameDriver, InputEvent, InputQueue, LandingScene, PackedEvent,
    SceneConfig, SceneEvent,
};

/// One driver per active view. Switching views drops the old driver,
/// which cancels its scheduling and frees its particle collections.
enum ActiveDriver {
    Landing(FrameDriver<LandingScene>),
    Drawing(FrameDriver<DrawingScene>),
}

/// Wires the scene drivers to the browser loop.
///
/// The concrete wasm exports live in `lib.rs` as free functions over a
/// `thread_local!` runner, because wasm-bindgen cannot export stateful
/// structs like this one ergonomically.
pub struct SceneRunner {
    config: SceneConfig,
    driver: ActiveDriver,
    /// Last accepted brush settings, reapplied when the drawing view is
    /// rebuilt.
    brush: BrushConfig,
    input: InputQueue,
    /// Flat 4-float event records for the host-side reader.
    event_buffer: Vec<PackedEvent>,
    events: Vec<SceneEvent>,
    width: u32,
    height: u32,
    dpr: f32,
}

impl SceneRunner {
    pub fn new(config: SceneConfig) -> Self {
        let driver = ActiveDriver::Landing(FrameDriver::new(
            LandingScene::new(&config),
            config.fixed_dt,
        ));
        SceneRunner {
            config,
            driver,
            brush: BrushConfig::default(),
            input: InputQueue::new(),
            event_buffer: Vec::with_capacity(8),
            events: Vec::with_capacity(8),
            width: 0,
            height: 0,
            dpr: 1.0,
        }
    }

    /// Viewport changed. The landing backdrop renders at CSS-pixel
    /// resolution; the drawing canvas renders at device resolution and
    /// scales pointer input itself.
    pub fn resize(&mut self, width: u32, height: u32, dpr: f32) {
        self.width = width;
        self.height = height;
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
        self.apply_size();
        log::debug!("resize: {width}x{height} @ {dpr}");
    }

    fn apply_size(&mut self) {
        match &mut self.driver {
            ActiveDriver::Landing(driver) => driver.resize(self.width, self.height),
            ActiveDriver::Drawing(driver) => {
                let dw = (self.width as f32 * self.dpr) as u32;
                let dh = (self.height as f32 * self.dpr) as u32;
                driver.resize(dw, dh);
                driver.scene_mut().set_dpr(self.dpr);
            }
        }
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// One host frame: deliver queued input to the active view, run its
    /// fixed steps, repaint, and repack the event buffer.
    pub fn tick(&mut self, dt: f32) {
        self.events.clear();
        let queued = self.input.drain();
        match &mut self.driver {
            ActiveDriver::Landing(driver) => {
                for event in queued {
                    driver.handle_input(event);
                }
                driver.tick(dt, &mut self.events);
            }
            ActiveDriver::Drawing(driver) => {
                for event in queued {
                    driver.handle_input(event);
                }
                driver.tick(dt, &mut self.events);
            }
        }
        self.event_buffer.clear();
        for &event in &self.events {
            self.event_buffer.push(PackedEvent::from(event));
        }
    }

    /// Begin the orbital transition; ignored while the drawing view is
    /// up or a transition is already running.
    pub fn start_transition(&mut self) {
        if let ActiveDriver::Landing(driver) = &mut self.driver {
            driver.scene_mut().start_transition();
        }
    }

    /// Switch to the drawing view, tearing the landing view down.
    pub fn enter_drawing(&mut self) {
        if matches!(self.driver, ActiveDriver::Drawing(_)) {
            return;
        }
        let mut scene = DrawingScene::new(&self.config);
        scene.set_brush(self.brush.clone());
        self.driver = ActiveDriver::Drawing(FrameDriver::new(scene, self.config.fixed_dt));
        self.apply_size();
        log::info!("view: drawing");
    }

    /// Return to a fresh landing view with the transition rearmed.
    pub fn enter_landing(&mut self) {
        if matches!(self.driver, ActiveDriver::Landing(_)) {
            return;
        }
        self.driver = ActiveDriver::Landing(FrameDriver::new(
            LandingScene::new(&self.config),
            self.config.fixed_dt,
        ));
        self.apply_size();
        log::info!("view: landing");
    }

    /// Apply a brush configuration JSON; a malformed payload is logged
    /// and the previous brush stays in effect.
    pub fn set_brush(&mut self, json: &str) {
        match BrushConfig::from_json(json) {
            Ok(config) => {
                self.brush = config.clone();
                if let ActiveDriver::Drawing(driver) = &mut self.driver {
                    driver.scene_mut().set_brush(config);
                }
            }
            Err(err) => log::warn!("rejected brush config: {err}"),
        }
    }

    pub fn clear_artwork(&mut self) {
        if let ActiveDriver::Drawing(driver) = &mut self.driver {
            driver.scene_mut().clear_artwork();
        }
    }

    // ---- Flat-buffer accessors for the host blit ----

    pub fn pixels_ptr(&self) -> *const u8 {
        match &self.driver {
            ActiveDriver::Landing(driver) => driver.surface().as_bytes().as_ptr(),
            ActiveDriver::Drawing(driver) => driver.surface().as_bytes().as_ptr(),
        }
    }

    pub fn pixels_len(&self) -> u32 {
        match &self.driver {
            ActiveDriver::Landing(driver) => driver.surface().as_bytes().len() as u32,
            ActiveDriver::Drawing(driver) => driver.surface().as_bytes().len() as u32,
        }
    }

    pub fn artwork_ptr(&self) -> *const u8 {
        match &self.driver {
            ActiveDriver::Drawing(driver) => driver.scene().artwork().as_bytes().as_ptr(),
            ActiveDriver::Landing(_) => std::ptr::null(),
        }
    }

    pub fn artwork_len(&self) -> u32 {
        match &self.driver {
            ActiveDriver::Drawing(driver) => driver.scene().artwork().as_bytes().len() as u32,
            ActiveDriver::Landing(_) => 0,
        }
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.event_buffer.as_ptr() as *const f32
    }

    /// Number of packed floats (4 per event record).
    pub fn events_len(&self) -> u32 {
        (self.event_buffer.len() * PackedEvent::FLOATS) as u32
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    // ---- Brush cursor advisories for the host overlay ----

    pub fn cursor_x(&self) -> f32 {
        match &self.driver {
            ActiveDriver::Drawing(driver) => driver.scene().cursor().x,
            ActiveDriver::Landing(_) => 0.0,
        }
    }

    pub fn cursor_y(&self) -> f32 {
        match &self.driver {
            ActiveDriver::Drawing(driver) => driver.scene().cursor().y,
            ActiveDriver::Landing(_) => 0.0,
        }
    }

    pub fn is_drawing(&self) -> bool {
        match &self.driver {
            ActiveDriver::Drawing(driver) => driver.scene().is_drawing(),
            ActiveDriver::Landing(_) => false,
        }
    }

    #[cfg(test)]
    fn drawing_scene(&self) -> Option<&DrawingScene> {
        match &self.driver {
            ActiveDriver::Drawing(driver) => Some(driver.scene()),
            ActiveDriver::Landing(_) => None,
        }
    }
}
