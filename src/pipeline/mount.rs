//! Mount API - Application lifecycle and reactive effects.
//!
//! [`TraceApp`] is the application core without a terminal attached: it owns
//! the session, the shared geometry handle, the layout mapper, the settle
//! timer and three effects:
//!
//! - **render** - reads the session, cursor, terminal size and marker
//!   placements, lays out the box row, publishes the geometry, builds a frame
//!   and presents it to the [`FrameSink`]
//! - **structure** - when the identity order of the items changes (swap,
//!   reset), measures right away and schedules a settle remeasure
//! - **pointers** - when the pointer triple changes, recomputes placements
//!
//! Time is passed in (`handle_input(event, now)`, `tick(now)`), so a test can
//! drive the app without a clock or a terminal.
//!
//! # Example
//!
//! ```ignore
//! let mut app = TraceApp::new(&config, DiffRenderer::stdout(), (80, 24), Instant::now())?;
//! while app.is_running() {
//!     let now = Instant::now();
//!     if let Some(event) = poll_event(app.next_timeout(now))? {
//!         app.handle_input(event, Instant::now());
//!     }
//!     app.tick(Instant::now());
//! }
//! app.unmount();
//! ```

use std::cell::{Cell, Ref, RefCell};
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use spark_signals::{Signal, effect, signal};
use tracing::{debug, info, trace, warn};

use super::frame::{ARRAY_TOP, FrameView, build_frame};
use super::terminal::{TerminalSetup, detect_terminal_size};
use crate::config::TraceConfig;
use crate::error::Result;
use crate::layout::{
    ArrayGeometry, ArrayLayoutStyle, LayoutMapper, SettleTimer, compute_array_layout,
};
use crate::model::{Action, ActionOutcome, ItemId, TraceSession};
use crate::renderer::{DiffRenderer, FrameBuffer};
use crate::state::{Command, HitGrid, HitTarget, InputEvent, command_for_key, poll_event};

/// Shared geometry handle: written by the render effect, read by the mapper.
pub type GeometryHandle = Rc<RefCell<ArrayGeometry>>;

// =============================================================================
// Frame Sink
// =============================================================================

/// Where finished frames go.
pub trait FrameSink {
    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()>;

    /// Forget any previous frame; the next present redraws everything.
    fn invalidate(&mut self) {}
}

impl<W: Write> FrameSink for DiffRenderer<W> {
    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        self.render(frame).map(|_| ())
    }

    fn invalidate(&mut self) {
        DiffRenderer::invalidate(self);
    }
}

// =============================================================================
// Trace App
// =============================================================================

/// The trainer, minus the terminal.
pub struct TraceApp<S: FrameSink + 'static> {
    session: TraceSession,
    width: Signal<u16>,
    height: Signal<u16>,
    cursor: Signal<Option<usize>>,
    geometry: GeometryHandle,
    mapper: Rc<LayoutMapper<GeometryHandle>>,
    settle: Rc<RefCell<SettleTimer>>,
    hit_grid: Rc<RefCell<HitGrid>>,
    sink: Rc<RefCell<S>>,
    // Latest time handed in by the host; effects schedule against it.
    clock: Rc<Cell<Instant>>,
    frames: Rc<Cell<u64>>,
    stops: Vec<Box<dyn FnOnce()>>,
    running: bool,
}

impl<S: FrameSink + 'static> TraceApp<S> {
    /// Start a session from `config` and mount its effects.
    ///
    /// The first frame is presented before this returns.
    pub fn new(config: &TraceConfig, sink: S, size: (u16, u16), now: Instant) -> Result<Self> {
        let session = TraceSession::new(config)?;
        let (width, height) = size;

        // Surface layout errors here rather than inside the render effect
        let initial = compute_array_layout(session.len(), (0, ARRAY_TOP), width, &config.layout)?;
        let geometry: GeometryHandle = Rc::new(RefCell::new(initial));

        let mut app = Self {
            session,
            width: signal(width),
            height: signal(height),
            cursor: signal(None),
            mapper: Rc::new(LayoutMapper::new(geometry.clone())),
            geometry,
            settle: Rc::new(RefCell::new(SettleTimer::new(config.settle_delay))),
            hit_grid: Rc::new(RefCell::new(HitGrid::new(width, height))),
            sink: Rc::new(RefCell::new(sink)),
            clock: Rc::new(Cell::new(now)),
            frames: Rc::new(Cell::new(0)),
            stops: Vec::new(),
            running: true,
        };

        // Render first so geometry is published before anything measures it
        app.mount_render_effect(config.layout);
        app.mount_structure_effect();
        app.mount_pointer_effect();

        info!(width, height, "trace app mounted");
        Ok(app)
    }

    fn mount_render_effect(&mut self, style: ArrayLayoutStyle) {
        let array = self.session.array().state_signal();
        let pointers = self.session.pointers().signal();
        let pivot = self.session.pivot();
        let len = self.session.len();
        let width = self.width.clone();
        let height = self.height.clone();
        let cursor = self.cursor.clone();
        let geometry = self.geometry.clone();
        let mapper = self.mapper.clone();
        let hit_grid = self.hit_grid.clone();
        let sink = self.sink.clone();
        let frames = self.frames.clone();
        let mut laid_out_width = width.get();

        let stop = effect(move || {
            let (w, h) = (width.get(), height.get());
            let state = array.get();
            let markers = mapper.markers(pointers.get());
            let box_width = mapper.box_width();
            let cursor = cursor.get();

            if w != laid_out_width {
                match compute_array_layout(len, (0, ARRAY_TOP), w, &style) {
                    Ok(laid_out) => {
                        *geometry.borrow_mut() = laid_out;
                        laid_out_width = w;
                    }
                    Err(err) => warn!(%err, "layout failed, keeping previous geometry"),
                }
            }

            let values = state.values();
            let frame = {
                let geometry = geometry.borrow();
                build_frame(&FrameView {
                    width: w,
                    height: h,
                    values: &values,
                    selection: state.selection,
                    cursor,
                    markers: &markers,
                    box_width,
                    pivot,
                    geometry: &geometry,
                })
            };

            hit_grid.borrow_mut().apply_regions(w, h, &frame.hit_regions);
            if let Err(err) = sink.borrow_mut().present(&frame.buffer) {
                warn!(%err, "present failed");
            }
            frames.set(frames.get() + 1);
            trace!(frame = frames.get(), "frame presented");
        });
        self.stops.push(Box::new(stop));
    }

    fn mount_structure_effect(&mut self) {
        let array = self.session.array().state_signal();
        let pointers = self.session.pointers().clone();
        let mapper = self.mapper.clone();
        let settle = self.settle.clone();
        let clock = self.clock.clone();
        let mut last_ids: Option<Vec<ItemId>> = None;

        let stop = effect(move || {
            let ids = array.get().item_ids();
            // Selection-only updates keep the identity order
            if last_ids.as_ref() == Some(&ids) {
                return;
            }
            last_ids = Some(ids);

            mapper.remeasure(pointers.peek());
            settle.borrow_mut().schedule(clock.get());
            trace!("structure changed, settle scheduled");
        });
        self.stops.push(Box::new(stop));
    }

    fn mount_pointer_effect(&mut self) {
        let pointers = self.session.pointers().signal();
        let mapper = self.mapper.clone();

        let stop = effect(move || {
            mapper.refresh(pointers.get());
        });
        self.stops.push(Box::new(stop));
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn session(&self) -> &TraceSession {
        &self.session
    }

    pub fn mapper(&self) -> &LayoutMapper<GeometryHandle> {
        &self.mapper
    }

    /// Geometry published by the last layout pass.
    pub fn geometry(&self) -> ArrayGeometry {
        self.geometry.borrow().clone()
    }

    pub fn sink(&self) -> Ref<'_, S> {
        self.sink.borrow()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor.get()
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        (self.width.get(), self.height.get())
    }

    /// Number of frames presented so far.
    pub fn frame_count(&self) -> u64 {
        self.frames.get()
    }

    pub fn settle_pending(&self) -> bool {
        self.settle.borrow().is_pending()
    }

    /// What a click at cell `(x, y)` would hit.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<HitTarget> {
        self.hit_grid.borrow().get(x, y)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Apply a session action.
    pub fn apply(&mut self, action: Action) -> ActionOutcome {
        self.session.apply(action)
    }

    /// Handle one input event. Returns whether the app should keep running.
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> bool {
        self.clock.set(now);

        match event {
            InputEvent::Mouse(mouse) if mouse.is_left_press() => {
                let target = self.hit_test(mouse.x, mouse.y);
                match target {
                    Some(HitTarget::Box(index)) => {
                        self.apply(Action::ClickBox(index));
                    }
                    Some(HitTarget::Control(action)) => {
                        self.apply(action);
                    }
                    None => {}
                }
            }
            InputEvent::Key(key) => match command_for_key(&key) {
                Some(Command::Apply(action)) => {
                    self.apply(action);
                }
                Some(Command::CursorPrev) => self.move_cursor(-1),
                Some(Command::CursorNext) => self.move_cursor(1),
                Some(Command::ClickCursor) => {
                    if let Some(index) = self.cursor.get() {
                        self.apply(Action::ClickBox(index));
                    }
                }
                Some(Command::Quit) => {
                    debug!("quit requested");
                    self.running = false;
                }
                None => {}
            },
            InputEvent::Resize(width, height) => self.set_terminal_size(width, height),
            InputEvent::Mouse(_) | InputEvent::None => {}
        }

        self.running
    }

    fn move_cursor(&mut self, delta: isize) {
        let last = self.session.len().saturating_sub(1);
        let next = match self.cursor.get() {
            None => 0,
            Some(current) => current.saturating_add_signed(delta).min(last),
        };
        if self.cursor.get() != Some(next) {
            self.cursor.set(Some(next));
        }
    }

    /// New terminal size: relayout, redraw in full, remeasure every marker.
    pub fn set_terminal_size(&mut self, width: u16, height: u16) {
        if self.terminal_size() == (width, height) {
            return;
        }
        debug!(width, height, "terminal resized");
        self.sink.borrow_mut().invalidate();
        self.width.set(width);
        self.height.set(height);
        self.mapper.remeasure(self.session.pointers().peek());
    }

    /// Run the settle task if it is due.
    pub fn tick(&mut self, now: Instant) {
        self.clock.set(now);
        let due = self.settle.borrow_mut().fire(now);
        if due {
            self.mapper.remeasure(self.session.pointers().peek());
        }
    }

    /// How long the host may block waiting for input.
    pub fn next_timeout(&self, now: Instant, poll_interval: Duration) -> Duration {
        match self.settle.borrow().time_until(now) {
            Some(left) => left.min(poll_interval),
            None => poll_interval,
        }
    }

    /// Cancel the settle task and stop all effects. Safe to call twice.
    pub fn unmount(&mut self) {
        self.running = false;
        self.settle.borrow_mut().cancel();
        for stop in self.stops.drain(..) {
            stop();
        }
    }
}

impl<S: FrameSink + 'static> Drop for TraceApp<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

// =============================================================================
// Event Loop
// =============================================================================

/// Run the trainer in the terminal until the learner quits.
///
/// The terminal is restored before this returns, including on error.
pub fn run(config: TraceConfig) -> Result<()> {
    config.validate()?;

    let mut terminal = TerminalSetup::new();
    terminal.enter_fullscreen()?;

    let result = event_loop(&config);
    let restored = terminal.exit_fullscreen();

    result?;
    restored?;
    Ok(())
}

fn event_loop(config: &TraceConfig) -> Result<()> {
    let size = detect_terminal_size();
    let mut app = TraceApp::new(config, DiffRenderer::stdout(), size, Instant::now())?;

    while app.is_running() {
        let timeout = app.next_timeout(Instant::now(), config.poll_interval);
        if let Some(event) = poll_event(timeout)? {
            app.handle_input(event, Instant::now());
        }
        app.tick(Instant::now());
    }

    app.unmount();
    info!(frames = app.frame_count(), "trace app stopped");
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
