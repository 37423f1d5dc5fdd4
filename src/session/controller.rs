//! Session controller
//!
//! Owns every piece of per-session state and applies one [`SessionEvent`] at
//! a time. Each event that changes something triggers the same pipeline:
//!
//! 1. annotate stream flags from the local pin and shared metadata
//! 2. reorder the registry
//! 3. clamp the gallery page
//! 4. solve the layout (or keep the last plan while the viewport is unmeasured)
//! 5. publish a snapshot if the projection changed

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::layout::{
    DeviceClass, LayoutInput, LayoutMode, LayoutPlan, LayoutSolver, Paginator, Viewport,
};
use crate::order::StreamOrderer;
use crate::registry::{Source, StreamDescriptor, StreamId, StreamRegistry};
use crate::speaker::SpeakerTracker;

use super::event::SessionEvent;
use super::metadata::SharedMetadata;
use super::snapshot::SessionSnapshot;
use super::state::ModeState;

/// Single owner of a conference session's layout state
#[derive(Debug)]
pub struct SessionController {
    config: SessionConfig,
    device: DeviceClass,

    /// Whether `device` came from a measured width or the config
    device_decided: bool,

    registry: StreamRegistry,
    speakers: SpeakerTracker,
    orderer: StreamOrderer,
    solver: LayoutSolver,
    pages: Paginator,
    modes: ModeState,
    metadata: SharedMetadata,

    /// This participant's own pin; at most one at a time
    local_pin: Option<StreamId>,

    viewport: Viewport,

    /// Last successfully solved plan
    plan: Option<LayoutPlan>,

    /// Last published snapshot
    current: Arc<SessionSnapshot>,

    tx: broadcast::Sender<Arc<SessionSnapshot>>,
}

impl SessionController {
    /// Create a controller for a session
    ///
    /// The device class comes from the config or from the viewport width. If
    /// neither is known yet, the standard profile is used until the first
    /// measured resize decides it; after that it is kept for the life of the
    /// session. Fails with [`Error::InvalidCapacityConfig`] when a device
    /// profile the session may use has a zero speaker capacity.
    pub fn new(config: SessionConfig, viewport: Viewport) -> Result<Self> {
        let (device, device_decided) = match config.device_class {
            Some(class) => (class, true),
            None if viewport.is_measured() => (config.classify(viewport.width), true),
            None => (DeviceClass::default(), false),
        };

        if !device_decided {
            for class in [DeviceClass::Standard, DeviceClass::Constrained] {
                let capacity = config.profile(class).speaker_capacity;
                if capacity == 0 {
                    return Err(Error::InvalidCapacityConfig { capacity });
                }
            }
        }
        let profile = *config.profile(device);

        let speakers = SpeakerTracker::with_grace_window(
            profile.speaker_capacity,
            config.grace_window_duration(),
        )?;
        let (tx, _) = broadcast::channel(config.snapshot_capacity.max(1));
        let modes = ModeState::new(config.initial_mode);

        tracing::info!(
            device = ?device,
            device_decided = device_decided,
            width = viewport.width,
            height = viewport.height,
            mode = %config.initial_mode,
            speaker_capacity = profile.speaker_capacity,
            page_size = profile.page_size,
            "Session controller created"
        );

        let mut controller = Self {
            solver: LayoutSolver::new(&config),
            pages: Paginator::new(profile.page_size),
            current: Arc::new(SessionSnapshot::empty(config.initial_mode, device, viewport)),
            config,
            device,
            device_decided,
            registry: StreamRegistry::new(),
            speakers,
            orderer: StreamOrderer::new(),
            modes,
            metadata: SharedMetadata::default(),
            local_pin: None,
            viewport,
            plan: None,
            tx,
        };

        controller.relayout();
        controller.current = Arc::new(controller.build_snapshot(0));
        Ok(controller)
    }

    /// Register an observer for published snapshots
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<SessionSnapshot>> {
        self.tx.subscribe()
    }

    /// Latest snapshot
    pub fn snapshot(&self) -> Arc<SessionSnapshot> {
        Arc::clone(&self.current)
    }

    /// Session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Device class of the session
    ///
    /// Provisional until the first measured viewport unless forced by config.
    pub fn device(&self) -> DeviceClass {
        self.device
    }

    /// Mode being rendered
    pub fn mode(&self) -> LayoutMode {
        self.modes.active()
    }

    /// Mode the user selected
    pub fn selected_mode(&self) -> LayoutMode {
        self.modes.selected()
    }

    /// Last known viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Stream registry
    pub fn registry(&self) -> &StreamRegistry {
        &self.registry
    }

    /// Active speaker set
    pub fn speakers(&self) -> &SpeakerTracker {
        &self.speakers
    }

    /// Current layout plan
    pub fn plan(&self) -> Option<&LayoutPlan> {
        self.plan.as_ref()
    }

    /// Current gallery page (1-indexed)
    pub fn page(&self) -> usize {
        self.pages.page()
    }

    /// This participant's pinned stream
    pub fn local_pin(&self) -> Option<&StreamId> {
        self.local_pin.as_ref()
    }

    /// Shared metadata last received
    pub fn metadata(&self) -> &SharedMetadata {
        &self.metadata
    }

    /// Apply one event
    ///
    /// Events naming unknown streams are dropped. Returns whether a new
    /// snapshot was published.
    pub fn handle(&mut self, event: SessionEvent) -> bool {
        tracing::trace!(
            event = event.kind(),
            stream = event.stream_id().map(StreamId::as_str).unwrap_or("-"),
            "Handling event"
        );

        let dirty = match event {
            SessionEvent::StreamAvailable(desc) => self.on_stream_available(desc),
            SessionEvent::StreamRemoved { id } => self.on_stream_removed(&id),
            SessionEvent::VoiceActivity {
                id,
                level,
                timestamp,
            } => self.on_voice_activity(&id, level, timestamp),
            SessionEvent::SetPin { id, active } => self.on_set_pin(&id, active),
            SessionEvent::SetFullscreen { id, active } => self.on_set_fullscreen(&id, active),
            SessionEvent::FullscreenExited => self.registry.clear_fullscreen(),
            SessionEvent::ViewportResize { width, height } => {
                self.on_viewport_resize(Viewport::new(width, height))
            }
            SessionEvent::LayoutModeChange { mode } => self.on_mode_change(mode),
            SessionEvent::PageChange { page } => self.pages.set_page(page, self.registry.len()),
            SessionEvent::MetadataChanged(metadata) => self.on_metadata(metadata),
        };

        if !dirty {
            return false;
        }
        self.relayout();
        self.publish()
    }

    /// Drive the controller from a channel until shutdown
    ///
    /// Events are applied strictly one at a time. Returns when `shutdown`
    /// resolves or every sender has been dropped.
    pub async fn run_until<F>(&mut self, mut events: mpsc::Receiver<SessionEvent>, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        tracing::info!(device = ?self.device, "Session controller running");

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutdown signal received");
                    break;
                }
                event = events.recv() => match event {
                    Some(event) => {
                        self.handle(event);
                    }
                    None => {
                        tracing::debug!("Event channel closed");
                        break;
                    }
                },
            }
        }

        tracing::info!(revision = self.current.revision, "Session controller stopped");
    }

    /// Drive the controller until every sender has been dropped
    pub async fn run(&mut self, events: mpsc::Receiver<SessionEvent>) {
        self.run_until(events, std::future::pending::<()>()).await
    }

    /// Drop an event that failed locally
    fn absorb(&self, err: Error, event: &'static str) -> bool {
        if err.is_absorbable() {
            tracing::debug!(error = %err, event = event, "Event ignored");
        } else {
            tracing::warn!(error = %err, event = event, "Event rejected");
        }
        false
    }

    fn on_stream_available(&mut self, desc: StreamDescriptor) -> bool {
        let is_screen = desc.source == Source::Screen;
        if let Err(err) = self.registry.try_add(desc) {
            return self.absorb(err.into(), "stream_available");
        }

        if is_screen && self.modes.on_screen_added() {
            tracing::info!(
                selected = %self.modes.selected(),
                "Screen share started, switching to presentation"
            );
        }
        true
    }

    fn on_stream_removed(&mut self, id: &StreamId) -> bool {
        let Some(stream) = self.registry.remove(id) else {
            return self.absorb(Error::InvalidStreamReference(id.clone()), "stream_removed");
        };

        if self.speakers.remove(id) {
            tracing::debug!(stream = %id, "Removed stream left the speaker set");
        }
        if self.local_pin.as_ref() == Some(id) {
            self.local_pin = None;
        }

        if stream.is_screen() && !self.registry.has_screen() && self.modes.on_screen_gone() {
            tracing::info!(
                mode = %self.modes.active(),
                "Last screen share ended, restoring selected mode"
            );
        }
        true
    }

    fn on_voice_activity(&mut self, id: &StreamId, level: f32, now: u64) -> bool {
        let source = match self.registry.record_voice(id, level, now) {
            Ok(source) => source,
            Err(err) => return self.absorb(err.into(), "voice_activity"),
        };

        // Level updates alone do not republish; only membership moves tiles.
        self.speakers
            .on_voice_activity(id, source, level, now)
            .is_change()
    }

    fn on_set_pin(&mut self, id: &StreamId, active: bool) -> bool {
        if !self.registry.contains(id) {
            return self.absorb(Error::InvalidStreamReference(id.clone()), "set_pin");
        }

        let pinned = self.local_pin.as_ref() == Some(id);
        match (active, pinned) {
            (true, false) => {
                // Pinning another stream replaces the previous local pin.
                self.local_pin = Some(id.clone());
                tracing::debug!(stream = %id, "Stream pinned");
                true
            }
            (false, true) => {
                self.local_pin = None;
                tracing::debug!(stream = %id, "Stream unpinned");
                true
            }
            _ => false,
        }
    }

    fn on_set_fullscreen(&mut self, id: &StreamId, active: bool) -> bool {
        match self.registry.set_fullscreen(id, active) {
            Ok(changed) => changed,
            Err(err) => self.absorb(err.into(), "set_fullscreen"),
        }
    }

    fn on_viewport_resize(&mut self, viewport: Viewport) -> bool {
        if viewport == self.viewport {
            return false;
        }
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            "Viewport resized"
        );
        self.viewport = viewport;

        if !self.device_decided && viewport.is_measured() {
            self.decide_device();
        }
        true
    }

    /// Settle the device class from the first measured width
    fn decide_device(&mut self) {
        let device = self.config.classify(self.viewport.width);
        let profile = *self.config.profile(device);
        self.device_decided = true;

        if device != self.device {
            match self.speakers.set_capacity(profile.speaker_capacity) {
                Ok(evicted) => {
                    for id in evicted {
                        tracing::debug!(stream = %id, "Speaker evicted by capacity change");
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Keeping provisional speaker capacity");
                }
            }

            let mut pages = Paginator::new(profile.page_size);
            pages.set_page(self.pages.page(), self.registry.len());
            self.pages = pages;
            self.device = device;
        }

        tracing::info!(
            device = ?self.device,
            width = self.viewport.width,
            speaker_capacity = self.speakers.capacity(),
            page_size = self.pages.page_size(),
            "Device class decided"
        );
    }

    fn on_mode_change(&mut self, mode: LayoutMode) -> bool {
        let changed = self.modes.select(mode, self.registry.has_screen());
        if changed {
            tracing::info!(
                selected = %self.modes.selected(),
                active = %self.modes.active(),
                "Layout mode changed"
            );
        }
        changed
    }

    fn on_metadata(&mut self, metadata: SharedMetadata) -> bool {
        if metadata == self.metadata {
            return false;
        }
        self.metadata = metadata;
        true
    }

    /// Annotate, reorder, paginate and solve
    fn relayout(&mut self) {
        self.registry
            .annotate(|stream| self.metadata.annotate(stream, self.local_pin.as_ref()));

        let orderer = self.orderer;
        let speakers = &self.speakers;
        self.registry
            .reorder(|streams| orderer.sort(streams, speakers));

        let total = self.registry.len();
        if self.pages.clamp(total) {
            tracing::debug!(page = self.pages.page(), "Page clamped");
        }

        let input = LayoutInput {
            streams: self.registry.streams(),
            active: self.modes.active(),
            selected: self.modes.selected(),
            viewport: self.viewport,
            device: self.device,
            pinned_count: self.metadata.pinned_count(),
            page: self.pages.range(total),
        };

        match self.solver.solve(&input) {
            Ok(plan) => self.plan = Some(plan),
            Err(err) => {
                tracing::warn!(error = %err, "Keeping previous layout");
                let registry = &self.registry;
                if let Some(plan) = self.plan.as_mut() {
                    plan.retain_streams(|id| registry.contains(id));
                }
            }
        }
    }

    fn build_snapshot(&self, revision: u64) -> SessionSnapshot {
        SessionSnapshot {
            revision,
            streams: self.registry.streams().to_vec(),
            active_speakers: self.speakers.member_ids(),
            mode: self.modes.active(),
            selected_mode: self.modes.selected(),
            device: self.device,
            viewport: self.viewport,
            layout: self.plan.clone(),
            page: self.pages.page(),
            page_count: self.pages.page_count(self.registry.len()),
        }
    }

    /// Publish a snapshot if anything visible changed
    fn publish(&mut self) -> bool {
        let next = self.build_snapshot(self.current.revision + 1);
        if next.same_content(&self.current) {
            return false;
        }

        let snapshot = Arc::new(next);
        self.current = Arc::clone(&snapshot);
        let receivers = self.tx.send(snapshot).unwrap_or(0);
        tracing::trace!(
            revision = self.current.revision,
            receivers = receivers,
            "Snapshot published"
        );
        true
    }
}
