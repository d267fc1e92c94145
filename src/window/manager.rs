use slotmap::SlotMap;

use super::context::WindowContext;
use super::grab::GrabState;
use super::{Capabilities, FrameType, ScreenId, WindowId, WindowType};
use crate::config::EngineConfig;
use crate::drivers::{Platform, SurfaceSpec};
use crate::error::{PeerResult, WmError};
use crate::peer::{Command, CommandQueue, ViewPeer, WindowPeer};

/// Parameters for [`WindowManager::create`].
pub struct CreateParams {
    pub owner: Option<WindowId>,
    pub screen: ScreenId,
    pub frame_type: FrameType,
    pub window_type: WindowType,
    pub capabilities: Capabilities,
    pub peer: Option<Box<dyn WindowPeer>>,
}

impl CreateParams {
    pub fn new(frame_type: FrameType) -> Self {
        Self {
            owner: None,
            screen: ScreenId::default(),
            frame_type,
            window_type: WindowType::Normal,
            capabilities: Capabilities::CLOSABLE,
            peer: None,
        }
    }

    pub fn owner(mut self, owner: WindowId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn window_type(mut self, window_type: WindowType) -> Self {
        self.window_type = window_type;
        self
    }

    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn screen(mut self, screen: ScreenId) -> Self {
        self.screen = screen;
        self
    }

    pub fn peer(mut self, peer: impl WindowPeer + 'static) -> Self {
        self.peer = Some(Box::new(peer));
        self
    }
}

impl std::fmt::Debug for CreateParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateParams")
            .field("owner", &self.owner)
            .field("screen", &self.screen)
            .field("frame_type", &self.frame_type)
            .field("window_type", &self.window_type)
            .field("capabilities", &self.capabilities)
            .field("has_peer", &self.peer.is_some())
            .finish()
    }
}

/// Owns every window context, the grab slots and the platform backend.
///
/// One manager is one independent grab arena: two managers never see each
/// other's grab or drag holder.
pub struct WindowManager<P: Platform> {
    pub(super) windows: SlotMap<WindowId, WindowContext>,
    pub(super) grab: GrabState,
    pub(super) platform: P,
    pub(super) commands: CommandQueue,
    pub(super) config: EngineConfig,
    draining: bool,
}

impl<P: Platform> WindowManager<P> {
    pub fn new(platform: P) -> Self {
        Self::with_config(platform, EngineConfig::default())
    }

    pub fn with_config(platform: P, config: EngineConfig) -> Self {
        Self {
            windows: SlotMap::with_key(),
            grab: GrabState::default(),
            platform,
            commands: CommandQueue::new(),
            config,
            draining: false,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Handle peers can keep to request commands while being notified.
    pub fn command_queue(&self) -> CommandQueue {
        self.commands.clone()
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(id)
    }

    pub fn context(&self, id: WindowId) -> Option<&WindowContext> {
        self.windows.get(id)
    }

    pub fn window_ids(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.windows.keys()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Creates a window context and its native surface.
    pub fn create(&mut self, params: CreateParams) -> Result<WindowId, WmError> {
        if let Some(owner) = params.owner {
            self.live(owner)?;
        }
        let ctx = WindowContext::new(
            params.peer,
            params.screen,
            params.frame_type,
            params.window_type,
            params.capabilities,
        );
        let id = self.windows.insert(ctx);

        let titled = params.frame_type == FrameType::Titled;
        let spec = SurfaceSpec {
            popup: params.window_type == WindowType::Popup,
            utility: params.window_type == WindowType::Utility,
            frame_type: params.frame_type,
            header_bar: titled,
            closable: titled && params.capabilities.contains(Capabilities::CLOSABLE),
            decorated: titled,
        };
        self.platform.create_surface(id, &spec);

        if let Some(owner) = params.owner {
            self.attach_child(owner, id);
            if self.on_top_inherited(id) {
                if let Some(ctx) = self.windows.get_mut(id) {
                    ctx.kept_above = true;
                }
                self.platform.set_keep_above(id, true);
            }
        }

        tracing::debug!(
            window_id = ?id,
            owner = ?params.owner,
            frame_type = ?params.frame_type,
            window_type = ?params.window_type,
            "created window"
        );
        Ok(id)
    }

    /// Context that is still accepting operations.
    pub(super) fn live(&self, id: WindowId) -> Result<&WindowContext, WmError> {
        match self.windows.get(id) {
            None => Err(WmError::UnknownWindow(id)),
            Some(ctx) if ctx.destroy_pending => Err(WmError::WindowDestroyed(id)),
            Some(ctx) => Ok(ctx),
        }
    }

    pub(super) fn live_mut(&mut self, id: WindowId) -> Result<&mut WindowContext, WmError> {
        match self.windows.get_mut(id) {
            None => Err(WmError::UnknownWindow(id)),
            Some(ctx) if ctx.destroy_pending => Err(WmError::WindowDestroyed(id)),
            Some(ctx) => Ok(ctx),
        }
    }

    /// Calls the window peer of `id`, if it has one. Failures are logged and
    /// swallowed.
    pub(super) fn notify_window(
        &mut self,
        id: WindowId,
        callback: &'static str,
        f: impl FnOnce(&mut dyn WindowPeer) -> PeerResult,
    ) {
        let Some(peer) = self
            .windows
            .get_mut(id)
            .and_then(|ctx| ctx.window_peer.as_deref_mut())
        else {
            tracing::trace!(window_id = ?id, callback, "no window peer");
            return;
        };
        if let Err(err) = f(peer) {
            tracing::warn!(window_id = ?id, callback, error = %err, "window peer callback failed");
        }
        self.after_notify();
    }

    /// Calls the view peer of `id`, if it has one.
    pub(super) fn notify_view(
        &mut self,
        id: WindowId,
        callback: &'static str,
        f: impl FnOnce(&mut dyn ViewPeer) -> PeerResult,
    ) {
        let Some(peer) = self
            .windows
            .get_mut(id)
            .and_then(|ctx| ctx.view_peer.as_deref_mut())
        else {
            tracing::trace!(window_id = ?id, callback, "no view peer");
            return;
        };
        if let Err(err) = f(peer) {
            tracing::warn!(window_id = ?id, callback, error = %err, "view peer callback failed");
        }
        self.after_notify();
    }

    fn after_notify(&mut self) {
        if self.config.run_peer_commands {
            self.run_commands();
        }
    }

    /// Runs every command peers have queued so far.
    ///
    /// Commands queued while this runs are picked up by the same pass.
    pub fn run_commands(&mut self) {
        if self.draining {
            return;
        }
        self.draining = true;
        while let Some(command) = self.commands.pop() {
            if let Err(err) = self.run_command(command.clone()) {
                tracing::warn!(?command, error = %err, "peer command failed");
            }
        }
        self.draining = false;
    }

    pub fn run_command(&mut self, command: Command) -> Result<(), WmError> {
        tracing::trace!(?command, "running command");
        match command {
            Command::Destroy(id) => self.destroy(id),
            Command::SetVisible(id, visible) => self.set_visible(id, visible),
            Command::SetEnabled(id, enabled) => self.set_enabled(id, enabled),
            Command::SetLevel(id, level) => self.set_level(id, level),
            Command::RequestFocus(id) => self.request_focus(id),
            Command::GrabFocus(id) => self.grab_focus(id).map(|_| ()),
            Command::UngrabFocus(id) => self.ungrab_focus(id),
            Command::ToFront(id) => self.to_front(id),
            Command::ToBack(id) => self.to_back(id),
        }
    }
}

impl<P: Platform> std::fmt::Debug for WindowManager<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowManager")
            .field("windows", &self.windows.len())
            .field("grab", &self.grab)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
