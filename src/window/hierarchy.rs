use super::{Level, WindowId, WindowManager};
use crate::drivers::Platform;
use crate::error::WmError;

impl<P: Platform> WindowManager<P> {
    pub fn owner(&self, id: WindowId) -> Option<WindowId> {
        self.windows.get(id).and_then(|ctx| ctx.owner)
    }

    pub fn children(&self, id: WindowId) -> Vec<WindowId> {
        self.windows
            .get(id)
            .map(|ctx| ctx.children().collect())
            .unwrap_or_default()
    }

    /// Makes `child` transient for `parent`, moving it out of its previous
    /// owner's children first.
    pub fn add_child(&mut self, parent: WindowId, child: WindowId) -> Result<(), WmError> {
        if parent == child {
            return Err(WmError::SelfOwnership(child));
        }
        self.live(parent)?;
        self.live(child)?;
        if self.is_ancestor(child, parent) {
            return Err(WmError::HierarchyCycle { parent, child });
        }
        self.attach_child(parent, child);
        self.refresh_inherited_on_top(child);
        Ok(())
    }

    pub fn remove_child(&mut self, parent: WindowId, child: WindowId) -> Result<(), WmError> {
        let removed = self.live_mut(parent)?.children.remove(&child);
        let owned = match self.windows.get_mut(child) {
            Some(child_ctx) if child_ctx.owner == Some(parent) => {
                child_ctx.owner = None;
                true
            }
            _ => false,
        };
        if removed || owned {
            self.platform.set_transient_for(child, None);
            tracing::debug!(parent = ?parent, child = ?child, "removed child window");
            self.refresh_inherited_on_top(child);
        }
        Ok(())
    }

    /// Changes the owner of `id`; `None` detaches it from its current owner.
    pub fn set_owner(&mut self, id: WindowId, owner: Option<WindowId>) -> Result<(), WmError> {
        match owner {
            Some(owner) => self.add_child(owner, id),
            None => match self.live(id)?.owner {
                Some(current) => self.remove_child(current, id),
                None => Ok(()),
            },
        }
    }

    pub(super) fn attach_child(&mut self, parent: WindowId, child: WindowId) {
        let previous = self.windows.get(child).and_then(|ctx| ctx.owner);
        if let Some(previous) = previous
            && previous != parent
            && let Some(previous_ctx) = self.windows.get_mut(previous)
        {
            previous_ctx.children.remove(&child);
        }
        if let Some(child_ctx) = self.windows.get_mut(child) {
            child_ctx.owner = Some(parent);
        }
        if let Some(parent_ctx) = self.windows.get_mut(parent) {
            parent_ctx.children.insert(child);
        }
        self.platform.set_transient_for(child, Some(parent));
        tracing::debug!(parent = ?parent, child = ?child, "attached child window");
    }

    /// Re-applies keep-above to `id` and its descendants after its owner
    /// chain changed. Dying windows are skipped.
    pub(super) fn refresh_inherited_on_top(&mut self, id: WindowId) {
        if self.live(id).is_err() {
            return;
        }
        let inherited = self.on_top_inherited(id);
        self.update_ontop_tree(id, inherited);
    }

    /// Whether `candidate` appears on the owner chain of `id`, or is `id`.
    fn is_ancestor(&self, candidate: WindowId, id: WindowId) -> bool {
        let mut current = Some(id);
        while let Some(window) = current {
            if window == candidate {
                return true;
            }
            current = self.owner(window);
        }
        false
    }

    /// True if any owner up the chain has its own on-top flag set.
    pub fn on_top_inherited(&self, id: WindowId) -> bool {
        let mut current = self.owner(id);
        while let Some(owner) = current {
            match self.windows.get(owner) {
                Some(ctx) if ctx.flags.on_top() => return true,
                Some(ctx) => current = ctx.owner,
                None => break,
            }
        }
        false
    }

    /// Own on-top flag OR'd with every ancestor's.
    pub fn effective_on_top(&self, id: WindowId) -> bool {
        self.windows
            .get(id)
            .is_some_and(|ctx| ctx.flags.on_top())
            || self.on_top_inherited(id)
    }

    /// Keep-above state last applied to the native surface of `id`.
    pub fn kept_above(&self, id: WindowId) -> bool {
        self.windows.get(id).is_some_and(|ctx| ctx.kept_above)
    }

    /// Applies `on_top || own flag` to the surface and pushes the result
    /// down to every descendant.
    pub fn update_ontop_tree(&mut self, id: WindowId, on_top: bool) {
        let Some(ctx) = self.windows.get_mut(id) else {
            return;
        };
        let effective = on_top || ctx.flags.on_top();
        ctx.kept_above = effective;
        let children: Vec<WindowId> = ctx.children().collect();
        self.platform.set_keep_above(id, effective);
        for child in children {
            self.update_ontop_tree(child, effective);
        }
    }

    pub fn set_level(&mut self, id: WindowId, level: Level) -> Result<(), WmError> {
        let on_top = level.is_on_top();
        self.live_mut(id)?.flags.set_on_top(on_top);
        // descendants of an on-top window stay above whatever they ask for
        if !self.on_top_inherited(id) {
            self.update_ontop_tree(id, on_top);
        }
        Ok(())
    }

    /// Handles a native keep-above change.
    ///
    /// Changes that only mirror inherited state are not reported. A user
    /// trying to drop keep-above on a window that inherits it gets the hint
    /// re-asserted instead.
    pub(super) fn notify_on_top(&mut self, id: WindowId, top: bool) {
        let has_peer = self.windows.get(id).is_some_and(|ctx| ctx.has_window_peer());
        if top == self.effective_on_top(id) || !has_peer {
            return;
        }
        if self.on_top_inherited(id) && !top {
            if let Some(ctx) = self.windows.get_mut(id) {
                ctx.kept_above = true;
            }
            self.platform.set_keep_above(id, true);
            return;
        }
        if let Some(ctx) = self.windows.get_mut(id) {
            ctx.flags.set_on_top(top);
        }
        self.update_ontop_tree(id, top);
        let level = if top { Level::Floating } else { Level::Normal };
        self.notify_window(id, "notify_level_changed", |peer| {
            peer.notify_level_changed(level)
        });
    }

    /// Minimizes or restores every descendant of `id`.
    pub fn show_or_hide_children(&mut self, id: WindowId, show: bool) -> Result<(), WmError> {
        let children: Vec<WindowId> = self.live(id)?.children().collect();
        for child in children {
            self.set_minimized(child, !show)?;
            self.show_or_hide_children(child, show)?;
        }
        Ok(())
    }
}
