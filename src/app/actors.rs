/// Redraw bookkeeping for the terminal surface.
pub(crate) struct UiActor {
    needs_redraw: bool,
    notification_drawn: bool,
}

impl UiActor {
    pub(crate) fn new() -> Self {
        Self {
            needs_redraw: true,
            notification_drawn: false,
        }
    }

    pub(crate) fn mark_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub(crate) fn clear_redraw(&mut self) {
        self.needs_redraw = false;
    }

    pub(crate) fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Animation frames are only needed while something on screen moves or a
    /// toast is about to appear or disappear.
    pub(crate) fn on_redraw_tick(
        &mut self,
        overlay_visible: bool,
        notification_visible: bool,
    ) {
        if overlay_visible || notification_visible != self.notification_drawn {
            self.needs_redraw = true;
        }
        self.notification_drawn = notification_visible;
    }
}
