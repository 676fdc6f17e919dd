//! The panel lifecycle: visibility, surfaces, deferrals, and event routing.

use crate::applier::{self, Applied};
use crate::error::PanelError;
use crate::host::Host;
use crate::options::{ConfigError, PanelOptions};
use crate::resolver::{self, DeleteOutcome};
use crate::schedule::{DeferredTask, Deferrals};
use crate::sections::Sections;
use crate::serializer::{self, Target};
use crate::snapshot::Snapshot;
use bus::{HostEvent, PanelCommand};
use core_types::SurfaceKind;
use std::sync::mpsc::Receiver;
use std::time::Duration;
use text_surface::{BufferSurface, SurfaceFactory, SurfaceSlot, TextSurface};

/// Markup and style editing panel bound to one host.
///
/// Single-threaded: every method runs on the caller's event loop. Time only moves
/// through [`show`](Self::show) and [`pump`](Self::pump); deferred work runs from
/// `pump` once due.
pub struct CodePanel<H, F> {
    host: H,
    factory: F,
    options: PanelOptions,
    visible: bool,
    disposed: bool,
    now: Duration,
    target: Option<Target>,
    markup: SurfaceSlot,
    style: SurfaceSlot,
    markup_snapshot: Snapshot,
    style_snapshot: Snapshot,
    sections: Sections,
    deferrals: Deferrals,
    events: Option<Receiver<HostEvent>>,
}

impl<H: Host, F: SurfaceFactory> CodePanel<H, F> {
    pub fn new(host: H, factory: F, options: PanelOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(CodePanel {
            host,
            factory,
            options,
            visible: false,
            disposed: false,
            now: Duration::ZERO,
            target: None,
            markup: SurfaceSlot::new(),
            style: SurfaceSlot::new(),
            markup_snapshot: Snapshot::new(),
            style_snapshot: Snapshot::new(),
            sections: Sections::default(),
            deferrals: Deferrals::new(),
            events: None,
        })
    }

    /// Subscribe to host notifications. They are handled by [`pump`](Self::pump).
    pub fn attach_events(&mut self, events: Receiver<HostEvent>) {
        if !self.disposed {
            self.events = Some(events);
        }
    }

    pub fn show(&mut self, now: Duration) -> Result<(), PanelError> {
        self.ensure_not_disposed()?;
        self.now = now;
        self.visible = true;
        if !self.options.preserve_width {
            self.host.resize_panel(&self.options.open_state);
        }
        if !self.markup.is_live() || !self.style.is_live() {
            self.deferrals
                .schedule(now, self.options.init_delay(), DeferredTask::InitSurfaces);
        }
        self.refresh_contents()?;
        self.deferrals
            .schedule(now, self.options.refresh_delay(), DeferredTask::MeasureSurfaces);
        Ok(())
    }

    pub fn hide(&mut self) {
        if self.disposed {
            return;
        }
        self.visible = false;
        if !self.options.preserve_width {
            self.host.resize_panel(&self.options.closed_state);
        }
    }

    /// Re-measure live surfaces.
    pub fn refresh(&mut self) {
        self.markup.request_measure();
        self.style.request_measure();
    }

    /// Serialize the selected component into the surfaces. Returns whether a
    /// component was read; hidden panels read nothing.
    pub fn refresh_contents(&mut self) -> Result<bool, PanelError> {
        self.ensure_not_disposed()?;
        if !self.visible {
            log::trace!(target: "codepanel.panel", "hidden, skipping refresh");
            return Ok(false);
        }
        let Some(view) = serializer::serialize(&mut self.host, &self.options)? else {
            // Surfaces keep their text, but nothing is applied to a component
            // that is no longer selected.
            self.target = None;
            return Ok(false);
        };
        self.target = Some(view.target);
        self.markup.set_content(&html::format_markup(&view.markup));
        self.style.set_content(&css::format_style(&view.style));
        Ok(true)
    }

    pub fn apply_markup(&mut self) -> Result<Option<Applied>, PanelError> {
        self.ensure_not_disposed()?;
        let target = self.target.ok_or(PanelError::NoSelection)?;
        let markup = self.markup.content().unwrap_or_default();
        let style = self.style.content().unwrap_or_default();
        let applied = applier::apply_markup(
            &mut self.host,
            target,
            markup,
            style,
            &mut self.markup_snapshot,
        )?;
        if let Some(applied) = &applied {
            self.target = Some(applied.target);
        }
        Ok(applied)
    }

    pub fn apply_style(&mut self) -> Result<Option<String>, PanelError> {
        self.ensure_not_disposed()?;
        let style = self.style.content().unwrap_or_default();
        Ok(applier::apply_style(
            &mut self.host,
            style,
            &mut self.style_snapshot,
        )?)
    }

    /// Delete the style surface's selection and the rules it names. `Ok(None)`
    /// when deletion is disabled or the style surface is not live yet.
    pub fn delete_selection(&mut self) -> Result<Option<DeleteOutcome>, PanelError> {
        self.ensure_not_disposed()?;
        if !self.options.clean_css_btn {
            return Ok(None);
        }
        let Some(surface) = self.style.live_mut() else {
            return Ok(None);
        };
        Ok(Some(resolver::delete_selection(&mut self.host, surface)?))
    }

    pub fn toggle_section(&mut self, clicked: SurfaceKind) -> SurfaceKind {
        let active = self.sections.toggle(clicked);
        if !self.disposed {
            self.deferrals.schedule(
                self.now,
                self.options.section_toggle_delay(),
                DeferredTask::MeasureSurfaces,
            );
        }
        active
    }

    /// Tear down. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.visible = false;
        self.events = None;
        self.deferrals.cancel_all();
        self.markup.destroy_live();
        self.style.destroy_live();
        self.markup.clear_pending();
        self.style.clear_pending();
        self.target = None;
        log::debug!(target: "codepanel.panel", "disposed");
    }

    pub fn handle_event(&mut self, event: HostEvent) -> Result<(), PanelError> {
        if self.disposed {
            return Ok(());
        }
        log::trace!(target: "codepanel.panel", "event {event:?}");
        match event {
            HostEvent::SelectionChanged { .. } | HostEvent::ComponentUpdated { .. } => {
                self.refresh_contents()?;
            }
            HostEvent::PreviewStopped => {
                if self.visible && !self.options.preserve_width {
                    self.host.resize_panel(&self.options.open_state);
                }
            }
        }
        Ok(())
    }

    pub fn handle_command(&mut self, command: PanelCommand) -> Result<(), PanelError> {
        log::trace!(target: "codepanel.panel", "command {command:?}");
        match command {
            PanelCommand::Show => self.show(self.now)?,
            PanelCommand::Hide => self.hide(),
            PanelCommand::Refresh => self.refresh(),
            PanelCommand::ApplyMarkup => {
                self.apply_markup()?;
            }
            PanelCommand::ApplyStyle => {
                self.apply_style()?;
            }
            PanelCommand::DeleteSelection => {
                self.delete_selection()?;
            }
            PanelCommand::ToggleSection(kind) => {
                self.toggle_section(kind);
            }
            PanelCommand::Dispose => self.dispose(),
        }
        Ok(())
    }

    /// Advance the clock to `now`, handle queued host events, then run due
    /// deferrals. Returns the number of events handled.
    pub fn pump(&mut self, now: Duration) -> Result<usize, PanelError> {
        if self.disposed {
            return Ok(0);
        }
        self.now = self.now.max(now);
        let events: Vec<HostEvent> = match &self.events {
            Some(rx) => rx.try_iter().collect(),
            None => Vec::new(),
        };
        let handled = events.len();
        for event in events {
            self.handle_event(event)?;
        }
        for task in self.deferrals.take_due(self.now) {
            self.run_task(task);
        }
        Ok(handled)
    }

    fn run_task(&mut self, task: DeferredTask) {
        if self.disposed {
            return;
        }
        match task {
            DeferredTask::InitSurfaces => self.init_surfaces(),
            DeferredTask::MeasureSurfaces => self.refresh(),
        }
    }

    /// Create surfaces for pending slots; a failed factory falls back to a plain
    /// buffer. Live slots are left alone.
    pub fn init_surfaces(&mut self) {
        for kind in SurfaceKind::ALL {
            let slot = match kind {
                SurfaceKind::Markup => &mut self.markup,
                SurfaceKind::Style => &mut self.style,
            };
            if !matches!(slot, SurfaceSlot::Pending(_)) {
                continue;
            }
            let surface: Box<dyn TextSurface> = match self.factory.create(kind) {
                Ok(surface) => surface,
                Err(err) => {
                    log::warn!(
                        target: "codepanel.surface",
                        "{kind} surface unavailable ({err}), using plain buffer"
                    );
                    Box::new(BufferSurface::new())
                }
            };
            slot.attach(surface);
        }
    }

    fn ensure_not_disposed(&self) -> Result<(), PanelError> {
        if self.disposed {
            return Err(PanelError::Disposed);
        }
        Ok(())
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn target(&self) -> Option<Target> {
        self.target
    }

    pub fn active_section(&self) -> SurfaceKind {
        self.sections.active()
    }

    pub fn slot(&self, kind: SurfaceKind) -> &SurfaceSlot {
        match kind {
            SurfaceKind::Markup => &self.markup,
            SurfaceKind::Style => &self.style,
        }
    }

    /// Current text of a surface, staged or live.
    pub fn content(&self, kind: SurfaceKind) -> Option<&str> {
        self.slot(kind).content()
    }

    pub fn surface_mut(&mut self, kind: SurfaceKind) -> Option<&mut (dyn TextSurface + 'static)> {
        match kind {
            SurfaceKind::Markup => self.markup.live_mut(),
            SurfaceKind::Style => self.style.live_mut(),
        }
    }

    pub fn snapshot(&self, kind: SurfaceKind) -> &Snapshot {
        match kind {
            SurfaceKind::Markup => &self.markup_snapshot,
            SurfaceKind::Style => &self.style_snapshot,
        }
    }

    pub fn deferrals(&self) -> &Deferrals {
        &self.deferrals
    }

    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostOp;
    use crate::test_host::{Call, RecordingHost};
    use core_types::ComponentId;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::mpsc::channel;
    use text_surface::{SelectionRange, SurfaceError};

    /// Hands out buffer surfaces, or fails for the kinds listed in `broken`.
    #[derive(Default)]
    struct TestFactory {
        broken: Vec<SurfaceKind>,
        created: Rc<Cell<u32>>,
    }

    impl SurfaceFactory for TestFactory {
        fn create(&mut self, kind: SurfaceKind) -> Result<Box<dyn TextSurface>, SurfaceError> {
            if self.broken.contains(&kind) {
                return Err(SurfaceError::Unavailable(format!("no {kind} widget")));
            }
            self.created.set(self.created.get() + 1);
            Ok(Box::new(BufferSurface::new()))
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn panel_with(host: RecordingHost) -> CodePanel<RecordingHost, TestFactory> {
        CodePanel::new(host, TestFactory::default(), PanelOptions::default()).unwrap()
    }

    fn shown_panel() -> CodePanel<RecordingHost, TestFactory> {
        let mut host = RecordingHost::with_component("<p>x</p>");
        host.style = "#c{color:red;}.d{top:0;}".to_string();
        let mut panel = panel_with(host);
        panel.show(ms(0)).unwrap();
        panel.pump(ms(500)).unwrap();
        panel
    }

    #[test]
    fn show_stages_formatted_content_then_flushes_it() {
        let mut host = RecordingHost::with_component("<p>x</p>");
        host.style = "#c{color:red;}".to_string();
        let mut panel = panel_with(host);
        panel.show(ms(0)).unwrap();

        assert!(panel.is_visible());
        assert!(!panel.slot(SurfaceKind::Markup).is_live());
        assert_eq!(
            panel.content(SurfaceKind::Markup),
            Some("<div class=\"box\">\n  <p>x</p>\n</div>")
        );
        assert_eq!(panel.content(SurfaceKind::Style), Some("#c {\n  color:red;\n}"));

        panel.pump(ms(100)).unwrap();
        assert!(panel.slot(SurfaceKind::Markup).is_live());
        assert!(panel.slot(SurfaceKind::Style).is_live());
        assert_eq!(panel.content(SurfaceKind::Style), Some("#c {\n  color:red;\n}"));
        assert!(panel.host().calls().contains(&Call::Resize(panel.options().open_state.clone())));
    }

    #[test]
    fn hidden_panel_does_not_touch_surfaces() {
        let mut panel = shown_panel();
        panel.hide();
        panel.host_mut().inner = "<p>changed</p>".to_string();
        panel.host().clear_calls();

        assert_eq!(panel.refresh_contents(), Ok(false));
        panel.handle_event(HostEvent::ComponentUpdated { id: ComponentId(1) }).unwrap();
        assert!(panel.content(SurfaceKind::Markup).is_some_and(|m| !m.contains("changed")));
        assert!(panel.host().calls().is_empty());
    }

    #[test]
    fn factory_failure_falls_back_to_buffer() {
        let factory = TestFactory {
            broken: vec![SurfaceKind::Style],
            ..TestFactory::default()
        };
        let created = factory.created.clone();
        let mut host = RecordingHost::with_component("x");
        host.style = "#c{color:red;}".to_string();
        let mut panel = CodePanel::new(host, factory, PanelOptions::default()).unwrap();
        panel.show(ms(0)).unwrap();
        panel.pump(ms(100)).unwrap();

        assert_eq!(created.get(), 1);
        assert!(panel.slot(SurfaceKind::Style).is_live());
        assert_eq!(panel.content(SurfaceKind::Style), Some("#c {\n  color:red;\n}"));
    }

    #[test]
    fn showing_again_does_not_recreate_surfaces() {
        let mut panel = shown_panel();
        let created = panel.factory.created.clone();
        assert_eq!(created.get(), 2);
        panel.hide();
        panel.show(ms(1_000)).unwrap();
        panel.pump(ms(2_000)).unwrap();
        panel.init_surfaces();
        assert_eq!(created.get(), 2);
    }

    #[test]
    fn apply_markup_twice_mutates_once() {
        let mut panel = shown_panel();
        panel.host().clear_calls();
        let applied = panel.apply_markup().unwrap().unwrap();
        assert!(applied.text.ends_with("<style>#c {\n  color:red;\n}</style>"));
        assert_eq!(panel.target(), Some(Target::Subtree(ComponentId(2))));
        assert_eq!(panel.apply_markup().unwrap(), None);
        assert_eq!(panel.host().mutation_count(), 1);
    }

    #[test]
    fn deselecting_clears_the_target() {
        let mut panel = shown_panel();
        assert_eq!(panel.target(), Some(Target::Subtree(ComponentId(1))));
        let before = panel.content(SurfaceKind::Markup).map(str::to_string);

        panel.host_mut().selection = None;
        panel
            .handle_event(HostEvent::SelectionChanged { selected: None })
            .unwrap();
        assert_eq!(panel.target(), None);
        assert_eq!(panel.content(SurfaceKind::Markup).map(str::to_string), before);

        panel.host().clear_calls();
        assert_eq!(panel.apply_markup(), Err(PanelError::NoSelection));
        assert_eq!(panel.host().mutation_count(), 0);
        assert!(panel.host().calls().is_empty());
    }

    #[test]
    fn failed_reselect_still_tracks_the_replacement() {
        let mut panel = shown_panel();
        panel.host_mut().fail_on = Some(HostOp::Select);
        let applied = panel.apply_markup().unwrap().unwrap();
        assert_eq!(applied.target, Target::Subtree(ComponentId(2)));
        assert_eq!(panel.target(), Some(Target::Subtree(ComponentId(2))));
        assert_eq!(panel.apply_markup().unwrap(), None);
        assert_eq!(panel.host().mutation_count(), 1);
    }

    #[test]
    fn apply_without_selection_is_an_error() {
        let mut host = RecordingHost::with_component("x");
        host.selection = None;
        let mut panel = panel_with(host);
        panel.show(ms(0)).unwrap();
        assert_eq!(panel.apply_markup(), Err(PanelError::NoSelection));
    }

    #[test]
    fn delete_selection_uses_live_style_surface() {
        let mut panel = shown_panel();
        let rule = panel.host_mut().add_rule("#c { color: red }");
        let surface = panel.surface_mut(SurfaceKind::Style).unwrap();
        let text = surface.text().to_string();
        surface.select(SelectionRange::all(&text));

        let outcome = panel.delete_selection().unwrap().unwrap();
        assert_eq!(outcome.removed_rules, vec![rule]);
        assert_eq!(outcome.unresolved, vec![".d".to_string()]);
        assert_eq!(panel.content(SurfaceKind::Style), Some(""));
    }

    #[test]
    fn delete_selection_disabled_by_option() {
        let options = PanelOptions {
            clean_css_btn: false,
            ..PanelOptions::default()
        };
        let mut panel =
            CodePanel::new(RecordingHost::with_component("x"), TestFactory::default(), options)
                .unwrap();
        panel.show(ms(0)).unwrap();
        panel.pump(ms(100)).unwrap();
        assert_eq!(panel.delete_selection(), Ok(None));
    }

    #[test]
    fn section_toggle_schedules_measure() {
        let mut panel = shown_panel();
        assert_eq!(panel.toggle_section(SurfaceKind::Markup), SurfaceKind::Style);
        assert_eq!(panel.deferrals().next_due(), Some(ms(800)));
        panel.pump(ms(800)).unwrap();
        assert!(panel.deferrals().is_empty());
    }

    #[test]
    fn events_are_pumped_from_the_channel() {
        let mut panel = shown_panel();
        let (tx, rx) = channel();
        panel.attach_events(rx);
        panel.host_mut().inner = "<p>y</p>".to_string();
        tx.send(HostEvent::ComponentUpdated { id: ComponentId(1) }).unwrap();
        tx.send(HostEvent::PreviewStopped).unwrap();

        assert_eq!(panel.pump(ms(600)).unwrap(), 2);
        assert_eq!(
            panel.content(SurfaceKind::Markup),
            Some("<div class=\"box\">\n  <p>y</p>\n</div>")
        );
    }

    #[test]
    fn preserve_width_skips_layout_requests() {
        let options = PanelOptions {
            preserve_width: true,
            ..PanelOptions::default()
        };
        let mut panel =
            CodePanel::new(RecordingHost::with_component("x"), TestFactory::default(), options)
                .unwrap();
        panel.show(ms(0)).unwrap();
        panel.handle_event(HostEvent::PreviewStopped).unwrap();
        panel.hide();
        assert!(!panel.host().calls().iter().any(|c| matches!(c, Call::Resize(_))));
    }

    #[test]
    fn dispose_is_idempotent_and_final() {
        let mut panel = shown_panel();
        let (tx, rx) = channel();
        panel.attach_events(rx);
        panel.toggle_section(SurfaceKind::Style);

        panel.dispose();
        panel.dispose();
        assert!(panel.is_disposed());
        assert!(panel.deferrals().is_empty());
        assert!(panel.slot(SurfaceKind::Markup).is_released());
        assert!(panel.slot(SurfaceKind::Style).is_released());
        assert_eq!(panel.target(), None);
        // The receiver was dropped with the subscription.
        assert!(tx.send(HostEvent::PreviewStopped).is_err());

        assert_eq!(panel.pump(ms(10_000)), Ok(0));
        assert_eq!(panel.show(ms(0)), Err(PanelError::Disposed));
        assert_eq!(panel.apply_style(), Err(PanelError::Disposed));
        assert_eq!(panel.handle_event(HostEvent::PreviewStopped), Ok(()));
    }

    #[test]
    fn dispose_before_init_releases_pending_content() {
        let mut panel = panel_with(RecordingHost::with_component("x"));
        panel.show(ms(0)).unwrap();
        panel.dispose();
        assert_eq!(panel.content(SurfaceKind::Markup), None);
        panel.init_surfaces();
        assert!(!panel.slot(SurfaceKind::Markup).is_live());
    }

    #[test]
    fn commands_route_to_operations() {
        let mut panel = shown_panel();
        panel.handle_command(PanelCommand::ToggleSection(SurfaceKind::Style)).unwrap();
        assert_eq!(panel.active_section(), SurfaceKind::Style);
        panel.handle_command(PanelCommand::Hide).unwrap();
        assert!(!panel.is_visible());
        panel.handle_command(PanelCommand::Show).unwrap();
        assert!(panel.is_visible());
        panel.handle_command(PanelCommand::ApplyStyle).unwrap();
        assert!(panel.snapshot(SurfaceKind::Style).last().is_some());
        panel.handle_command(PanelCommand::Dispose).unwrap();
        assert!(panel.is_disposed());
    }
}
