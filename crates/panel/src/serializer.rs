//! Pulls the selected component's markup and style out of the host.

use crate::host::{Host, HostError, MarkupScope, MarkupSource, Selection};
use crate::options::PanelOptions;
use core_types::ComponentId;

/// Which replace operation an apply must use, fixed when the component is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// The tree's wrapper: its children are shown and replaced.
    Root(ComponentId),
    /// Any other component: shown and replaced with its own tag.
    Subtree(ComponentId),
}

impl Target {
    pub fn id(self) -> ComponentId {
        match self {
            Target::Root(id) | Target::Subtree(id) => id,
        }
    }

    pub fn is_root(self) -> bool {
        matches!(self, Target::Root(_))
    }

    fn scope(self) -> MarkupScope {
        match self {
            Target::Root(_) => MarkupScope::Inner,
            Target::Subtree(_) => MarkupScope::Outer,
        }
    }
}

impl From<Selection> for Target {
    fn from(selection: Selection) -> Self {
        if selection.root {
            Target::Root(selection.id)
        } else {
            Target::Subtree(selection.id)
        }
    }
}

/// Unformatted text for both surfaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializedView {
    pub target: Target,
    pub markup: String,
    pub style: String,
}

/// Read the selected component. `Ok(None)` when nothing is selected.
pub fn serialize<H: Host + ?Sized>(
    host: &mut H,
    options: &PanelOptions,
) -> Result<Option<SerializedView>, HostError> {
    let Some(selection) = host.selected() else {
        log::trace!(target: "codepanel.serialize", "nothing selected");
        return Ok(None);
    };
    let target = Target::from(selection);
    let mut markup = component_markup(host, target, options)?;
    if options.edit_js {
        if let Some(script) = host.script(target.id())? {
            if !script.is_empty() {
                markup.push_str("<script>");
                markup.push_str(&script);
                markup.push_str("</script>");
            }
        }
    }
    let style = host.generate_style(target.id())?;
    log::trace!(
        target: "codepanel.serialize",
        "serialized {:?}: {} bytes markup, {} bytes style",
        target,
        markup.len(),
        style.len()
    );
    Ok(Some(SerializedView {
        target,
        markup,
        style,
    }))
}

fn component_markup<H: Host + ?Sized>(
    host: &mut H,
    target: Target,
    options: &PanelOptions,
) -> Result<String, HostError> {
    let id = target.id();
    if options.clear_data {
        return host.read_markup(id, MarkupSource::Export, target.scope());
    }
    // The selection marker must never reach the text.
    let marker = options.marker_class();
    let removed = host.remove_class(id, &marker)?;
    let read = host.read_markup(id, MarkupSource::Live, target.scope());
    if removed {
        host.add_class(id, &marker)?;
    }
    read
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostOp;
    use crate::test_host::{Call, RecordingHost};

    #[test]
    fn subtree_reads_outer_markup_without_marker() {
        let mut host = RecordingHost::with_component("<p>x</p>");
        let view = serialize(&mut host, &PanelOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(view.target, Target::Subtree(ComponentId(1)));
        assert_eq!(view.markup, "<div class=\"box\"><p>x</p></div>");
        assert!(host.has_class("gjs-selected"));
        assert_eq!(
            host.calls(),
            vec![
                Call::RemoveClass("gjs-selected".into()),
                Call::ReadMarkup(MarkupSource::Live, MarkupScope::Outer),
                Call::AddClass("gjs-selected".into()),
            ]
        );
    }

    #[test]
    fn root_reads_inner_markup() {
        let mut host = RecordingHost::with_component("<p>x</p>");
        host.selection = Some(Selection {
            id: ComponentId(1),
            root: true,
        });
        let view = serialize(&mut host, &PanelOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(view.target, Target::Root(ComponentId(1)));
        assert_eq!(view.markup, "<p>x</p>");
    }

    #[test]
    fn marker_is_not_added_when_it_was_absent() {
        let mut host = RecordingHost::with_component("x");
        host.classes.retain(|c| c != "gjs-selected");
        serialize(&mut host, &PanelOptions::default()).unwrap();
        assert!(!host.has_class("gjs-selected"));
        assert!(!host.calls().iter().any(|c| matches!(c, Call::AddClass(_))));
    }

    #[test]
    fn marker_is_restored_when_reading_fails() {
        let mut host = RecordingHost::with_component("x");
        host.fail_on = Some(HostOp::ReadMarkup);
        let err = serialize(&mut host, &PanelOptions::default()).unwrap_err();
        assert!(matches!(err, HostError::Rejected { op: HostOp::ReadMarkup, .. }));
        assert!(host.has_class("gjs-selected"));
    }

    #[test]
    fn clear_data_uses_export_and_leaves_classes_alone() {
        let mut host = RecordingHost::with_component("<p>x</p>");
        let options = PanelOptions {
            clear_data: true,
            ..PanelOptions::default()
        };
        let view = serialize(&mut host, &options).unwrap().unwrap();
        assert_eq!(view.markup, "<div><p>x</p></div>");
        assert_eq!(
            host.calls(),
            vec![Call::ReadMarkup(MarkupSource::Export, MarkupScope::Outer)]
        );
    }

    #[test]
    fn edit_js_appends_script_block() {
        let mut host = RecordingHost::with_component("x");
        host.script = Some("console.log(1)".to_string());
        let options = PanelOptions {
            edit_js: true,
            clear_data: true,
            ..PanelOptions::default()
        };
        let view = serialize(&mut host, &options).unwrap().unwrap();
        assert_eq!(view.markup, "<div>x</div><script>console.log(1)</script>");

        let view = serialize(&mut host, &PanelOptions::default()).unwrap().unwrap();
        assert!(!view.markup.contains("<script>"));
    }

    #[test]
    fn style_comes_from_host_codegen() {
        let mut host = RecordingHost::with_component("x");
        host.style = "#c{color:red;}".to_string();
        let view = serialize(&mut host, &PanelOptions::default()).unwrap().unwrap();
        assert_eq!(view.style, "#c{color:red;}");
    }

    #[test]
    fn nothing_selected_is_none() {
        let mut host = RecordingHost::with_component("x");
        host.selection = None;
        assert_eq!(serialize(&mut host, &PanelOptions::default()), Ok(None));
        assert!(host.calls().is_empty());
    }
}
