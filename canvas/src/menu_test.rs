use super::*;

#[test]
fn ids_shared_between_menus_and_modals() {
    let mut panels = PanelRegistry::new();
    let menu = panels.create(PanelKind::Menu, "File");
    let modal = panels.create(PanelKind::Modal, "Export");
    let other = panels.create(PanelKind::Menu, "View");
    assert_eq!(menu, PanelId(1));
    assert_eq!(modal, PanelId(2));
    assert_eq!(other, PanelId(3));
    assert_eq!(panels.len(), 3);
}

#[test]
fn panels_start_hidden() {
    let mut panels = PanelRegistry::new();
    let id = panels.create(PanelKind::Modal, "About");
    let panel = panels.get(id).unwrap();
    assert!(!panel.is_shown());
    assert_eq!(panel.kind(), PanelKind::Modal);
    assert_eq!(panel.title(), "About");
}

#[test]
fn show_hide_chain() {
    let mut panels = PanelRegistry::new();
    let id = panels.create(PanelKind::Menu, "File");
    let panel = panels.get_mut(id).unwrap();
    assert!(panel.show().is_shown());
    assert!(!panel.hide().is_shown());
}

#[test]
fn unknown_panel_is_an_error() {
    let mut panels = PanelRegistry::new();
    assert_eq!(panels.require_mut(PanelId(4)).map(|p| p.id()), Err(ShellError::UnknownPanel(4)));
    assert!(panels.get(PanelId(0)).is_none());
}

#[test]
fn add_returns_item_index() {
    let mut panels = PanelRegistry::new();
    let id = panels.create(PanelKind::Menu, "File");
    let panel = panels.get_mut(id).unwrap();
    assert_eq!(panel.add(Paragraph::new("Hello")), 0);
    panel.add_separator();
    assert_eq!(panel.add(Checkbox::new("grid", "Grid", true)), 2);
    assert!(matches!(panel.item(1), Some(PanelItem::Separator)));
    assert_eq!(panel.items().len(), 3);
}

#[test]
fn item_mut_reaches_widget_state() {
    let mut panels = PanelRegistry::new();
    let id = panels.create(PanelKind::Menu, "File");
    let panel = panels.get_mut(id).unwrap();
    let index = panel.add(Checkbox::new("grid", "Grid", false));
    if let Some(PanelItem::Checkbox(cb)) = panel.item_mut(index) {
        cb.commit(true);
    }
    assert!(matches!(panel.item(index), Some(PanelItem::Checkbox(cb)) if cb.checked()));
}

#[test]
fn widget_view_skips_separators() {
    let mut panels = PanelRegistry::new();
    let id = panels.create(PanelKind::Menu, "File");
    let panel = panels.get_mut(id).unwrap();
    panel.add(Paragraph::new("a"));
    panel.add_separator();
    if let Some(w) = panel.item_mut(0).and_then(PanelItem::widget_mut) {
        w.hide();
    }
    assert!(panel.item(1).and_then(PanelItem::widget).is_none());
    assert!(!panel.item(0).and_then(PanelItem::widget).is_some_and(|w| w.is_shown()));
}

#[test]
fn set_title() {
    let mut panels = PanelRegistry::new();
    let id = panels.create(PanelKind::Menu, "");
    panels.get_mut(id).unwrap().set_title("Edit");
    assert_eq!(panels.get(id).unwrap().title(), "Edit");
    assert_eq!(panels.iter().count(), 1);
}
