use swipe_in::{ChildParams, Edge, PanelConfig, PanelError, PanelPhase, SwipeIn, Viewport};

fn laid_out() -> SwipeIn<String> {
    let mut panel = SwipeIn::new(PanelConfig::new(Edge::Bottom, 0, 3), true);
    panel
        .add_child_sized("first".to_string(), 30, 6)
        .unwrap();
    panel.layout(Viewport::new(40, 20)).unwrap();
    panel
}

#[test]
fn second_child_is_rejected_by_every_attach_variant() {
    let mut panel = laid_out();
    let before = (panel.state(), panel.placement());
    let params = ChildParams::sized(5, 5);

    let results = [
        panel.add_child("x".into()),
        panel.add_child_at("x".into(), 0),
        panel.add_child_with_params("x".into(), params),
        panel.add_child_at_with_params("x".into(), 0, params),
        panel.add_child_sized("x".into(), 1, 1),
        panel
            .add_child_in_layout("x".into(), 0, params, true)
            .map(|_| ()),
    ];
    for result in results {
        assert_eq!(result, Err(PanelError::MultipleChildren));
    }
    assert_eq!(panel.child().map(String::as_str), Some("first"));
    assert_eq!(panel.child_count(), 1);
    assert_eq!((panel.state(), panel.placement()), before);
}

#[test]
fn attach_after_remove_is_allowed() {
    let mut panel = laid_out();
    assert_eq!(panel.remove_child().as_deref(), Some("first"));
    assert_eq!(panel.phase(), PanelPhase::Expanded);
    panel.add_child("second".into()).unwrap();
    assert_eq!(panel.child().map(String::as_str), Some("second"));
}

#[test]
fn inverted_range_is_a_configuration_error() {
    let mut panel = SwipeIn::new(PanelConfig::new(Edge::Trailing, 50, 0), false);
    panel.add_child(()).unwrap();
    let err = panel.layout(Viewport::new(40, 10)).unwrap_err();
    assert!(matches!(err, PanelError::InvertedRange { edge: Edge::Trailing, .. }));
    assert!(err.to_string().contains("trailing"));
}
