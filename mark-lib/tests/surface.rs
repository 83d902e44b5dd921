use mark_lib::{
  Command,
  surface::{Element, SurfaceError, SurfaceNode, Wrapper, locate_surface},
};

#[test]
fn rejects_invalid_children() {
  let cases = [
    (None, SurfaceError::MissingChild),
    (Some(Element::text("some string")), SurfaceError::NotTraversable),
    (Some(Element::new("input")), SurfaceError::NoEditableSurface),
    (
      Some(Element::new("span").with_child(Element::text("here"))),
      SurfaceError::NoEditableSurface,
    ),
    (
      Some(Element::new("div").with_child(Element::new("div"))),
      SurfaceError::NoEditableSurface,
    ),
  ];

  for (child, expected) in cases {
    assert_eq!(locate_surface(child.as_ref()), Err(expected.clone()));
    assert_eq!(Wrapper::mount(child.as_ref()).err(), Some(expected));
  }
}

#[test]
fn finds_nested_textarea() {
  let valid = [
    Element::textarea(""),
    Element::new("div").with_child(Element::textarea("")),
    Element::new("div")
      .with_child(Element::new("div").with_child(Element::text("some text")))
      .with_child(Element::textarea("")),
  ];

  for child in &valid {
    let surface = locate_surface(Some(child)).unwrap();
    assert!(surface.is_editable_surface());
    assert_eq!(surface.children(), Some(&[][..]));
  }
}

#[test]
fn rejects_ambiguous_surfaces() {
  let child = Element::new("form")
    .with_child(Element::textarea("a"))
    .with_child(Element::new("div").with_child(Element::textarea("b")));
  assert_eq!(
    locate_surface(Some(&child)),
    Err(SurfaceError::MultipleEditableSurfaces(2))
  );
}

#[test]
fn mounted_area_starts_from_surface_value() {
  let child = Element::new("div").with_child(Element::textarea("some string"));
  let mut area = Wrapper::mount(Some(&child)).unwrap();
  assert_eq!(area.value(), "some string");
  area.set_selection_range(0, 4);
  area.trigger(Command::Bold).unwrap();
  assert_eq!(area.value(), "**some** string");
}
