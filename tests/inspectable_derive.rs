use floatlabel::description::{DescriptionError, Inspectable};

#[derive(Default, Inspectable)]
struct Attributes {
    placeholder: Option<String>,
    #[inspectable(key = "underline")]
    underline_enabled: Option<bool>,
    corner_radius: f32,
    #[inspectable(skip)]
    #[allow(dead_code)]
    internal: u8,
}

#[test]
fn test_keys_default_to_camel_case() {
    assert_eq!(
        Attributes::attribute_keys(),
        &["placeholder", "underline", "cornerRadius"]
    );
}

#[test]
fn test_set_and_read_back() {
    let mut attrs = Attributes::default();
    attrs.set_attribute("placeholder", "Email").unwrap();
    attrs.set_attribute("underline", "false").unwrap();
    attrs.set_attribute("cornerRadius", "4.5").unwrap();

    assert_eq!(attrs.placeholder.as_deref(), Some("Email"));
    assert_eq!(attrs.underline_enabled, Some(false));
    assert_eq!(attrs.corner_radius, 4.5);
    assert_eq!(attrs.attribute("cornerRadius").as_deref(), Some("4.5"));
}

#[test]
fn test_unset_option_reads_as_none() {
    let attrs = Attributes::default();
    assert_eq!(attrs.attribute("placeholder"), None);
    assert_eq!(attrs.attribute("cornerRadius").as_deref(), Some("0"));
}

#[test]
fn test_skipped_and_unknown_keys() {
    let mut attrs = Attributes::default();
    assert!(matches!(
        attrs.set_attribute("internal", "1"),
        Err(DescriptionError::UnknownAttribute(_))
    ));
    assert_eq!(attrs.attribute("underlineEnabled"), None);
}

#[test]
fn test_invalid_value_reports_key() {
    let mut attrs = Attributes::default();
    let err = attrs.set_attribute("cornerRadius", "round").unwrap_err();
    match err {
        DescriptionError::InvalidValue { key, value, .. } => {
            assert_eq!(key, "cornerRadius");
            assert_eq!(value, "round");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(attrs.corner_radius, 0.0);
}
