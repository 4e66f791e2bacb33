use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SlideError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SlideError::asset("x").to_string().contains("asset error:"));
    assert!(SlideError::layout("x").to_string().contains("layout error:"));
    assert!(SlideError::render("x").to_string().contains("render error:"));
    assert!(
        SlideError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SlideError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
