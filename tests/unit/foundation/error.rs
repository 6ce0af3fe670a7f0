use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScrollyteError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ScrollyteError::timing("x")
            .to_string()
            .contains("timing error:")
    );
    assert!(
        ScrollyteError::runtime("x")
            .to_string()
            .contains("runtime error:")
    );
    assert!(
        ScrollyteError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrollyteError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
