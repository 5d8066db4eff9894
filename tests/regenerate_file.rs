use pretty_assertions::assert_eq;
use til_region_editor::{Session, SessionError, analyze, regenerate};

const ATLAS: &str = "\
[GLOBAL]
TEXTURE=cards.png
SCALE=1

[IMG1]
SOURCE_RECT=0,0,10,10

[IMG2]
SOURCE_RECT=10,0,10,10

[IMG3]
SOURCE_RECT=20,0,10,10
";

#[test]
fn shrinks_region_list_to_typed_coordinates() {
    assert_eq!(analyze(ATLAS), 3);

    let out = regenerate(ATLAS, "198,0,229,162\n426,0,228,162\n").unwrap();
    assert_eq!(
        out,
        "[GLOBAL]\nTEXTURE=cards.png\nSCALE=1\n\n\
         [IMG1]\nSOURCE_RECT=198,0,229,162\n\n\
         [IMG2]\nSOURCE_RECT=426,0,228,162"
    );
    assert_eq!(analyze(&out), 2);
}

#[test]
fn output_can_be_loaded_and_regenerated_again() {
    let mut session = Session::new();
    session
        .load("atlas.til", || Ok(ATLAS.as_bytes().to_vec()))
        .unwrap();
    let first = session.regenerate("1,1,1,1\n2,2,2,2\n3,3,3,3\n4,4,4,4").unwrap().to_owned();

    let mut again = Session::new();
    assert_eq!(again.load_bytes("atlas.txt", first.as_bytes()).unwrap(), 4);
    let second = again.regenerate("1,1,1,1\n2,2,2,2\n3,3,3,3\n4,4,4,4").unwrap();
    assert_eq!(second, first);
}

#[test]
fn session_walkthrough() {
    let mut session = Session::new();

    assert!(matches!(
        session.regenerate("1,2,3,4"),
        Err(SessionError::NoFileLoaded)
    ));
    assert!(matches!(
        session.load_bytes("atlas.json", ATLAS.as_bytes()),
        Err(SessionError::UnsupportedFileType { .. })
    ));
    assert_eq!(session.region_count(), None);

    assert_eq!(session.load_bytes("Atlas.TIL", ATLAS.as_bytes()).unwrap(), 3);
    assert!(matches!(
        session.regenerate(" \n "),
        Err(SessionError::EmptyCoordinateInput)
    ));
    assert!(matches!(
        session.regenerate("1,2,3,4\n5,6,7"),
        Err(SessionError::MalformedCoordinateLine(_))
    ));
    assert!(matches!(
        session.clipboard_text(),
        Err(SessionError::ClipboardUnavailable)
    ));

    session.regenerate("5,6,7,8").unwrap();
    assert_eq!(
        session.clipboard_text().unwrap(),
        "[GLOBAL]\nTEXTURE=cards.png\nSCALE=1\n\n[IMG1]\nSOURCE_RECT=5,6,7,8"
    );
    // The original file is untouched; its count still reflects what was loaded.
    assert_eq!(session.region_count(), Some(3));
}
