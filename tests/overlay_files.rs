//! Opening and saving PARAM.SFO files through the platform overlays.

use sfokit::overlay::ParamSfo;
use sfokit::overlay::ids::ContentId;
use sfokit::overlay::language::Language;
use sfokit::overlay::ps3::{Ps3Attribute, Ps3Category, Ps3ParamSfo, Resolution};
use sfokit::overlay::ps4::{AppType, Ps4Category, Ps4ParamSfo};
use sfokit::{Error, Sfo, Value};
use tempfile::TempDir;

fn sample_ps3() -> Ps3ParamSfo {
    let mut sfo = Ps3ParamSfo::new();
    sfo.set_category(Some(Ps3Category::HddGame)).unwrap();
    sfo.set_title(Some("Example Game")).unwrap();
    sfo.set_title_id(Some("NPUB00001")).unwrap();
    sfo.set_app_ver(Some("01.00")).unwrap();
    sfo.set_attribute(Some(Ps3Attribute::from_bits(0x20))).unwrap();
    sfo.set_resolution(Some(Resolution::from_bits(0x3f))).unwrap();
    sfo.set_localized_title(Language::French, Some("Jeu d'exemple"))
        .unwrap();
    sfo
}

#[test]
fn ps3_save_then_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("PARAM.SFO");

    let saved = sample_ps3();
    saved.save(&path).unwrap();

    let reopened = Ps3ParamSfo::open(&path).unwrap();
    assert_eq!(reopened, saved);
    assert_eq!(reopened.category(), Some(Ps3Category::HddGame));
    assert_eq!(reopened.title(), Some("Example Game"));
    assert_eq!(reopened.app_ver(), Some("01.00"));
    assert_eq!(
        reopened.localized_title(Language::French),
        Some("Jeu d'exemple")
    );
    assert_eq!(std::fs::read(&path).unwrap(), saved.to_bytes().unwrap());
}

#[test]
fn ps4_save_then_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("param.sfo");

    let cid: ContentId = "UP0001-CUSA00001_00-GAMECONTENT00001".parse().unwrap();
    let mut sfo = Ps4ParamSfo::new();
    sfo.set_category(Some(Ps4Category::GameDigitalApplication))
        .unwrap();
    sfo.set_app_type(Some(AppType::PaidStandaloneFull)).unwrap();
    sfo.set_content_id(Some(&cid)).unwrap();
    sfo.set_title(Some("Example")).unwrap();
    sfo.set_version(Some("01.00")).unwrap();
    sfo.save(&path).unwrap();

    let reopened = Ps4ParamSfo::open(&path).unwrap();
    assert_eq!(reopened.content_id(), Some(cid));
    assert_eq!(reopened.app_type(), Some(AppType::PaidStandaloneFull));
    assert_eq!(
        reopened.category(),
        Some(Ps4Category::GameDigitalApplication)
    );
}

#[test]
fn overlays_share_the_container() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("PARAM.SFO");
    sample_ps3().save(&path).unwrap();

    // The same file opened generically carries every key the overlay wrote.
    let generic = Sfo::from_bytes(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(generic.get("CATEGORY"), Some(&Value::text("HG")));
    assert_eq!(generic.get("TITLE_02"), Some(&Value::text("Jeu d'exemple")));
    assert_eq!(generic.get("ATTRIBUTE"), Some(&Value::integer(0x20)));
}

#[test]
fn open_rejects_empty_container() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("PARAM.SFO");
    std::fs::write(&path, Sfo::new().to_bytes().unwrap()).unwrap();

    assert!(matches!(
        Ps3ParamSfo::open(&path),
        Err(Error::EmptyContainer)
    ));
    assert!(matches!(
        Ps4ParamSfo::open(&path),
        Err(Error::EmptyContainer)
    ));
}

#[test]
fn open_reports_bad_files() {
    let dir = TempDir::new().unwrap();

    let garbage = dir.path().join("garbage.sfo");
    std::fs::write(&garbage, b"not an sfo at all").unwrap();
    assert!(matches!(Ps3ParamSfo::open(&garbage), Err(Error::BadMagic)));

    let short = dir.path().join("short.sfo");
    std::fs::write(&short, b"\0PSF").unwrap();
    assert!(matches!(
        Ps3ParamSfo::open(&short),
        Err(Error::TruncatedInput)
    ));

    let missing = dir.path().join("missing.sfo");
    assert!(matches!(Ps3ParamSfo::open(&missing), Err(Error::Io(_))));
}

#[test]
fn save_replaces_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("PARAM.SFO");
    std::fs::write(&path, vec![0xAA; 4096]).unwrap();

    let mut sfo = sample_ps3();
    sfo.set_title(None).unwrap();
    sfo.save(&path).unwrap();

    let reopened = Ps3ParamSfo::open(&path).unwrap();
    assert_eq!(reopened.title(), None);
    assert_eq!(
        std::fs::metadata(&path).unwrap().len() as usize,
        sfo.to_bytes().unwrap().len()
    );
}
