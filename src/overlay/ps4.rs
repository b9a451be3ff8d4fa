//! PS4 param.sfo schema.
//!
//! | Accessor     | Key          | Kind    | Constraint |
//! |--------------|--------------|---------|------------|
//! | `title`      | `TITLE`      | text    | < 128 bytes |
//! | `title_id`   | `TITLE_ID`   | text    | < 16 bytes |
//! | `app_type`   | `APP_TYPE`   | integer | [`AppType`] |
//! | `attribute`  | `ATTRIBUTE`  | integer | [`Ps4Attribute`] flags |
//! | `attribute2` | `ATTRIBUTE2` | integer | [`Ps4Attribute2`] flags |
//! | `category`   | `CATEGORY`   | text    | [`Ps4Category`] code |
//! | `content_id` | `CONTENT_ID` | text    | [`ContentId`] |
//! | `version`    | `VERSION`    | text    | ≤ 6 bytes |
//!
//! The category codes are shared with the PS Vita.

use std::fmt;
use std::sync::LazyLock;

use super::ids::ContentId;
use super::{CodeTable, ParamSfo, ShortCode, flag_set, get_text, get_u32, set_text, set_u32};
use crate::formats::sfo::Sfo;
use crate::{Error, Result};

/// `APP_TYPE` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AppType {
    NotSpecified = 0,
    PaidStandaloneFull = 1,
    Upgradable = 2,
    Demo = 3,
    Freemium = 4,
}

impl AppType {
    pub fn description(self) -> &'static str {
        match self {
            Self::NotSpecified => "Not Specified",
            Self::PaidStandaloneFull => "Paid Standalone Full App",
            Self::Upgradable => "Upgradable App",
            Self::Demo => "Demo App",
            Self::Freemium => "Freemium App",
        }
    }
}

impl TryFrom<u32> for AppType {
    type Error = Error;

    fn try_from(v: u32) -> Result<Self> {
        match v {
            0 => Ok(Self::NotSpecified),
            1 => Ok(Self::PaidStandaloneFull),
            2 => Ok(Self::Upgradable),
            3 => Ok(Self::Demo),
            4 => Ok(Self::Freemium),
            _ => Err(Error::ConstraintViolation {
                key: "APP_TYPE".into(),
                reason: "unknown app type",
            }),
        }
    }
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

flag_set! {
    /// `ATTRIBUTE` bits.
    pub struct Ps4Attribute {
        const INITIAL_USER_LOGOUT = 1 << 0, "Initial user logout";
        const CROSS_BUTTON_ENTER = 1 << 1, "Cross button for common dialog";
        const MOVE_WARNING_MENU = 1 << 2, "PS Move warning dialog menu option";
        const STEREOSCOPIC_3D = 1 << 3, "Supports stereoscopic 3D";
        const SUSPEND_ON_PS_BUTTON = 1 << 4, "Suspended when PS button is pressed";
        const SYSTEM_BUTTON_ENTER = 1 << 5, "System button for common dialog";
        const OVERRIDES_SHARE_MENU = 1 << 6, "Overrides share menu";
        const SUSPEND_SPECIAL_RESOLUTION = 1 << 9, "Suspended on special resolution and PS button";
        const HDCP_ENABLED = 1 << 10, "HDCP enabled";
        const HDCP_DISABLED_NON_GAME = 1 << 11, "HDCP disabled for non-game";
        const PSVR_SUPPORTED = 1 << 15, "PS VR supported";
        const SIX_CPU_MODE = 1 << 16, "6 CPU mode";
        const SEVEN_CPU_MODE = 1 << 17, "7 CPU mode";
        const NEO_MODE = 1 << 24, "PS4 Pro mode supported";
        const PSVR_REQUIRED = 1 << 27, "PS VR required";
        const HDR_SUPPORTED = 1 << 30, "HDR supported";
    }
}

flag_set! {
    /// `ATTRIBUTE2` bits.
    pub struct Ps4Attribute2 {
        const VIDEO_RECORDING = 1 << 2, "Supports video recording";
        const CONTENT_SEARCH = 1 << 3, "Supports content search";
        const PSVR_EYE_DISTANCE_DISABLED = 1 << 4, "PS VR personal eye-to-eye distance disabled";
        const PSVR_EYE_DISTANCE_DYNAMIC = 1 << 5, "PS VR personal eye-to-eye distance dynamic";
        const BROADCAST_SEPARATE_MODE = 1 << 9, "Supports broadcast separate mode";
        const ONE_ON_ONE_MATCH_OLD_SDK = 1 << 12, "Supports one-on-one match (old SDK)";
        const TEAM_TOURNAMENT_OLD_SDK = 1 << 13, "Supports team-on-team tournament (old SDK)";
    }
}

/// `CATEGORY` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ps4Category {
    AdditionalContent,
    BlurayDisc,
    GameContent,
    GameDigitalApplication,
    SystemApplication,
    Unknown1,
    NonGameBigApplication,
    BgApplication,
    MiniApp,
    CommonDialog,
    VideoServiceWebApp,
    PsCloudBetaApp,
    Ps2Classic,
    GameApplicationPatch,
    MiniAppPatch,
    VideoServiceWebAppPatch,
    PsCloudBetaAppPatch,
    SaveData,
    LicenseArea,
    Unknown2,
}

impl ShortCode for Ps4Category {
    const ALL: &'static [Self] = &[
        Self::AdditionalContent,
        Self::BlurayDisc,
        Self::GameContent,
        Self::GameDigitalApplication,
        Self::SystemApplication,
        Self::Unknown1,
        Self::NonGameBigApplication,
        Self::BgApplication,
        Self::MiniApp,
        Self::CommonDialog,
        Self::VideoServiceWebApp,
        Self::PsCloudBetaApp,
        Self::Ps2Classic,
        Self::GameApplicationPatch,
        Self::MiniAppPatch,
        Self::VideoServiceWebAppPatch,
        Self::PsCloudBetaAppPatch,
        Self::SaveData,
        Self::LicenseArea,
        Self::Unknown2,
    ];

    fn code(self) -> &'static str {
        match self {
            Self::AdditionalContent => "ac",
            Self::BlurayDisc => "bd",
            Self::GameContent => "gc",
            Self::GameDigitalApplication => "gd",
            Self::SystemApplication => "gda",
            Self::Unknown1 => "gdb",
            Self::NonGameBigApplication => "gdc",
            Self::BgApplication => "gdd",
            Self::MiniApp => "gde",
            Self::CommonDialog => "gdg",
            Self::VideoServiceWebApp => "gdk",
            Self::PsCloudBetaApp => "gdl",
            Self::Ps2Classic => "gdO",
            Self::GameApplicationPatch => "gp",
            Self::MiniAppPatch => "gpc",
            Self::VideoServiceWebAppPatch => "gpd",
            Self::PsCloudBetaAppPatch => "gpe",
            Self::SaveData => "sd",
            Self::LicenseArea => "la",
            Self::Unknown2 => "wda",
        }
    }
}

static CATEGORIES: LazyLock<CodeTable<Ps4Category>> = LazyLock::new(CodeTable::new);

impl Ps4Category {
    /// Resolve a `CATEGORY` code. Codes are case-sensitive (`gdO`).
    pub fn from_code(code: &str) -> Option<Self> {
        CATEGORIES.lookup(code)
    }
}

/// A PS4 param.sfo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ps4ParamSfo {
    sfo: Sfo,
}

impl ParamSfo for Ps4ParamSfo {
    fn from_sfo(sfo: Sfo) -> Self {
        Self { sfo }
    }

    fn sfo(&self) -> &Sfo {
        &self.sfo
    }

    fn sfo_mut(&mut self) -> &mut Sfo {
        &mut self.sfo
    }

    fn into_sfo(self) -> Sfo {
        self.sfo
    }
}

impl Ps4ParamSfo {
    /// An empty PS4 param.sfo.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> Option<&str> {
        get_text(&self.sfo, "TITLE")
    }

    pub fn set_title(&mut self, v: Option<&str>) -> Result<()> {
        set_text(
            &mut self.sfo,
            "TITLE",
            v,
            |s| s.len() < 128,
            "must be less than 128 bytes",
        )
    }

    pub fn title_id(&self) -> Option<&str> {
        get_text(&self.sfo, "TITLE_ID")
    }

    pub fn set_title_id(&mut self, v: Option<&str>) -> Result<()> {
        set_text(
            &mut self.sfo,
            "TITLE_ID",
            v,
            |s| s.len() < 16,
            "must be less than 16 bytes",
        )
    }

    /// Unknown values read as [`None`].
    pub fn app_type(&self) -> Option<AppType> {
        get_u32(&self.sfo, "APP_TYPE").and_then(|v| AppType::try_from(v).ok())
    }

    pub fn set_app_type(&mut self, v: Option<AppType>) -> Result<()> {
        set_u32(&mut self.sfo, "APP_TYPE", v.map(|t| t as u32))
    }

    pub fn attribute(&self) -> Option<Ps4Attribute> {
        get_u32(&self.sfo, "ATTRIBUTE").map(Ps4Attribute::from_bits)
    }

    pub fn set_attribute(&mut self, v: Option<Ps4Attribute>) -> Result<()> {
        set_u32(&mut self.sfo, "ATTRIBUTE", v.map(Ps4Attribute::bits))
    }

    pub fn attribute2(&self) -> Option<Ps4Attribute2> {
        get_u32(&self.sfo, "ATTRIBUTE2").map(Ps4Attribute2::from_bits)
    }

    pub fn set_attribute2(&mut self, v: Option<Ps4Attribute2>) -> Result<()> {
        set_u32(&mut self.sfo, "ATTRIBUTE2", v.map(Ps4Attribute2::bits))
    }

    pub fn category(&self) -> Option<Ps4Category> {
        get_text(&self.sfo, "CATEGORY").and_then(Ps4Category::from_code)
    }

    pub fn set_category(&mut self, v: Option<Ps4Category>) -> Result<()> {
        set_text(&mut self.sfo, "CATEGORY", v.map(Ps4Category::code), |_| true, "")
    }

    /// The content ID, if present and well-formed.
    pub fn content_id(&self) -> Option<ContentId> {
        get_text(&self.sfo, "CONTENT_ID")?.parse().ok()
    }

    pub fn set_content_id(&mut self, v: Option<&ContentId>) -> Result<()> {
        let text = v.map(ContentId::to_string);
        set_text(&mut self.sfo, "CONTENT_ID", text.as_deref(), |_| true, "")
    }

    /// Content version, e.g. `01.00`.
    pub fn version(&self) -> Option<&str> {
        get_text(&self.sfo, "VERSION")
    }

    pub fn set_version(&mut self, v: Option<&str>) -> Result<()> {
        set_text(
            &mut self.sfo,
            "VERSION",
            v,
            |s| s.len() <= 6,
            "must be 6 bytes or less",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn app() -> Ps4ParamSfo {
        let mut p = Ps4ParamSfo::new();
        p.set_title(Some("Example App")).unwrap();
        p.set_title_id(Some("CUSA00001")).unwrap();
        p.set_app_type(Some(AppType::PaidStandaloneFull)).unwrap();
        p.set_attribute(Some(Ps4Attribute::NEO_MODE | Ps4Attribute::HDR_SUPPORTED))
            .unwrap();
        p.set_attribute2(Some(Ps4Attribute2::VIDEO_RECORDING)).unwrap();
        p.set_category(Some(Ps4Category::GameDigitalApplication)).unwrap();
        p.set_version(Some("01.00")).unwrap();
        let id = "UP0001-CUSA00001_00-EXAMPLEAPP000001".parse().unwrap();
        p.set_content_id(Some(&id)).unwrap();
        p
    }

    #[test]
    fn fields_survive_encoding() {
        let p = Ps4ParamSfo::from_bytes(&app().to_bytes().unwrap()).unwrap();

        assert_eq!(p.title(), Some("Example App"));
        assert_eq!(p.title_id(), Some("CUSA00001"));
        assert_eq!(p.app_type(), Some(AppType::PaidStandaloneFull));
        assert_eq!(p.category(), Some(Ps4Category::GameDigitalApplication));
        assert_eq!(p.version(), Some("01.00"));
        assert_eq!(
            p.content_id().unwrap().to_string(),
            "UP0001-CUSA00001_00-EXAMPLEAPP000001"
        );
        assert!(p.attribute().unwrap().contains(Ps4Attribute::HDR_SUPPORTED));
        assert_eq!(p.attribute2(), Some(Ps4Attribute2::VIDEO_RECORDING));
    }

    #[test]
    fn attributes_use_their_own_keys() {
        let p = app();
        assert_eq!(p.sfo()["APP_TYPE"], Value::integer(1));
        assert_eq!(p.sfo()["ATTRIBUTE"], Value::integer((1 << 24) | (1 << 30)));
        assert_eq!(p.sfo()["ATTRIBUTE2"], Value::integer(1 << 2));
    }

    #[test]
    fn category_codes_are_case_sensitive() {
        assert_eq!(CATEGORIES.len(), Ps4Category::ALL.len());
        assert_eq!(Ps4Category::from_code("gdO"), Some(Ps4Category::Ps2Classic));
        assert_eq!(Ps4Category::from_code("gdo"), None);
    }

    #[test]
    fn malformed_content_id_reads_as_none() {
        let mut sfo = Sfo::new();
        sfo.insert("CONTENT_ID", Value::text("not-a-content-id")).unwrap();
        assert_eq!(Ps4ParamSfo::from_sfo(sfo).content_id(), None);
    }

    #[test]
    fn version_length_is_checked() {
        let mut p = app();
        assert!(matches!(
            p.set_version(Some("01.00.0")),
            Err(Error::ConstraintViolation { .. })
        ));
        assert_eq!(p.version(), Some("01.00"));
        p.set_version(None).unwrap();
        assert_eq!(p.version(), None);
    }

    #[test]
    fn unknown_app_type_reads_as_none() {
        let mut p = Ps4ParamSfo::new();
        p.sfo_mut().insert("APP_TYPE", Value::integer(9)).unwrap();
        assert_eq!(p.app_type(), None);
    }
}
