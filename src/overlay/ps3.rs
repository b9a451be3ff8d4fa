//! PS3 PARAM.SFO schema.
//!
//! Field semantics follow the PS3 developer wiki.
//!
//! | Accessor          | Key              | Kind     | Constraint |
//! |-------------------|------------------|----------|------------|
//! | `app_ver`         | `APP_VER`        | text     | exactly 5 bytes (`XX.YY`) |
//! | `attribute`       | `ATTRIBUTE`      | integer  | [`Ps3Attribute`] flags |
//! | `bootable`        | `BOOTABLE`       | integer  | [`Bootable`] flags |
//! | `category`        | `CATEGORY`       | text     | [`Ps3Category`] code |
//! | `detail`          | `DETAIL`         | text     | ≤ 1023 bytes |
//! | `item_priority`   | `ITEM_PRIORITY`  | integer  | |
//! | `lang`            | `LANG`           | integer  | [`Language`] index |
//! | `license`         | `LICENSE`        | text     | ≤ 511 bytes |
//! | `parental_level`  | `PARENTAL_LEVEL` | integer  | |
//! | `resolution`      | `RESOLUTION`     | integer  | [`Resolution`] flags |
//! | `sound_format`    | `SOUND_FORMAT`   | integer  | [`SoundFormat`] flags |
//! | `sub_title`       | `SUB_TITLE`      | text     | < 128 bytes |
//! | `title`           | `TITLE`          | text     | < 128 bytes |
//! | `localized_title` | `TITLE_nn`       | text     | < 128 bytes |
//! | `title_id`        | `TITLE_ID`       | text     | < 16 bytes |
//! | `account_id`      | `ACCOUNT_ID`     | raw text | exactly 16 bytes |

use std::sync::LazyLock;

use super::language::Language;
use super::{
    CodeTable, ParamSfo, ShortCode, flag_set, get_raw_text, get_text, get_u32, set_raw_text,
    set_text, set_u32,
};
use crate::Result;
use crate::formats::sfo::Sfo;

const TITLE_MAX: usize = 128;

flag_set! {
    /// `ATTRIBUTE` bits. Bit 0 is reused: remote play v1 on games, copy
    /// protection on save data, subfolder support on disc subfolders.
    pub struct Ps3Attribute {
        const REMOTE_PLAY_V1 = 1 << 0, "PSP Remote Play (v1)";
        const PSP_EXPORT = 1 << 1, "PSP export";
        const REMOTE_PLAY_V2 = 1 << 2, "PSP Remote Play (v2)";
        const XMB_IN_GAME_FORCED = 1 << 3, "XMB in-game forced enabled";
        const XMB_IN_GAME_DISABLED = 1 << 4, "XMB in-game disabled";
        const XMB_IN_GAME_BGM = 1 << 5, "XMB in-game background music";
        const SYSTEM_VOICE_CHAT = 1 << 6, "System voice chat";
        const VITA_REMOTE_PLAY = 1 << 7, "PS Vita Remote Play";
        const MOVE_WARNING = 1 << 8, "Move controller warning";
        const NAVIGATION_WARNING = 1 << 9, "Navigation controller warning";
        const EYE_WARNING = 1 << 10, "PlayStation Eye warning";
        const MOVE_CALIBRATION = 1 << 11, "Move calibration notification";
        const STEREOSCOPIC_3D_WARNING = 1 << 12, "Stereoscopic 3D warning";
        const INSTALL_DISC = 1 << 16, "Install disc";
        const INSTALL_PACKAGES = 1 << 17, "Install packages";
        const GAME_PURCHASE = 1 << 19, "Game purchase enabled";
        const PC_ENGINE = 1 << 21, "PC Engine";
        const LICENSE_LOGO_DISABLED = 1 << 22, "License logo disabled";
        const MOVE_ENABLED = 1 << 23, "Move controller enabled";
        const NEO_GEO = (1 << 21) | (1 << 26), "Neo Geo";
    }
}

/// Bit 0 of [`Ps3Attribute`] as read on save data.
pub const COPY_PROTECTED: Ps3Attribute = Ps3Attribute::REMOTE_PLAY_V1;

flag_set! {
    /// `BOOTABLE` modes.
    pub struct Bootable {
        const NOT_BOOTABLE = 0, "Not bootable";
        const MODE1 = 1 << 0, "Mode 1";
        const MODE2 = 1 << 1, "Mode 2";
    }
}

flag_set! {
    /// `RESOLUTION` bits: supported video modes.
    pub struct Resolution {
        const NTSC = 1 << 0, "480";
        const PAL = 1 << 1, "576";
        const HD720 = 1 << 2, "720";
        const HD1080 = 1 << 3, "1080";
        const NTSC_WIDE = 1 << 4, "480 16:9";
        const PAL_WIDE = 1 << 5, "576 16:9";
    }
}

flag_set! {
    /// `SOUND_FORMAT` bits: supported audio modes.
    pub struct SoundFormat {
        const LPCM_2_0 = 1 << 0, "LPCM 2.0";
        const LPCM_5_1 = 1 << 2, "LPCM 5.1";
        const LPCM_7_1 = 1 << 4, "LPCM 7.1";
        // Both Dolby and DTS also carry bit 1.
        const DOLBY_DIGITAL = (1 << 8) | (1 << 1), "Dolby Digital 5.1";
        const DTS = (1 << 9) | (1 << 1), "DTS 5.1";
    }
}

/// `CATEGORY` values: where the content shows up in the XMB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ps3Category {
    // Disc content.
    DiscGame,
    AutoinstallRoot,
    DiscPackages,
    InstallPackages,
    ThemeRoot,
    VideoRoot,
    VideoItem,
    ExtraRoot,
    ThemeItem,
    DiscMovie,
    // Hard drive content.
    AppPhoto,
    AppMusic,
    AppVideo,
    BroadcastVideo,
    AppTv,
    WebTv,
    HddGame,
    CellBe,
    AppStore,
    Home,
    StoreFrontend,
    Ps2Game,
    Ps2Psn,
    Ps1Psn,
    PspMinis,
    PspEmulator,
    Psp,
    GameData,
    Ps2Data,
    SaveData,
}

impl ShortCode for Ps3Category {
    const ALL: &'static [Self] = &[
        Self::DiscGame,
        Self::AutoinstallRoot,
        Self::DiscPackages,
        Self::InstallPackages,
        Self::ThemeRoot,
        Self::VideoRoot,
        Self::VideoItem,
        Self::ExtraRoot,
        Self::ThemeItem,
        Self::DiscMovie,
        Self::AppPhoto,
        Self::AppMusic,
        Self::AppVideo,
        Self::BroadcastVideo,
        Self::AppTv,
        Self::WebTv,
        Self::HddGame,
        Self::CellBe,
        Self::AppStore,
        Self::Home,
        Self::StoreFrontend,
        Self::Ps2Game,
        Self::Ps2Psn,
        Self::Ps1Psn,
        Self::PspMinis,
        Self::PspEmulator,
        Self::Psp,
        Self::GameData,
        Self::Ps2Data,
        Self::SaveData,
    ];

    fn code(self) -> &'static str {
        match self {
            Self::DiscGame => "DG",
            Self::AutoinstallRoot => "AR",
            Self::DiscPackages => "DP",
            Self::InstallPackages => "IP",
            Self::ThemeRoot => "TR",
            Self::VideoRoot => "VR",
            Self::VideoItem => "VI",
            Self::ExtraRoot => "XR",
            Self::ThemeItem => "TI",
            Self::DiscMovie => "DM",
            Self::AppPhoto => "AP",
            Self::AppMusic => "AM",
            Self::AppVideo => "AV",
            Self::BroadcastVideo => "BV",
            Self::AppTv => "AT",
            Self::WebTv => "WT",
            Self::HddGame => "HG",
            Self::CellBe => "CB",
            Self::AppStore => "AS",
            Self::Home => "HM",
            Self::StoreFrontend => "SF",
            Self::Ps2Game => "2G",
            Self::Ps2Psn => "2P",
            Self::Ps1Psn => "1P",
            Self::PspMinis => "MN",
            Self::PspEmulator => "PE",
            Self::Psp => "PP",
            Self::GameData => "GD",
            Self::Ps2Data => "2D",
            Self::SaveData => "SD",
        }
    }
}

static CATEGORIES: LazyLock<CodeTable<Ps3Category>> = LazyLock::new(CodeTable::new);

impl Ps3Category {
    /// Resolve a `CATEGORY` code.
    pub fn from_code(code: &str) -> Option<Self> {
        CATEGORIES.lookup(code)
    }

    /// English display name.
    pub fn description(self) -> &'static str {
        match self {
            Self::DiscGame => "Disc game",
            Self::AutoinstallRoot => "Autoinstall root",
            Self::DiscPackages => "Disc packages",
            Self::InstallPackages => "Install packages",
            Self::ThemeRoot => "Theme root",
            Self::VideoRoot => "Video root",
            Self::VideoItem => "Video item",
            Self::ExtraRoot => "Extra root",
            Self::ThemeItem => "Theme item",
            Self::DiscMovie => "Disc movie",
            Self::AppPhoto => "App: Photos",
            Self::AppMusic => "App: Music",
            Self::AppVideo => "App: Video",
            Self::BroadcastVideo => "Broadcast video",
            Self::AppTv => "App: TV",
            Self::WebTv => "Web TV",
            Self::HddGame => "HDD Game",
            Self::CellBe => "Cell BE",
            Self::AppStore => "App store",
            Self::Home => "PlayStation Home",
            Self::StoreFrontend => "PlayStation Store",
            Self::Ps2Game => "PlayStation 2 game",
            Self::Ps2Psn => "PS2 Classics",
            Self::Ps1Psn => "PS1 Classics",
            Self::PspMinis => "PSP Minis",
            Self::PspEmulator => "PSP Remasters",
            Self::Psp => "PSP",
            Self::GameData => "Game Data",
            Self::Ps2Data => "PS2 Data",
            Self::SaveData => "Save Data",
        }
    }
}

/// A PS3 PARAM.SFO.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ps3ParamSfo {
    sfo: Sfo,
}

impl ParamSfo for Ps3ParamSfo {
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

impl Ps3ParamSfo {
    /// An empty PS3 PARAM.SFO.
    pub fn new() -> Self {
        Self::default()
    }

    /// Application version, `XX.YY`.
    pub fn app_ver(&self) -> Option<&str> {
        get_text(&self.sfo, "APP_VER")
    }

    pub fn set_app_ver(&mut self, v: Option<&str>) -> Result<()> {
        set_text(
            &mut self.sfo,
            "APP_VER",
            v,
            |s| s.len() == 5,
            "must be exactly 5 bytes",
        )
    }

    pub fn attribute(&self) -> Option<Ps3Attribute> {
        get_u32(&self.sfo, "ATTRIBUTE").map(Ps3Attribute::from_bits)
    }

    pub fn set_attribute(&mut self, v: Option<Ps3Attribute>) -> Result<()> {
        set_u32(&mut self.sfo, "ATTRIBUTE", v.map(Ps3Attribute::bits))
    }

    pub fn bootable(&self) -> Option<Bootable> {
        get_u32(&self.sfo, "BOOTABLE").map(Bootable::from_bits)
    }

    pub fn set_bootable(&mut self, v: Option<Bootable>) -> Result<()> {
        set_u32(&mut self.sfo, "BOOTABLE", v.map(Bootable::bits))
    }

    /// Content category. Unknown codes read as [`None`].
    pub fn category(&self) -> Option<Ps3Category> {
        get_text(&self.sfo, "CATEGORY").and_then(Ps3Category::from_code)
    }

    pub fn set_category(&mut self, v: Option<Ps3Category>) -> Result<()> {
        set_text(&mut self.sfo, "CATEGORY", v.map(Ps3Category::code), |_| true, "")
    }

    /// Save data text shown below the subtitle.
    pub fn detail(&self) -> Option<&str> {
        get_text(&self.sfo, "DETAIL")
    }

    pub fn set_detail(&mut self, v: Option<&str>) -> Result<()> {
        set_text(
            &mut self.sfo,
            "DETAIL",
            v,
            |s| s.len() < 1024,
            "must be less than 1024 bytes",
        )
    }

    /// Vertical ordering in the XMB.
    pub fn item_priority(&self) -> Option<u32> {
        get_u32(&self.sfo, "ITEM_PRIORITY")
    }

    pub fn set_item_priority(&mut self, v: Option<u32>) -> Result<()> {
        set_u32(&mut self.sfo, "ITEM_PRIORITY", v)
    }

    /// Unknown indices read as [`None`].
    pub fn lang(&self) -> Option<Language> {
        get_u32(&self.sfo, "LANG").and_then(|v| Language::try_from(v).ok())
    }

    pub fn set_lang(&mut self, v: Option<Language>) -> Result<()> {
        set_u32(&mut self.sfo, "LANG", v.map(Language::index))
    }

    /// License text of HDD games.
    pub fn license(&self) -> Option<&str> {
        get_text(&self.sfo, "LICENSE")
    }

    pub fn set_license(&mut self, v: Option<&str>) -> Result<()> {
        set_text(
            &mut self.sfo,
            "LICENSE",
            v,
            |s| s.len() < 512,
            "must be less than 512 bytes",
        )
    }

    pub fn parental_level(&self) -> Option<u32> {
        get_u32(&self.sfo, "PARENTAL_LEVEL")
    }

    pub fn set_parental_level(&mut self, v: Option<u32>) -> Result<()> {
        set_u32(&mut self.sfo, "PARENTAL_LEVEL", v)
    }

    pub fn resolution(&self) -> Option<Resolution> {
        get_u32(&self.sfo, "RESOLUTION").map(Resolution::from_bits)
    }

    pub fn set_resolution(&mut self, v: Option<Resolution>) -> Result<()> {
        set_u32(&mut self.sfo, "RESOLUTION", v.map(Resolution::bits))
    }

    pub fn sound_format(&self) -> Option<SoundFormat> {
        get_u32(&self.sfo, "SOUND_FORMAT").map(SoundFormat::from_bits)
    }

    pub fn set_sound_format(&mut self, v: Option<SoundFormat>) -> Result<()> {
        set_u32(&mut self.sfo, "SOUND_FORMAT", v.map(SoundFormat::bits))
    }

    pub fn sub_title(&self) -> Option<&str> {
        get_text(&self.sfo, "SUB_TITLE")
    }

    pub fn set_sub_title(&mut self, v: Option<&str>) -> Result<()> {
        set_text(
            &mut self.sfo,
            "SUB_TITLE",
            v,
            |s| s.len() < TITLE_MAX,
            "must be less than 128 bytes",
        )
    }

    pub fn title(&self) -> Option<&str> {
        get_text(&self.sfo, "TITLE")
    }

    pub fn set_title(&mut self, v: Option<&str>) -> Result<()> {
        set_text(
            &mut self.sfo,
            "TITLE",
            v,
            |s| s.len() < TITLE_MAX,
            "must be less than 128 bytes",
        )
    }

    /// Localized title `TITLE_nn`, where `nn` is a [`Language`] index.
    pub fn localized_title(&self, lang: Language) -> Option<&str> {
        get_text(&self.sfo, &localized_key(lang))
    }

    pub fn set_localized_title(&mut self, lang: Language, v: Option<&str>) -> Result<()> {
        set_text(
            &mut self.sfo,
            &localized_key(lang),
            v,
            |s| s.len() < TITLE_MAX,
            "must be less than 128 bytes",
        )
    }

    /// Product code such as `BLUS12345`.
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

    /// Owner account of save data. Fixed 16 bytes, stored without
    /// terminator.
    pub fn account_id(&self) -> Option<&str> {
        get_raw_text(&self.sfo, "ACCOUNT_ID")
    }

    pub fn set_account_id(&mut self, v: Option<&str>) -> Result<()> {
        set_raw_text(
            &mut self.sfo,
            "ACCOUNT_ID",
            v,
            |s| s.len() == 16,
            "must be exactly 16 bytes",
        )
    }
}

fn localized_key(lang: Language) -> String {
    format!("TITLE_{:02}", lang.index())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::value::Value;

    fn game() -> Ps3ParamSfo {
        let mut p = Ps3ParamSfo::new();
        p.set_title(Some("Example Game")).unwrap();
        p.set_title_id(Some("BLUS12345")).unwrap();
        p.set_category(Some(Ps3Category::DiscGame)).unwrap();
        p.set_app_ver(Some("01.00")).unwrap();
        p.set_parental_level(Some(5)).unwrap();
        p.set_resolution(Some(Resolution::HD720 | Resolution::HD1080)).unwrap();
        p.set_sound_format(Some(SoundFormat::LPCM_2_0 | SoundFormat::DOLBY_DIGITAL))
            .unwrap();
        p.set_attribute(Some(Ps3Attribute::INSTALL_PACKAGES)).unwrap();
        p.set_bootable(Some(Bootable::MODE1)).unwrap();
        p
    }

    #[test]
    fn fields_survive_encoding() {
        let bytes = game().to_bytes().unwrap();
        let p = Ps3ParamSfo::from_bytes(&bytes).unwrap();

        assert_eq!(p.title(), Some("Example Game"));
        assert_eq!(p.title_id(), Some("BLUS12345"));
        assert_eq!(p.category(), Some(Ps3Category::DiscGame));
        assert_eq!(p.sfo()["CATEGORY"], Value::text("DG"));
        assert_eq!(p.app_ver(), Some("01.00"));
        assert_eq!(p.parental_level(), Some(5));
        assert_eq!(p.bootable(), Some(Bootable::MODE1));
        assert!(p.resolution().unwrap().contains(Resolution::HD1080));
        assert!(p.attribute().unwrap().contains(Ps3Attribute::INSTALL_PACKAGES));
        assert_eq!(
            p.sound_format().unwrap().describe(),
            ["LPCM 2.0", "Dolby Digital 5.1"]
        );
        assert_eq!(p, game());
    }

    #[test]
    fn rejected_values_leave_container_untouched() {
        let mut p = game();
        let before = p.clone();

        assert!(matches!(
            p.set_app_ver(Some("1.0")),
            Err(Error::ConstraintViolation { .. })
        ));
        assert!(p.set_title(Some("x".repeat(128).as_str())).is_err());
        assert!(p.set_title_id(Some("BLUS12345678901234")).is_err());
        assert!(p.set_detail(Some("d".repeat(1024).as_str())).is_err());
        assert!(p.set_license(Some("l".repeat(512).as_str())).is_err());
        assert!(p.set_account_id(Some("short")).is_err());
        assert_eq!(p, before);

        p.set_title(Some("x".repeat(127).as_str())).unwrap();
        p.set_detail(Some("d".repeat(1023).as_str())).unwrap();
        p.set_license(Some("l".repeat(511).as_str())).unwrap();
    }

    #[test]
    fn none_removes_field() {
        let mut p = game();
        p.set_parental_level(None).unwrap();
        p.set_category(None).unwrap();
        assert_eq!(p.parental_level(), None);
        assert_eq!(p.category(), None);
        assert!(!p.sfo().contains_key("PARENTAL_LEVEL"));
    }

    #[test]
    fn unknown_category_reads_as_none() {
        let mut sfo = Sfo::new();
        sfo.insert("CATEGORY", Value::text("ZZ")).unwrap();
        let p = Ps3ParamSfo::from_sfo(sfo);
        assert_eq!(p.category(), None);
    }

    #[test]
    fn wrong_tag_reads_as_none() {
        let mut sfo = Sfo::new();
        sfo.insert("PARENTAL_LEVEL", Value::text("5")).unwrap();
        sfo.insert("TITLE", Value::integer(3)).unwrap();
        let p = Ps3ParamSfo::from_sfo(sfo);
        assert_eq!(p.parental_level(), None);
        assert_eq!(p.title(), None);
    }

    #[test]
    fn category_codes_are_unique() {
        assert_eq!(CATEGORIES.len(), Ps3Category::ALL.len());
        for &c in Ps3Category::ALL {
            assert_eq!(Ps3Category::from_code(c.code()), Some(c));
        }
    }

    #[test]
    fn account_id_is_raw_text() {
        let mut p = Ps3ParamSfo::new();
        p.set_account_id(Some("0000000000000\u{7f}01")).unwrap();
        assert_eq!(
            p.sfo()["ACCOUNT_ID"],
            Value::raw_text("0000000000000\u{7f}01")
        );

        let p = Ps3ParamSfo::from_bytes(&p.to_bytes().unwrap()).unwrap();
        assert_eq!(p.account_id(), Some("0000000000000\u{7f}01"));
    }

    #[test]
    fn localized_titles_use_language_index() {
        let mut p = Ps3ParamSfo::new();
        p.set_localized_title(Language::French, Some("Jeu")).unwrap();
        assert!(p.sfo().contains_key("TITLE_02"));
        assert_eq!(p.localized_title(Language::French), Some("Jeu"));
        assert_eq!(p.localized_title(Language::German), None);
    }

    #[test]
    fn lang_round_trip() {
        let mut p = Ps3ParamSfo::new();
        p.set_lang(Some(Language::EnglishUnitedKingdom)).unwrap();
        assert_eq!(p.sfo()["LANG"], Value::integer(18));
        assert_eq!(p.lang(), Some(Language::EnglishUnitedKingdom));
    }

    #[test]
    fn empty_file_is_rejected() {
        let bytes = Sfo::new().to_bytes().unwrap();
        assert!(matches!(
            Ps3ParamSfo::from_bytes(&bytes),
            Err(Error::EmptyContainer)
        ));
    }
}
