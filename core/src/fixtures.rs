//! Canned data for every server variant
//!
//! A [`FixtureSet`] bundles everything a variant serves: clinics, settings,
//! practice modes, the initial task list and the POST acknowledgement shape.
//! Category and master tables are shared by all variants.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::MockError;
use crate::models::{
    Clinic, ClinicMedia, ClinicSchedule, MasterItem, MediaImage, Mode, ScheduleSlot, Settings,
    Task, TaskStatus,
};

/// Raw body served for `GET /api/export*`
pub const EXPORT_PLACEHOLDER: &str = r#"{"export": "test data"}"#;

/// Departments known to the local `department` master
pub const DEPARTMENT_NAMES: &[&str] = &[
    "内科", "総合診療科", "呼吸器内科", "消化器内科", "循環器内科", "糖尿病内科",
    "腎臓内科", "血液内科", "内分泌内科", "感染症内科", "アレルギー内科", "老年内科",
    "腫瘍内科", "膠原病内科", "緩和ケア内科", "精神科", "心療内科", "神経内科",
    "小児科", "小児外科", "小児歯科", "外科", "整形外科", "形成外科", "美容外科",
    "脳神経外科", "心臓血管外科", "呼吸器外科", "消化器外科", "乳腺外科", "胸部外科",
    "リハビリテーション科", "救急科", "産科", "婦人科", "産婦人科", "耳鼻咽喉科",
    "気管食道科", "気管食道耳鼻咽喉科", "眼科", "皮膚科", "アレルギー科", "泌尿器科",
    "歯科", "歯科口腔外科", "放射線科", "麻酔科", "臨床検査科", "病理診断科",
    "リウマチ科",
];

const DEPARTMENT_CATEGORY: &str = "診療科";

/// Server flavour; decides fixture data, POST acknowledgement and default port.
#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Single clinic, settings only
    Minimal,
    /// Clinic list and detail, categories, masters, modes, todos
    #[default]
    Standard,
    /// Admin screen debugging: different clinic ids, verbose POST acks
    Admin,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Minimal, Variant::Standard, Variant::Admin];

    pub fn default_port(&self) -> u16 {
        match self {
            Variant::Minimal => 6000,
            Variant::Standard => 7000,
            Variant::Admin => 9000,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Minimal => write!(f, "minimal"),
            Variant::Standard => write!(f, "standard"),
            Variant::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Variant {
    type Err = MockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minimal" => Ok(Variant::Minimal),
            "standard" => Ok(Variant::Standard),
            "admin" => Ok(Variant::Admin),
            _ => Err(MockError::UnknownVariant(s.to_string())),
        }
    }
}

/// Body returned for POSTs no route claims
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAck {
    /// `{ok: true}`
    Plain,
    /// `{ok: true, message: "Success"}`
    WithMessage,
}

impl PostAck {
    pub fn body(&self) -> Value {
        match self {
            PostAck::Plain => json!({"ok": true}),
            PostAck::WithMessage => json!({"ok": true, "message": "Success"}),
        }
    }
}

/// Immutable data served by one variant
#[derive(Debug, Clone)]
pub struct FixtureSet {
    pub variant: Variant,
    pub clinics: Vec<Clinic>,
    pub settings: Settings,
    pub modes: Vec<Mode>,
    /// Initial contents of the task list
    pub todos: Vec<Task>,
    pub post_ack: PostAck,
}

impl Default for FixtureSet {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl FixtureSet {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Minimal => Self {
                variant,
                clinics: vec![nakano_chuo_clinic()],
                settings: sample_settings(),
                modes: default_modes(),
                todos: default_todos(),
                post_ack: PostAck::Plain,
            },
            Variant::Standard => Self {
                variant,
                clinics: vec![nakano_chuo_clinic(), higashi_nakano_clinic()],
                settings: sample_settings(),
                modes: default_modes(),
                todos: default_todos(),
                post_ack: PostAck::Plain,
            },
            Variant::Admin => Self {
                variant,
                clinics: admin_clinics(),
                settings: Settings {
                    model: "gpt-4o-mini".to_string(),
                    prompt: "テスト用プロンプト".to_string(),
                    prompt_exam: "検査用プロンプト".to_string(),
                    prompt_diagnosis: "診断用プロンプト".to_string(),
                },
                modes: default_modes(),
                todos: default_todos(),
                post_ack: PostAck::WithMessage,
            },
        }
    }

    pub fn default_port(&self) -> u16 {
        self.variant.default_port()
    }

    /// Category labels for a `type` token.
    ///
    /// Unrecognized tokens (including the empty string) get three placeholder
    /// labels built from the token itself.
    pub fn categories(&self, kind: &str) -> Vec<String> {
        let fixed: &[&str] = match kind {
            "vaccinationType" => &["小児定期接種", "任意接種"],
            "checkupType" => &["一般健診", "特定健診", "がん検診"],
            "service" => &["外来診療", "在宅医療", "オンライン診療"],
            "test" => &["内科一般検査", "画像検査", "生理機能検査"],
            _ => return (1..=3).map(|i| format!("{kind}分類{i}")).collect(),
        };
        fixed.iter().map(|s| s.to_string()).collect()
    }

    /// Master records for a `type` token; anything unrecognized gets the
    /// `test` table.
    pub fn master_items(&self, kind: &str) -> Vec<MasterItem> {
        match kind {
            "vaccination" => vaccination_master(),
            "checkup" => checkup_master(),
            "department" => department_master(),
            _ => test_master(),
        }
    }
}

fn base_clinic(id: &str, name: &str, address: &str, postal_code: &str, phone: &str) -> Clinic {
    Clinic {
        id: id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        postal_code: postal_code.to_string(),
        phone: phone.to_string(),
        created_at: 1640995200,
        updated_at: 1640995200,
        schema_version: 1,
        schedule: weekday_schedule(),
        media: ClinicMedia::default(),
        departments: Vec::new(),
        services: Vec::new(),
        tests: Vec::new(),
        modes: Vec::new(),
    }
}

fn weekday_schedule() -> ClinicSchedule {
    let mut weekly = Vec::new();
    for day in ["mon", "tue", "wed", "thu", "fri"] {
        weekly.push(ScheduleSlot {
            day: day.to_string(),
            open: "09:00".to_string(),
            close: "12:30".to_string(),
        });
        weekly.push(ScheduleSlot {
            day: day.to_string(),
            open: "14:30".to_string(),
            close: "18:00".to_string(),
        });
    }
    weekly.push(ScheduleSlot {
        day: "sat".to_string(),
        open: "09:00".to_string(),
        close: "13:00".to_string(),
    });

    ClinicSchedule {
        weekly,
        closed_days: vec!["sun".to_string(), "holiday".to_string()],
        note: None,
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn nakano_chuo_clinic() -> Clinic {
    let mut clinic = base_clinic(
        "test-clinic-1",
        "テスト診療所1",
        "中野区中央1-1-1",
        "164-0011",
        "03-1111-0001",
    );
    clinic.media = ClinicMedia {
        logo: Some("/img/clinics/test-clinic-1/logo.png".to_string()),
        images: vec![MediaImage {
            url: "/img/clinics/test-clinic-1/exterior.jpg".to_string(),
            alt: "外観".to_string(),
        }],
    };
    clinic.departments = strings(&["内科", "小児科"]);
    clinic.services = strings(&["外来診療", "オンライン診療"]);
    clinic.tests = strings(&["血液検査", "尿検査"]);
    clinic.modes = strings(&["general", "pediatric"]);
    clinic
}

fn higashi_nakano_clinic() -> Clinic {
    let mut clinic = base_clinic(
        "test-clinic-2",
        "サンプル医院",
        "中野区東中野1-2-3",
        "164-0003",
        "03-1111-0002",
    );
    clinic.schedule.note = Some("木曜午後は休診".to_string());
    clinic.schedule.weekly.retain(|slot| !(slot.day == "thu" && slot.open == "14:30"));
    clinic.departments = strings(&["整形外科", "リハビリテーション科"]);
    clinic.services = strings(&["外来診療", "在宅医療"]);
    clinic.tests = strings(&["胸部X線"]);
    clinic.modes = strings(&["general", "homecare"]);
    clinic
}

fn admin_clinics() -> Vec<Clinic> {
    let mut first = base_clinic(
        "test001",
        "テスト診療所1",
        "東京都中野区テスト町1-1-1",
        "164-0001",
        "03-9999-0001",
    );
    first.updated_at = 1695388800;
    first.departments = strings(&["内科"]);
    first.modes = strings(&["general"]);

    let mut second = base_clinic(
        "test002",
        "テスト診療所2",
        "東京都中野区テスト町2-2-2",
        "164-0002",
        "03-9999-0002",
    );
    second.updated_at = 1695388900;
    second.departments = strings(&["小児科"]);
    second.modes = strings(&["pediatric"]);

    vec![first, second]
}

fn sample_settings() -> Settings {
    Settings {
        model: "gpt-4o-mini".to_string(),
        prompt: "医療説明用のサンプルを作ってください".to_string(),
        prompt_exam: String::new(),
        prompt_diagnosis: String::new(),
    }
}

fn default_modes() -> Vec<Mode> {
    let mode = |id: &str, label: &str, icon: &str, color: &str, order: u32, active: bool| Mode {
        id: id.to_string(),
        label: label.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
        order,
        active,
    };
    vec![
        mode("general", "一般診療", "stethoscope", "#2563eb", 10, true),
        mode("pediatric", "小児診療", "baby", "#f59e0b", 20, true),
        mode("homecare", "在宅医療", "home", "#10b981", 30, true),
        mode("online", "オンライン診療", "video", "#8b5cf6", 40, false),
    ]
}

/// Task list every process starts with
pub fn default_todos() -> Vec<Task> {
    vec![
        Task::new(
            "開発",
            "診療所詳細APIのモック整備",
            TaskStatus::Open,
            "P1",
            "2025-09-22T09:00:00+09:00",
        ),
        Task::new(
            "運用",
            "診療科マスターの並び順確認",
            TaskStatus::Done,
            "P2",
            "2025-09-21T18:30:00+09:00",
        ),
    ]
}

fn vaccination_master() -> Vec<MasterItem> {
    let kind = "vaccination";
    vec![
        MasterItem::new(kind, "小児定期接種", "BCG").with_count(12).with_sources(&["mhlw"]),
        MasterItem::new(kind, "小児定期接種", "四種混合").with_count(9).with_sources(&["mhlw"]),
        MasterItem::new(kind, "小児定期接種", "MR").with_count(11).with_sources(&["mhlw"]),
        MasterItem::new(kind, "任意接種", "インフルエンザ").with_count(24).with_sources(&["clinic"]),
        MasterItem::new(kind, "任意接種", "おたふくかぜ").with_count(6).with_sources(&["clinic"]),
    ]
}

fn checkup_master() -> Vec<MasterItem> {
    let kind = "checkup";
    vec![
        MasterItem::new(kind, "一般健診", "雇入時健康診断").with_count(8),
        MasterItem::new(kind, "一般健診", "定期健康診断").with_count(15),
        MasterItem::new(kind, "特定健診", "特定健康診査").with_count(10),
        MasterItem::new(kind, "がん検診", "胃がん検診").with_count(4),
    ]
}

fn test_master() -> Vec<MasterItem> {
    let kind = "test";
    vec![
        MasterItem::new(kind, "内科一般検査", "血液検査").with_count(5).with_sources(&["test"]),
        MasterItem::new(kind, "内科一般検査", "尿検査").with_count(3).with_sources(&["test"]),
        MasterItem::new(kind, "画像検査", "胸部X線").with_count(2).with_sources(&["test"]),
    ]
}

fn department_master() -> Vec<MasterItem> {
    DEPARTMENT_NAMES
        .iter()
        .map(|name| MasterItem::new("department", DEPARTMENT_CATEGORY, name))
        .collect()
}
