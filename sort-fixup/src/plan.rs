//! Department sort plan
//!
//! Display order and group for every department in the master. Each group
//! starts on a multiple of a hundred and orders grow in plan order.

use std::collections::HashSet;

/// One department's target sort metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanEntry {
    pub name: &'static str,
    pub order: u32,
    pub group: &'static str,
}

const fn entry(name: &'static str, order: u32, group: &'static str) -> PlanEntry {
    PlanEntry { name, order, group }
}

pub static DEPARTMENT_SORT_PLAN: &[PlanEntry] = &[
    entry("内科", 100, "内科系"),
    entry("総合診療科", 110, "内科系"),
    entry("呼吸器内科", 120, "内科系"),
    entry("消化器内科", 130, "内科系"),
    entry("循環器内科", 140, "内科系"),
    entry("糖尿病内科", 150, "内科系"),
    entry("腎臓内科", 160, "内科系"),
    entry("血液内科", 170, "内科系"),
    entry("内分泌内科", 180, "内科系"),
    entry("感染症内科", 190, "内科系"),
    entry("アレルギー内科", 200, "内科系"),
    entry("老年内科", 210, "内科系"),
    entry("腫瘍内科", 220, "内科系"),
    entry("膠原病内科", 230, "内科系"),
    entry("緩和ケア内科", 240, "内科系"),
    entry("精神科", 300, "精神・神経系"),
    entry("心療内科", 310, "精神・神経系"),
    entry("神経内科", 320, "精神・神経系"),
    entry("小児科", 400, "小児系"),
    entry("小児外科", 410, "小児系"),
    entry("小児歯科", 420, "小児系"),
    entry("外科", 500, "外科系"),
    entry("整形外科", 510, "外科系"),
    entry("形成外科", 520, "外科系"),
    entry("美容外科", 530, "外科系"),
    entry("脳神経外科", 540, "外科系"),
    entry("心臓血管外科", 550, "外科系"),
    entry("呼吸器外科", 560, "外科系"),
    entry("消化器外科", 570, "外科系"),
    entry("乳腺外科", 580, "外科系"),
    entry("胸部外科", 590, "外科系"),
    entry("リハビリテーション科", 600, "外科系"),
    entry("救急科", 610, "外科系"),
    entry("産科", 700, "産婦人科系"),
    entry("婦人科", 710, "産婦人科系"),
    entry("産婦人科", 720, "産婦人科系"),
    entry("耳鼻咽喉科", 800, "耳鼻咽喉科系"),
    entry("気管食道科", 810, "耳鼻咽喉科系"),
    entry("気管食道耳鼻咽喉科", 820, "耳鼻咽喉科系"),
    entry("眼科", 900, "眼科系"),
    entry("皮膚科", 1000, "皮膚科・アレルギー系"),
    entry("アレルギー科", 1010, "皮膚科・アレルギー系"),
    entry("泌尿器科", 1100, "泌尿器科系"),
    entry("歯科", 1200, "歯科系"),
    entry("歯科口腔外科", 1220, "歯科系"),
    entry("放射線科", 1300, "放射線・麻酔・検査系"),
    entry("麻酔科", 1310, "放射線・麻酔・検査系"),
    entry("臨床検査科", 1320, "放射線・麻酔・検査系"),
    entry("病理診断科", 1330, "放射線・麻酔・検査系"),
    entry("リウマチ科", 1400, "リウマチ・免疫系"),
];

/// Plan entries whose department is not in `known`, in plan order
pub fn missing_departments(plan: &[PlanEntry], known: &HashSet<&str>) -> Vec<String> {
    plan.iter()
        .filter(|entry| !known.contains(entry.name))
        .map(|entry| entry.name.to_string())
        .collect()
}
