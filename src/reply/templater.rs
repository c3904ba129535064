//! 回复模板：把命中的记录渲染成一句自然语言
//!
//! 每次从固定模板集中均匀随机挑一条，`{dosen}` 替换为姓名、`{nip}` 替换为 NIP。
//! 随机源可注入（测试用固定种子）。

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::directory::StaffRecord;

/// 线上使用的默认措辞
pub const DEFAULT_TEMPLATES: [&str; 3] = [
    "NIP dari {dosen} itu adalah {nip}",
    "NIP {nip} itu punya {dosen}",
    "{dosen} punya NIP: {nip}",
];

pub struct ResponseTemplater {
    templates: Vec<String>,
    rng: Mutex<StdRng>,
}

impl Default for ResponseTemplater {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseTemplater {
    /// 默认模板 + 熵源种子
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self::with_templates(Vec::new(), rng)
    }

    /// 自定义模板集；传入空集合时使用默认模板
    pub fn with_templates(templates: Vec<String>, rng: StdRng) -> Self {
        let templates = if templates.is_empty() {
            DEFAULT_TEMPLATES.iter().map(|t| t.to_string()).collect()
        } else {
            templates
        };
        Self {
            templates,
            rng: Mutex::new(rng),
        }
    }

    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    pub fn render(&self, record: &StaffRecord) -> String {
        let template = {
            // 锁中毒时 RNG 状态仍可用
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            self.templates.choose(&mut *rng).cloned()
        };
        // with_templates 保证非空
        let template = template.unwrap_or_else(|| DEFAULT_TEMPLATES[0].to_string());
        fill(&template, record)
    }
}

fn fill(template: &str, record: &StaffRecord) -> String {
    template
        .replace("{dosen}", &record.name)
        .replace("{nip}", &record.identifier)
}
