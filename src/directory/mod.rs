//! 教职工目录：启动时从 JSON 数据集加载一次，之后只读
//!
//! 数据集格式与线上一致：`{ "data_dosen": [ { "nama_dosen": "...", "nip": "..." } ] }`。
//! 记录顺序即文件顺序，模糊匹配同分时先出现者胜出。

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::DatasetError;

/// 单条教职工记录：姓名 + 工号（NIP）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRecord {
    #[serde(rename = "nama_dosen", default)]
    pub name: String,
    #[serde(rename = "nip", default)]
    pub identifier: String,
}

impl StaffRecord {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct DatasetFile {
    #[serde(default)]
    data_dosen: Vec<StaffRecord>,
}

/// 只读目录，进程内共享（通常包在 Arc 中），读取无需加锁
#[derive(Clone, Debug, Default)]
pub struct StaffDirectory {
    records: Vec<StaffRecord>,
}

impl StaffDirectory {
    pub fn from_records(records: Vec<StaffRecord>) -> Self {
        Self { records }
    }

    pub fn from_json_str(data: &str) -> Result<Self, DatasetError> {
        let file: DatasetFile = serde_json::from_str(data)?;
        Ok(Self::from_records(file.data_dosen))
    }

    /// 从 JSON 文件加载；文件缺失或格式错误时返回 DatasetError
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&data)
    }

    /// 加载失败时记录警告并返回空目录，此时所有提问都走远程兜底
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(dir) => {
                tracing::info!("Loaded {} staff records from {}", dir.len(), path.display());
                dir
            }
            Err(e) => {
                tracing::warn!("Dataset load failed ({}): {}, continuing with empty directory", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn records(&self) -> &[StaffRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
