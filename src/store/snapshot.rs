use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::Result;
use crate::models::{AttachmentMeta, InvoiceRequestRow};
use crate::service::coordinator::BatchCoordinator;

/// 快照内容：记录集合 + 附件映射
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotData {
    pub rows: Vec<InvoiceRequestRow>,
    pub attachments: IndexMap<String, Vec<AttachmentMeta>>,
}

/// 从协调器采集当前状态
pub fn capture(coord: &BatchCoordinator) -> SnapshotData {
    SnapshotData {
        rows: coord.rows().to_vec(),
        attachments: coord.attachment_map().clone(),
    }
}

/// 把快照灌回协调器
pub fn restore_into(coord: &mut BatchCoordinator, data: SnapshotData) {
    coord.restore(data.rows, data.attachments);
}

/// 落盘，整体一个 JSON 文件
pub fn save(path: &Path, data: &SnapshotData) -> Result<()> {
    let json = serde_json::to_string(data)?;
    fs::write(path, json)?;
    Ok(())
}

/// 读取快照；文件不存在视为无快照而非错误
pub fn load(path: &Path) -> Result<Option<SnapshotData>> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let data = serde_json::from_str(&json)?;
    Ok(Some(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::processor::{process_rows, RowMap};

    fn sample_coordinator() -> BatchCoordinator {
        let mut raw = RowMap::new();
        raw.insert("单据类型".into(), "预开票".into());
        raw.insert("发票类型".into(), "电子普票".into());
        raw.insert("开票方".into(), "上海某某科技有限公司".into());
        raw.insert("PO编号".into(), "无".into());
        raw.insert("申请金额（含税）".into(), "5000".into());
        raw.insert("发票内容".into(), "软件开发费".into());
        raw.insert("发票备注栏打印内容".into(), "软件定制开发".into());
        raw.insert("客户名称".into(), "某某有限公司".into());
        raw.insert("客户开票档案".into(), "某某有限公司_91310000987654321A".into());
        raw.insert("接收邮箱".into(), "lisi@example.com".into());
        raw.insert("交付格式".into(), "OFD".into());

        let mut coord = BatchCoordinator::new();
        coord.ingest(process_rows(&[raw]));
        coord.commit().unwrap();
        coord
    }

    #[test]
    fn snapshot_round_trip() {
        let coord = sample_coordinator();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        save(&path, &capture(&coord)).unwrap();
        let data = load(&path).unwrap().unwrap();

        let mut restored = BatchCoordinator::new();
        restore_into(&mut restored, data);
        assert_eq!(restored.rows().len(), 1);
        assert_eq!(restored.statistics(), coord.statistics());
        assert_eq!(restored.filtered_view().len(), 1);
    }

    #[test]
    fn invalid_only_snapshot_still_restores_rows() {
        let mut raw = RowMap::new();
        raw.insert("单据类型".into(), "结算开票".into());

        let mut coord = BatchCoordinator::new();
        coord.ingest(process_rows(&[raw]));
        coord.commit().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        save(&path, &capture(&coord)).unwrap();

        // 全部无效也照常恢复：错误详情可查，筛选视图与统计保持为空
        let mut restored = BatchCoordinator::new();
        restore_into(&mut restored, load(&path).unwrap().unwrap());
        assert_eq!(restored.rows().len(), 1);
        assert!(restored.error_detail(1).is_some());
        assert!(restored.filtered_view().is_empty());
        assert_eq!(restored.statistics().total, 0);
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("absent.json")).unwrap().is_none());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, "{not json").unwrap();
        assert!(load(&path).is_err());
    }
}
