use indexmap::IndexMap;

use crate::error::{BatchError, Result};
use crate::models::{
    AttachmentMeta, FileUpload, UploadOutcome, ALLOWED_MIME_TYPES, MAX_ATTACHMENT_SIZE,
};

/// 附件存储
///
/// 以申请编号 (或暂存键 "batch") 为键，保持插入顺序。附件只存元信息，
/// 文件内容由上传边界处理。
#[derive(Debug, Default)]
pub struct AttachmentStore {
    entries: IndexMap<String, Vec<AttachmentMeta>>,
    next_file_id: u64,
}

impl AttachmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id(&mut self) -> String {
        self.next_file_id += 1;
        format!("ATT_{}", self.next_file_id)
    }

    /// 校验并登记一组文件，逐个返回结果
    ///
    /// 单个文件被拒不影响同批其余文件 (部分成功)。
    pub fn add(&mut self, owner: &str, files: Vec<FileUpload>) -> Vec<UploadOutcome> {
        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            if !ALLOWED_MIME_TYPES.contains(&file.mime.as_str()) {
                tracing::warn!("拒绝不支持的文件类型: {} ({})", file.name, file.mime);
                outcomes.push(UploadOutcome {
                    name: file.name.clone(),
                    accepted: false,
                    message: Some(format!("不支持的文件类型：{}", file.name)),
                });
                continue;
            }
            if file.size > MAX_ATTACHMENT_SIZE {
                tracing::warn!("拒绝超限文件: {} ({} 字节)", file.name, file.size);
                outcomes.push(UploadOutcome {
                    name: file.name.clone(),
                    accepted: false,
                    message: Some(format!("文件过大：{}（最大10MB）", file.name)),
                });
                continue;
            }

            let meta = AttachmentMeta {
                id: self.fresh_id(),
                name: file.name.clone(),
                size: file.size,
                mime: file.mime,
            };
            self.entries.entry(owner.to_string()).or_default().push(meta);
            outcomes.push(UploadOutcome {
                name: file.name,
                accepted: true,
                message: None,
            });
        }
        outcomes
    }

    /// 移除一个附件，不存在时为无副作用的空操作
    pub fn remove(&mut self, owner: &str, file_id: &str) -> bool {
        let Some(list) = self.entries.get_mut(owner) else {
            return false;
        };
        let before = list.len();
        list.retain(|f| f.id != file_id);
        list.len() != before
    }

    /// 把来源键下的附件分发到多个申请
    ///
    /// 每个目标得到一份独立深拷贝 (新 id，互不关联)，覆盖目标原有列表；
    /// 分发完成后删除来源条目。来源为空时报错，不做任何改动。
    pub fn apply_to_many(&mut self, source: &str, targets: &[String]) -> Result<usize> {
        let staged = self
            .entries
            .get(source)
            .filter(|v| !v.is_empty())
            .cloned()
            .ok_or(BatchError::NoStagedFiles)?;

        for target in targets {
            let copies: Vec<AttachmentMeta> = staged
                .iter()
                .map(|f| AttachmentMeta {
                    id: self.fresh_id(),
                    ..f.clone()
                })
                .collect();
            self.entries.insert(target.clone(), copies);
        }

        // 来源同时是目标时保留新副本
        if !targets.iter().any(|t| t == source) {
            self.entries.shift_remove(source);
        }

        tracing::info!("附件已应用到 {} 个申请，每个 {} 份", targets.len(), staged.len());
        Ok(staged.len() * targets.len())
    }

    pub fn list(&self, owner: &str) -> &[AttachmentMeta] {
        self.entries.get(owner).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, owner: &str) -> usize {
        self.list(owner).len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn map(&self) -> &IndexMap<String, Vec<AttachmentMeta>> {
        &self.entries
    }

    /// 从快照恢复，文件 id 计数器接在已有编号之后
    pub fn restore(&mut self, entries: IndexMap<String, Vec<AttachmentMeta>>) {
        let max_seq = entries
            .values()
            .flatten()
            .filter_map(|f| f.id.strip_prefix("ATT_").and_then(|n| n.parse::<u64>().ok()))
            .max()
            .unwrap_or(0);
        self.next_file_id = self.next_file_id.max(max_seq);
        self.entries = entries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BATCH_STAGING_KEY;

    fn pdf(name: &str) -> FileUpload {
        FileUpload {
            name: name.to_string(),
            size: 1024,
            mime: "application/pdf".to_string(),
        }
    }

    #[test]
    fn add_accepts_allowed_files() {
        let mut store = AttachmentStore::new();
        let outcomes = store.add("A", vec![pdf("合同.pdf")]);
        assert!(outcomes[0].accepted);
        assert_eq!(store.count("A"), 1);
    }

    #[test]
    fn bad_file_does_not_block_the_rest() {
        let mut store = AttachmentStore::new();
        let files = vec![
            pdf("a.pdf"),
            FileUpload {
                name: "b.exe".to_string(),
                size: 10,
                mime: "application/x-msdownload".to_string(),
            },
            FileUpload {
                name: "c.png".to_string(),
                size: 11 * 1024 * 1024,
                mime: "image/png".to_string(),
            },
            pdf("d.pdf"),
        ];
        let outcomes = store.add("A", files);
        assert_eq!(
            outcomes.iter().filter(|o| o.accepted).count(),
            2,
            "{:?}",
            outcomes
        );
        assert_eq!(store.count("A"), 2);
    }

    #[test]
    fn remove_is_noop_when_absent() {
        let mut store = AttachmentStore::new();
        store.add("A", vec![pdf("a.pdf")]);
        assert!(!store.remove("A", "ATT_999"));
        assert!(!store.remove("B", "ATT_1"));
        assert_eq!(store.count("A"), 1);
        let id = store.list("A")[0].id.clone();
        assert!(store.remove("A", &id));
        assert_eq!(store.count("A"), 0);
    }

    #[test]
    fn apply_to_many_deep_copies_and_drops_staging() {
        let mut store = AttachmentStore::new();
        store.add(BATCH_STAGING_KEY, vec![pdf("a.pdf"), pdf("b.pdf")]);

        let targets = vec!["A".to_string(), "B".to_string()];
        let copied = store
            .apply_to_many(BATCH_STAGING_KEY, &targets)
            .unwrap();
        assert_eq!(copied, 4);

        assert_eq!(store.count(BATCH_STAGING_KEY), 0);
        assert_eq!(store.count("A"), 2);
        assert_eq!(store.count("B"), 2);

        // 副本彼此独立：id 全部唯一
        let mut ids: Vec<&str> = store
            .list("A")
            .iter()
            .chain(store.list("B").iter())
            .map(|f| f.id.as_str())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn apply_to_many_replaces_prior_target_list() {
        let mut store = AttachmentStore::new();
        store.add("A", vec![pdf("old.pdf")]);
        store.add(BATCH_STAGING_KEY, vec![pdf("new.pdf")]);
        store
            .apply_to_many(BATCH_STAGING_KEY, &["A".to_string()])
            .unwrap();
        assert_eq!(store.count("A"), 1);
        assert_eq!(store.list("A")[0].name, "new.pdf");
    }

    #[test]
    fn apply_with_empty_staging_is_an_error() {
        let mut store = AttachmentStore::new();
        let err = store
            .apply_to_many(BATCH_STAGING_KEY, &["A".to_string()])
            .unwrap_err();
        assert!(matches!(err, BatchError::NoStagedFiles));
    }
}
