use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub snapshot: SnapshotConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 快照落盘配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    pub path: String,
    pub interval_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            snapshot: SnapshotConfig {
                path: "batch_invoice_snapshot.json".to_string(),
                interval_secs: 30,
            },
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            snapshot: SnapshotConfig {
                path: std::env::var("SNAPSHOT_PATH")
                    .unwrap_or_else(|_| "batch_invoice_snapshot.json".to_string()),
                interval_secs: std::env::var("SNAPSHOT_INTERVAL_SECS")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(30),
            },
        }
    }
}
