use axum::{
    routing::{get, post},
    Router,
};
use batch_invoice_rust::{api, store::snapshot, AppConfig, BatchCoordinator};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tracing::{info, warn};
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env();
    info!("Starting server with config: {:?}", config);

    // 创建协调器，尝试从快照恢复
    let mut coordinator = BatchCoordinator::new();
    let snapshot_path = PathBuf::from(&config.snapshot.path);
    // 快照不论有效记录与否都整体恢复，无效记录的错误详情在重启后仍可查
    match snapshot::load(&snapshot_path) {
        Ok(Some(data)) => {
            let valid = data.rows.iter().filter(|r| r.is_valid).count();
            info!("从快照恢复 {} 条记录，其中有效 {} 条", data.rows.len(), valid);
            snapshot::restore_into(&mut coordinator, data);
        }
        Ok(None) => info!("无可恢复的快照数据"),
        Err(e) => warn!("快照读取失败，忽略: {}", e),
    }

    let state: api::SharedCoordinator = Arc::new(Mutex::new(coordinator));

    // 周期性快照任务：只在两次用户操作之间落盘，不会观察到半途状态
    let snapshot_state = state.clone();
    let interval_secs = config.snapshot.interval_secs;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        ticker.tick().await; // 第一个 tick 立即返回，跳过
        loop {
            ticker.tick().await;
            let data = {
                let coord = snapshot_state.lock().await;
                snapshot::capture(&coord)
            };
            if let Err(e) = snapshot::save(&snapshot_path, &data) {
                warn!("快照写入失败: {}", e);
            }
        }
    });

    // 构建路由
    let app = Router::new()
        .route("/health", get(api::health_check))
        .route("/api/batch/import", post(api::import_batch))
        .route("/api/batch/list", get(api::list_batch))
        .route("/api/batch/stats", get(api::batch_stats))
        .route("/api/batch/submit", post(api::submit_single))
        .route("/api/batch/error/:index", get(api::error_detail))
        .route("/api/batch/detail/:apply_id", get(api::batch_detail))
        .route("/api/batch/clear", post(api::clear_batch))
        .route("/api/batch/template", get(api::download_template))
        .route("/api/batch/export", get(api::export_results))
        .route("/api/batch/attachments", post(api::add_attachments))
        .route("/api/batch/attachments/remove", post(api::remove_attachment))
        .route("/api/batch/attachments/apply", post(api::apply_attachments))
        .route("/api/batch/attachments/:owner", get(api::list_attachments))
        .route("/api/invoice/detail", get(api::invoice_detail))
        .route("/api/invoice/apply", post(api::apply_invoice))
        .route("/api/customer/archive/:archive_id", get(api::customer_archive))
        .route("/api/settlement/:order", get(api::settlement_info))
        .layer(ServiceBuilder::new())
        .with_state(state);

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/batch/import    - 批量导入开票申请");
    info!("  GET  /api/batch/list      - 申请列表 (筛选)");
    info!("  POST /api/batch/submit    - 提交单个申请");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
