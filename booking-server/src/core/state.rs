use std::sync::Arc;

use rand::Rng;

use crate::auth::{JwtService, permissions};
use crate::availability::AvailabilityChecker;
use crate::bookings::BookingManager;
use crate::core::Config;
use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::db::DbService;
use crate::db::models::StaffCreate;
use crate::db::repository::{
    BookingRepository, LayoutRepository, RoomRepository, SettingsRepository, StaffRepository,
    UserRepository,
};
use crate::notify::{MailClient, Notifier};
use crate::payments::PaymentGateway;
use shared::error::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc/浅拷贝，clone 成本极低。所有 axum handler 通过
/// `State<ServerState>` 取用。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | 嵌入式数据库 (SurrealDB) |
/// | jwt_service | JWT 认证服务 |
/// | bookings | 预订生命周期管理器 |
/// | availability | 可用性检查器 |
/// | gateway | 支付网关客户端 |
/// | notifier | 通知队列句柄 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    jwt_service: Arc<JwtService>,
    bookings: BookingManager,
    availability: AvailabilityChecker,
    gateway: PaymentGateway,
    notifier: Notifier,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序：工作目录 → 数据库 → 种子数据 (settings/layout/admin) →
    /// 各服务 → 通知 worker 注册到 `tasks`。
    pub async fn initialize(config: &Config, tasks: &mut BackgroundTasks) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("pavilion.db");
        let db = DbService::new(&db_path.to_string_lossy()).await?;

        // 种子：settings 和 layout 单例，首个管理员账号
        SettingsRepository::new(db.db.clone()).get_or_default().await?;
        LayoutRepository::new(db.db.clone()).get_or_default().await?;
        seed_admin_staff(&db, config).await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let mailer = MailClient::new(
            config.mail_api_url.clone(),
            config.mail_api_key.clone(),
            config.mail_from.clone(),
        );
        let (notifier, rx) = Notifier::channel(config.notify_queue_size);
        let shutdown = tasks.shutdown_token();
        let max_attempts = config.notify_max_attempts;
        tasks.spawn("notify_worker", TaskKind::Worker, async move {
            crate::notify::dispatch_loop(rx, mailer, max_attempts, shutdown).await;
        });

        let gateway = PaymentGateway::new(
            config.payment_api_url.clone(),
            config.payment_api_key.clone(),
            config.payment_currency.clone(),
        );

        let bookings = BookingManager::new(&db, notifier.clone());
        let availability = AvailabilityChecker::new(&db);

        Ok(Self {
            config: config.clone(),
            db,
            jwt_service,
            bookings,
            availability,
            gateway,
            notifier,
        })
    }

    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn bookings(&self) -> &BookingManager {
        &self.bookings
    }

    pub fn availability(&self) -> &AvailabilityChecker {
        &self.availability
    }

    pub fn gateway(&self) -> &PaymentGateway {
        &self.gateway
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    // Repository accessors — 每个都是对共享连接的轻量包装
    pub fn booking_repo(&self) -> BookingRepository {
        BookingRepository::new(self.db.db.clone())
    }

    pub fn room_repo(&self) -> RoomRepository {
        RoomRepository::new(self.db.db.clone())
    }

    pub fn layout_repo(&self) -> LayoutRepository {
        LayoutRepository::new(self.db.db.clone())
    }

    pub fn settings_repo(&self) -> SettingsRepository {
        SettingsRepository::new(self.db.db.clone())
    }

    pub fn staff_repo(&self) -> StaffRepository {
        StaffRepository::new(self.db.db.clone())
    }

    pub fn user_repo(&self) -> UserRepository {
        UserRepository::new(self.db.db.clone())
    }
}

/// 首次启动种子管理员账号
///
/// 未设置 ADMIN_PIN 时生成随机 PIN 并打印一次，必须立刻修改。
async fn seed_admin_staff(db: &DbService, config: &Config) -> Result<(), AppError> {
    let staff_repo = StaffRepository::new(db.db.clone());
    if staff_repo.count().await? > 0 {
        return Ok(());
    }

    let (pin, generated) = match &config.admin_pin {
        Some(pin) => (pin.clone(), false),
        None => {
            let mut rng = rand::thread_rng();
            (format!("{:06}", rng.gen_range(0..1_000_000u32)), true)
        }
    };

    staff_repo
        .create(StaffCreate {
            name: "admin".to_string(),
            pin: pin.clone(),
            permissions: permissions::get_default_permissions("admin"),
        })
        .await?;

    if generated {
        tracing::warn!("Seeded admin account with PIN {pin} — change it immediately");
    } else {
        tracing::info!("Seeded admin account");
    }
    Ok(())
}
