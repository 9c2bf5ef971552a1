use bistro_order::config::cli::{AdminCommand, Cli, Command};
use bistro_order::config::LogFormat;
use bistro_order::core::catalog::{load_faq, load_promotions};
use bistro_order::domain::model::ReservationStatus;
use bistro_order::utils::error::{ErrorSeverity, OrderError, Result, ValidationError};
use bistro_order::utils::{logger, validation::Validate};
use bistro_order::{
    AdminBoard, AppConfig, Catalog, ConfigProvider, GasClient, LocalStorage, MemberSession,
    OrderFile,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::from_file(&cli.config).and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    match config.log_format() {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting bistro for {}", config.restaurant_name());
    if cli.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(command: Command, config: &AppConfig) -> Result<()> {
    let backend = GasClient::with_timeout(config.api_endpoint(), config.timeout())?;
    let storage = LocalStorage::new(config.data_dir());
    let mut session = MemberSession::restore(storage).await?;

    match command {
        Command::Menu { category } => {
            let catalog = Catalog::load(&backend).await;
            if catalog.is_empty() {
                println!("目前沒有菜單資料");
            }
            for item in catalog.by_category(category.as_deref().unwrap_or("")) {
                let mut flags = Vec::new();
                if item.has_noodle_selection {
                    flags.push("可換麵");
                }
                if item.allow_combo {
                    flags.push("可加套餐");
                }
                if item.is_spicy() {
                    flags.push("辣");
                }
                if item.is_vegetarian() {
                    flags.push("素");
                }
                println!(
                    "{:<6} {:<20} ${:<5} [{}] {}",
                    item.id,
                    item.name,
                    item.price,
                    item.category,
                    flags.join(" ")
                );
            }
        }
        Command::Promotions => {
            for promo in load_promotions(&backend).await {
                println!("🎉 {} (至 {})", promo.title, promo.valid_until);
                println!("   {}", promo.content);
            }
        }
        Command::Faq => {
            for entry in load_faq(&backend).await {
                println!("Q: {}", entry.question);
                println!("A: {}", entry.answer);
            }
        }
        Command::Login { phone, name } => {
            let member = session
                .login(&phone, &name, config.admin_phones(), &backend)
                .await?;
            println!("👤 歡迎 {} ({})", member.name, member.phone);
            if member.is_admin {
                println!("🔑 管理員身分");
            }
        }
        Command::Logout => {
            session.logout().await?;
            println!("👋 已登出");
        }
        Command::Profile => {
            session.require_member()?;
            if let Some(member) = session.refresh(&backend).await? {
                println!("👤 {} ({}) 積分 {}", member.name, member.phone, member.points);
            }
            let bookings = session.bookings(&backend).await;
            if bookings.is_empty() {
                println!("尚無訂位紀錄");
            }
            for booking in bookings {
                println!(
                    "📅 {} {} {} 位 [{}] 預點 {} 項",
                    booking.date_key(),
                    booking.time,
                    booking.pax,
                    booking.status,
                    booking.pre_ordered_lines().len()
                );
            }
        }
        Command::Reserve { order } => {
            session.require_member()?;
            let order = OrderFile::from_file(&order)?;
            let catalog = Catalog::load(&backend).await;
            let mut flow = session.start_reservation(catalog, config.closed_weekday())?;

            order.apply(&mut flow)?;
            for line in flow.cart().lines() {
                println!("🛒 {} ${}", line.item.name, line.line_total());
            }
            println!("💰 總計 ${}", flow.total());

            let receipt = flow.submit(&backend).await?;
            println!(
                "✅ 訂位成功！編號 {}，桌號 {}",
                receipt.reservation_id, receipt.table_id
            );
        }
        Command::Admin(admin) => {
            session.require_admin()?;
            let mut board = AdminBoard::load(&backend).await;

            match admin {
                AdminCommand::Reservations => {
                    let today = chrono::Local::now().date_naive();
                    println!(
                        "今日 {} 筆，待確認 {} 筆",
                        board.todays_count(today, &chrono::Local),
                        board.pending_count()
                    );
                    for r in board.reservations() {
                        println!(
                            "{:<6} {} {} {:<10} {} 位 [{}] 桌 {}",
                            r.id.as_deref().unwrap_or("-"),
                            r.date_key(),
                            r.time,
                            r.name,
                            r.pax,
                            r.status,
                            r.table_id.as_deref().unwrap_or("-")
                        );
                    }
                }
                AdminCommand::Stats => {
                    for (date, revenue) in board.revenue_series() {
                        println!("{:<8} ${}", date, revenue);
                    }
                    println!(
                        "總營收 ${}，來客 {} 人",
                        board.total_revenue(),
                        board.total_visitors()
                    );
                }
                AdminCommand::SetStatus { id, status } => {
                    let status = status.parse::<ReservationStatus>().map_err(|_| {
                        OrderError::from(ValidationError::UnknownOption {
                            kind: "status".to_string(),
                            value: status.clone(),
                        })
                    })?;
                    board.change_status(&backend, &id, status).await?;
                    println!("✅ 訂位 {} 已更新為 {}", id, status);
                }
            }
        }
    }

    Ok(())
}
