use anyhow::Result;
use clap::Parser;
use property_inspect::{
    ai_provider, analyzer, cli, config, error, inspect, navigation, picker, property_edits,
    report, session,
};
use property_inspect_common::{
    find_property, properties, CatalogStats, InspectionReport, Property, PropertyStatus, User,
};
use ai_provider::AiProvider;
use cli::{Cli, Commands};
use config::Config;
use error::InspectError;
use navigation::{ConsoleNavigator, Navigator, Screen};
use picker::{DialogPicker, FilePicker, ImagePicker, PickerOptions};
use property_edits::PropertyEdits;
use session::{SessionController, SessionStore};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "property_inspect=debug"
    } else {
        "property_inspect=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn lookup_property(id: &str, edits: &PropertyEdits) -> Result<Property> {
    let property =
        find_property(id)?.ok_or_else(|| InspectError::PropertyNotFound(id.to_string()))?;
    Ok(edits.apply(property))
}

fn build_controller(
    property: &Property,
    provider: AiProvider,
    config: &Config,
    store: &SessionStore,
    navigator: Box<dyn Navigator>,
) -> Result<SessionController> {
    let service = analyzer::build_service(provider, config)?;
    Ok(SessionController::new(property.id.clone(), service, navigator)
        .with_inspector(store.get().cloned())
        .with_transcription_delay(config.transcription_delay()))
}

fn write_report(output: Option<PathBuf>, report: &InspectionReport) -> Result<()> {
    if let Some(output) = output {
        let path = report::report_path(&output, &report.property_ref);
        report::save_report(&path, report)?;
        println!("✔ レポートを保存: {}", path.display());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;
    let provider = cli.ai_provider.unwrap_or(config.ai_provider);

    match cli.command {
        Commands::Properties => {
            let edits = PropertyEdits::load(&PropertyEdits::default_path()?)?;
            let list = edits.apply_all(properties()?);
            let stats = CatalogStats::from_properties(&list);
            let mut nav = ConsoleNavigator::default();
            nav.navigate(Screen::Home);

            println!(
                "📊 Properties: {}  🟢 Available: {}  🟡 Pending: {}\n",
                stats.total, stats.available, stats.pending
            );
            println!("📋 Properties to Inspect ({}件)\n", list.len());
            for p in &list {
                let status = match p.status {
                    PropertyStatus::Available => "🟢",
                    PropertyStatus::Pending => "🟡",
                };
                println!(
                    "  [{}] {} {} - {} (⭐ {})",
                    p.id, status, p.name, p.location, p.rating
                );
            }
        }

        Commands::Details { id, read_only, edit } => {
            let mut edits = PropertyEdits::load(&PropertyEdits::default_path()?)?;
            let mut p = lookup_property(&id, &edits)?;
            let mut nav = ConsoleNavigator::default();
            nav.navigate(Screen::Details {
                property_id: p.id.clone(),
                read_only,
            });

            let patch = edit.into_patch();
            if !patch.is_empty() {
                p = edits.update(&p, patch, read_only)?;
                edits.save()?;
                println!("✔ 物件詳細を更新しました: {}\n", edits.path().display());
            }

            inspect::render_property(&p);
            println!("   💰 ${}", p.price);
            println!("   🏢 {}", p.layout);
            println!("   📅 点検予定: {}", p.inspection_date);
            println!("   🛎 {}", p.amenities.join(", "));
            println!("\n{}", p.overview);
        }

        Commands::Inspect { id, photos, output } => {
            let edits = PropertyEdits::load(&PropertyEdits::default_path()?)?;
            let property = lookup_property(&id, &edits)?;
            let store = SessionStore::load(&SessionStore::default_path()?)?;
            if store.get().is_none() {
                println!("⚠ ログインしていません（担当者なしで記録します）");
            }
            println!("🔎 property-inspect - インスペクション (AI: {})\n", provider);

            let mut nav = ConsoleNavigator::default();
            nav.navigate(Screen::InspectionStart {
                property_id: property.id.clone(),
            });

            let mut controller =
                build_controller(&property, provider, &config, &store, Box::new(nav))?;
            let photo_picker = DialogPicker::new(photos.unwrap_or_else(|| PathBuf::from(".")));
            let options = PickerOptions::default().with_max_dimension(config.max_image_dimension);

            let completed =
                inspect::run_interactive(&mut controller, &property, &photo_picker, &options)
                    .await?;
            drop(controller);

            match completed {
                Some(report) => write_report(output, &report)?,
                None => println!("インスペクションを中断しました"),
            }
        }

        Commands::Run { id, image, output } => {
            let edits = PropertyEdits::load(&PropertyEdits::default_path()?)?;
            let property = lookup_property(&id, &edits)?;
            let store = SessionStore::load(&SessionStore::default_path()?)?;
            println!("🚀 property-inspect - 一括実行 (AI: {})\n", provider);
            inspect::render_property(&property);

            let nav = ConsoleNavigator::default();
            let mut controller =
                build_controller(&property, provider, &config, &store, Box::new(nav))?;

            let file_picker = image.map(FilePicker::new);
            let options = PickerOptions::default().with_max_dimension(config.max_image_dimension);
            let completed = inspect::run_scripted(
                &mut controller,
                file_picker.as_ref().map(|p| p as &dyn ImagePicker),
                &options,
            )
            .await;

            if let Some(report) = completed {
                write_report(output, &report)?;
            }
        }

        Commands::Report { path } => {
            let report = report::load_report(&path)?;
            println!("📄 インスペクションレポート: 物件 {}", report.property_ref);
            if let Some(inspector) = &report.inspector {
                println!("  担当者: {} <{}>", inspector.name, inspector.email);
            }
            println!("  完了日時: {}", report.completed_at);
            if let Some(transcript) = &report.transcript {
                println!("  文字起こし: {}", transcript);
            }
            if !report.keywords.is_empty() {
                println!("  キーワード: {}", report.keywords.join(" / "));
            }
            if let Some(image) = &report.image {
                println!("  写真: {}", image.path.display());
            }
            if !report.amenities.is_empty() {
                println!("  設備: {}", report.amenities.join(" / "));
            }
            if report.analysis_pending {
                println!("  ⚠ 解析中のまま完了");
            }
        }

        Commands::Login { name, email, uid } => {
            let mut store = SessionStore::load(&SessionStore::default_path()?)?;
            let uid = uid.unwrap_or_else(|| email.clone());
            store.set(User::new(name, email, uid));
            store.save()?;
            if let Some(user) = store.get() {
                println!("✔ ログインしました: {} <{}>", user.name, user.email);
                println!("  保存先: {}", store.path().display());
            }
            ConsoleNavigator::default().navigate(Screen::Home);
        }

        Commands::Logout => {
            let mut store = SessionStore::load(&SessionStore::default_path()?)?;
            store.clear()?;
            println!("✔ ログアウトしました");
            ConsoleNavigator::default().navigate(Screen::Login);
        }

        Commands::Profile => {
            let store = SessionStore::load(&SessionStore::default_path()?)?;
            let user = store.get().ok_or(InspectError::NotLoggedIn)?;
            ConsoleNavigator::default().navigate(Screen::Profile);
            println!("👤 {}", user.name);
            println!("  メール: {}", user.email);
            println!("  役割: {}", user.role);
            println!("  UID: {}", user.uid);
        }

        Commands::Config { set_provider, show } => {
            let mut config = config;

            if let Some(provider) = set_provider {
                config.set_provider(provider)?;
                println!("✔ AIプロバイダを設定しました: {}", provider);
            }

            if show || set_provider.is_none() {
                println!("設定:");
                println!("  AIプロバイダ: {}", config.ai_provider);
                println!("  文字起こし遅延: {}ms", config.transcription_delay_ms);
                println!(
                    "  モック遅延: テキスト {}ms / 画像 {}ms",
                    config.text_delay_ms, config.image_delay_ms
                );
                println!("  最大画像サイズ: {}px", config.max_image_dimension);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            }
        }
    }

    Ok(())
}
