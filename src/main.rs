use std::io;
use std::sync::Arc;

use actix_web::{App, HttpResponse, HttpServer, cookie::Key, middleware, web};

use church_admin::auth::accounts::{Authenticator, ConfiguredAccounts};
use church_admin::auth::rate_limit::LoginThrottle;
use church_admin::config::AppConfig;
use church_admin::dashboard::DashboardSource;
use church_admin::settings::{FileStore, SettingsStore};
use church_admin::{db, routes};

fn session_key(configured: Option<&str>) -> Key {
    match configured {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+); generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set; generating random key (sessions lost on restart)");
            Key::generate()
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    std::fs::create_dir_all(&config.data_dir)?;

    let pool = db::init_pool(&config.database_url, config.db_max_connections)
        .await
        .map_err(io::Error::other)?;
    db::run_migrations(&pool).await.map_err(io::Error::other)?;

    let settings = web::Data::new(SettingsStore::new(FileStore::new(&config.data_dir)));
    let accounts = ConfiguredAccounts::from_config(config.admin_accounts.as_deref()).map_err(io::Error::other)?;
    let authenticator: web::Data<dyn Authenticator> = web::Data::from(Arc::new(accounts) as Arc<dyn Authenticator>);
    let source: web::Data<dyn DashboardSource> = web::Data::from(Arc::new(pool.clone()) as Arc<dyn DashboardSource>);
    let throttle = web::Data::new(LoginThrottle::new());
    let secret_key = session_key(config.session_key.as_deref());

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(routes::session_middleware(secret_key.clone()))
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(source.clone())
            .app_data(settings.clone())
            .app_data(authenticator.clone())
            .app_data(throttle.clone())
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            .configure(routes::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
