use actix_cors::Cors;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, Responder, middleware, web};
use rust_embed::RustEmbed;
use std::borrow::Cow;

use bigo::api::handlers::{WsBroker, ws_handler};
use bigo::api::{AppState, configure_routes};
use bigo::{banner, config};

#[derive(RustEmbed)]
#[folder = "static/"]
struct StaticAssets;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Print the startup banner
    banner::print_banner();

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  Warning: Could not load .env file: {}", e);
        eprintln!("   Make sure OPENAI_API_KEY is set in your environment");
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // A missing credential must surface here, before any request is attempted.
    let app_config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let broker = WsBroker::new();
    let state = AppState::new(app_config, broker.clone());

    println!("🚀 Starting server...");
    println!("📊 Frontend available at http://127.0.0.1:8080");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(broker.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
            .route("/ws", web::get().to(ws_handler))
            .route("/{_:.*}", web::get().to(static_file_handler))
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}

async fn static_file_handler(req: HttpRequest) -> impl Responder {
    let path = if req.path() == "/" {
        "index.html"
    } else {
        // trim leading '/'
        &req.path()[1..]
    };

    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(Cow::into_owned(content.data))
        }
        None => HttpResponse::NotFound().body("404 Not Found"),
    }
}
