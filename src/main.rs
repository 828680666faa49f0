use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use astra_server::{app_state::AppState, config::Config, handlers::assistant_handler};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let state = AppState::new(config);

    log::info!("starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(assistant_handler::load_document)
            .service(assistant_handler::ask)
            .service(assistant_handler::reset_session)
            .service(assistant_handler::generate_quiz)
            .service(assistant_handler::current_question)
            .service(assistant_handler::submit_answer)
            .service(assistant_handler::quiz_status)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
