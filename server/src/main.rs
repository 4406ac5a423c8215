use rouille::{Request, Server};

use folio::error;
use folio::error::{Result, Chainable};
use folio::templating::minijinja::MiniJinjaEngine;

use crate::config::{Config, Folio, Settings};
use crate::routes::Site;

mod assets;
mod config;
mod logging;
mod routes;

pub fn main() {
    let flags = Folio::from_env_or_exit();
    let _logger = match logging::init(flags.log.as_deref()) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&flags) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(flags: &Folio) -> Result<()> {
    let settings = Settings::discover(flags)?;
    let config = Config::load::<MiniJinjaEngine>(settings)?;
    log::info!("loaded templates: {}", config.engine.names().join(", "));

    let site = Site::new(config);
    let addr = site.config().settings.addr.clone();
    let server = Server::new(&addr, move |request: &Request| rouille::log_custom(request,
        |request, response, elapsed| log::info!("{} {} -> {} ({:?})",
            request.method(), request.raw_url(), response.status_code, elapsed),
        |request, elapsed| log::error!("{} {} panicked after {:?}",
            request.method(), request.raw_url(), elapsed),
        || site.handle(request),
    )).chain_with(|| error!("failed to start listener", "address" => &addr))?;

    log::info!("server running at http://{}", server.server_addr());
    server.run();
    Ok(())
}
