use digital_literacy::LiteracyApp;
use digital_literacy::config::AppConfig;
use digital_literacy::data::read_catalog_embedded;

const APP_NAME: &str = "Digital Literacy Quest";

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let catalog = read_catalog_embedded()?;
    log::info!("Starting {APP_NAME} with data in {}", config.data_dir.display());

    eframe::run_native(
        APP_NAME,
        eframe::NativeOptions::default(),
        Box::new(|cc| Ok(Box::new(LiteracyApp::new(cc, config, catalog)))),
    )?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    wasm_bindgen_futures::spawn_local(async {
        let catalog = match read_catalog_embedded() {
            Ok(catalog) => catalog,
            Err(err) => {
                log::error!("Content catalog is broken: {err}");
                return;
            }
        };
        let Some(canvas) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("the_canvas_id"))
            .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            log::error!("Canvas `the_canvas_id` not found");
            return;
        };

        let config = AppConfig::from_env();
        let started = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| Ok(Box::new(LiteracyApp::new(cc, config, catalog)))),
            )
            .await;
        if let Err(err) = started {
            log::error!("Failed to start {APP_NAME}: {err:?}");
        }
    });
}
