#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    // Set up logging; level comes from RUST_LOG
    env_logger::init();

    // Background file dialogs are spawned on the tokio runtime
    resolution_preview::run_app()
}
