//! Command implementations.
//!
//! The building blocks (`select_product`, `capture_photo`, `try_on`)
//! take their collaborators as arguments; [`run`] builds them from the
//! environment and prints the outcome.

use std::path::PathBuf;
use std::sync::Arc;

use atelier_camera::{CameraDevice, CaptureSession, CapturedImage, StillImageDevice};
use atelier_catalog::{CatalogApi, CatalogConfig, ProductDisplay, ProductId};
use atelier_core::session_store::SessionStore;
use atelier_fashn::{
    FashnConfig, GenerationService, JobPhase, MissingInput, TryOnError, TryOnOrchestrator,
    TryOnState,
};
use tokio::sync::watch;

use crate::args::Command;
use crate::error::CliError;

/// Execute one parsed command.
pub async fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::TryOn {
            photo,
            garment,
            product,
        } => run_try_on(photo, garment, product).await,
        Command::Products => list_products().await,
        Command::Product { id } => show_product(&id).await,
    }
}

/// Fetch a product and record its image as the garment to try on.
pub async fn select_product(
    catalog: &CatalogApi,
    store: &SessionStore,
    id: &ProductId,
) -> Result<ProductDisplay, CliError> {
    let product = catalog.product_display(id).await?;
    store.set_try_on_image_url(product.image.clone());
    tracing::info!(product_id = %id, "Garment selected for try-on");
    Ok(product)
}

/// Open the camera, take one snapshot and release the camera again.
pub async fn capture_photo<D: CameraDevice>(
    session: &mut CaptureSession<D>,
) -> Result<CapturedImage, CliError> {
    session.start().await?;
    let photo = session.capture();
    session.stop();
    photo.ok_or(CliError::NoPhoto)
}

/// Capture a photo and run a try-on against the chosen garment.
///
/// An explicit `garment` wins over the one recorded in `store`. With
/// neither, the request is rejected before the camera is opened.
pub async fn try_on<S: GenerationService, D: CameraDevice>(
    orchestrator: &TryOnOrchestrator<S>,
    session: &mut CaptureSession<D>,
    store: &SessionStore,
    garment: Option<&str>,
) -> Result<Vec<String>, CliError> {
    let garment = garment
        .map(str::to_string)
        .or_else(|| store.try_on_image_url())
        .filter(|garment| !garment.trim().is_empty())
        .ok_or(TryOnError::MissingInput(MissingInput::GarmentImage))?;
    let photo = capture_photo(session).await?;

    Ok(orchestrator.start(Some(&photo), Some(&garment)).await?)
}

/// Report every job phase published on `updates` until the orchestrator
/// is dropped. The phase current at that point is always reported.
pub async fn follow_progress(
    mut updates: watch::Receiver<TryOnState>,
    mut on_phase: impl FnMut(JobPhase),
) {
    while updates.changed().await.is_ok() {
        let phase = updates.borrow_and_update().phase();
        if let Some(phase) = phase {
            on_phase(phase);
        }
    }
}

// ---- command runners ----

async fn run_try_on(
    photo: PathBuf,
    garment: Option<String>,
    product: Option<ProductId>,
) -> Result<(), CliError> {
    let fashn = FashnConfig::from_env()?;
    let store = SessionStore::new();

    if let Some(id) = &product {
        let catalog = CatalogConfig::from_env()?.api();
        let selected = select_product(&catalog, &store, id).await?;
        println!("Garment: {} ({})", selected.description, selected.image);
    }

    let orchestrator = TryOnOrchestrator::new(Arc::new(fashn.api()), fashn.poll.clone());
    let mut session = CaptureSession::new(StillImageDevice::new(photo));

    let progress = tokio::spawn(follow_progress(orchestrator.subscribe(), |phase| {
        println!("Status: {phase:?}");
    }));

    let result = try_on(&orchestrator, &mut session, &store, garment.as_deref()).await;
    // Closing the channel lets the watcher print the last phase and exit.
    drop(orchestrator);
    if let Err(e) = progress.await {
        tracing::debug!(error = %e, "Progress watcher ended abnormally");
    }

    let images = result?;
    println!("Result:");
    for url in images {
        println!("  {url}");
    }
    Ok(())
}

async fn list_products() -> Result<(), CliError> {
    let catalog = CatalogConfig::from_env()?.api();
    let products = catalog.list_products().await?;

    if products.is_empty() {
        println!("No products found.");
        return Ok(());
    }

    println!("Products:");
    for product in products {
        println!(
            "  [{}] {} {}",
            product.id,
            product.description.as_deref().unwrap_or("-"),
            product.price.as_deref().unwrap_or(""),
        );
    }
    Ok(())
}

async fn show_product(id: &ProductId) -> Result<(), CliError> {
    let catalog = CatalogConfig::from_env()?.api();
    let product = catalog.product_display(id).await?;

    println!("[{}] {}", product.id, product.description);
    println!("  Type:    {}", product.kind);
    println!("  Color:   {}", product.color);
    println!("  Graphic: {}", product.graphic);
    println!("  Variant: {}", product.variant);
    println!("  Price:   {}", product.price);
    println!("  Stock:   {} ({})", product.stock, product.stock_status);
    println!("  Image:   {}", product.image);
    Ok(())
}
