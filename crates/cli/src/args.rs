use std::path::PathBuf;

use atelier_catalog::ProductId;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "atelier")]
#[command(about = "Virtual try-on from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Dress the person in a photo in a garment
    TryOn {
        /// Photo of the person, used as the camera frame
        photo: PathBuf,

        /// Garment image URL
        #[arg(short, long)]
        garment: Option<String>,

        /// Catalog product whose image is used as the garment
        #[arg(short, long)]
        product: Option<ProductId>,
    },

    /// List catalog products
    Products,

    /// Show one catalog product
    Product {
        id: ProductId,
    },
}
