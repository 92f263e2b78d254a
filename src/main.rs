use crate::cli::locus::Locus;
use std::{error::Error};
mod api;
mod cli;
mod session;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let app = Locus::new();
    app.run().await?;
    Ok(())
}
