use anyhow::Result;
use tracing::info;

use bank_marketing_split::logging::init_logging;
use bank_marketing_split::{run, VERSION};

fn main() -> Result<()> {
    init_logging()?;
    info!(version = VERSION, "bank-marketing-split starting");

    // One line per output file, printed as soon as it is written
    run(|table| println!("{}", table.confirmation()))?;

    Ok(())
}
