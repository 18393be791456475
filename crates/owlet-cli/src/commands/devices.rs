//! Device listing handler.

use tabled::Tabled;

use owlet_api::{Device, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "DSN")]
    dsn: String,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Type")]
    dtype: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            dsn: d.dsn.clone(),
            product: d.product.clone().unwrap_or_default(),
            model: d.model.clone().unwrap_or_default(),
            dtype: d.device_type.clone().unwrap_or_default(),
            status: d.connection_status.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let devices = session.list_devices().await?;

    let rendered = output::render_list(&global.output, &devices, |d| DeviceRow::from(d), |d| {
        d.dsn.clone()
    });
    output::print_output(&rendered, global.quiet);
    Ok(())
}
