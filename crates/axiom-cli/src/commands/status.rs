//! Status command implementation.

use crate::commands::connect;
use crate::output;
use crate::RemoteArgs;

pub async fn run(request_id: String, remote: RemoteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let client = connect(remote)?;
    let response = client.query_status(&request_id).await?;
    println!("{}", output::format_response(&response));
    Ok(())
}
