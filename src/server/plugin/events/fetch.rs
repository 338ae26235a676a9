//! Download of a published spreadsheet export.

use url::Url;

use crate::server::error::AppError;

/// Published-sheet links redirect to a signed download URL.
pub const MAX_REDIRECTS: usize = 5;

/// Checks that a sheet URL is an absolute https URL.
pub fn validate_sheet_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| AppError::BadRequest(format!("Invalid spreadsheet URL: {}", e)))?;

    if url.scheme() != "https" {
        return Err(AppError::BadRequest(
            "Spreadsheet URL must use https".to_string(),
        ));
    }

    Ok(url)
}

/// Fetches the CSV text behind a sheet URL with the shared sheet client.
///
/// # Returns
/// - `Ok(String)` - Response body
/// - `Err(AppError::BadRequest)` - Invalid URL or a non-success response
/// - `Err(AppError::ReqwestErr)` - Connection failure
pub async fn fetch_sheet(client: &reqwest::Client, raw_url: &str) -> Result<String, AppError> {
    let url = validate_sheet_url(raw_url)?;

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::BadRequest(format!(
            "Spreadsheet request failed with status {}",
            status
        )));
    }

    Ok(response.text().await?)
}
