use anyhow::{anyhow, Result};
use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlElement, Url};

/// Hand `bytes` to the browser as a file download named `file_name`
pub fn save_pdf(bytes: &[u8], file_name: &str) -> Result<()> {
    let parts = Array::new();
    parts.push(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type("application/pdf");
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| anyhow!("Failed to create file: {:?}", e))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| anyhow!("Failed to create download link: {:?}", e))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| anyhow!("No document available"))?;
    let anchor = document
        .create_element("a")
        .map_err(|e| anyhow!("Failed to create download link: {:?}", e))?;
    anchor
        .set_attribute("href", &url)
        .and_then(|_| anchor.set_attribute("download", file_name))
        .map_err(|e| anyhow!("Failed to create download link: {:?}", e))?;
    let anchor: HtmlElement = anchor
        .dyn_into()
        .map_err(|_| anyhow!("Download link is not an HTML element"))?;
    anchor.click();

    // the click has already started the download
    let _ = Url::revoke_object_url(&url);
    Ok(())
}
